//! Texture file copying.
//!
//! Writes every image the document references into the target directory
//! under its deduplicated file name. Plain textures are re-encoded (JPEG
//! stays JPEG, everything else becomes PNG); lightmaps are RGBM-decoded to
//! opaque PNG using the pass's contrast constant.
//!
//! Unreadable source files are skippable data issues: warn and move on,
//! the document itself already shipped.

use crate::error::Result;
use crate::export::dedup::ResourceMaps;
use crate::export::ExportSettings;
use crate::scene::Scene;
use image::{ImageFormat, RgbImage};
use std::path::Path;

/// Copy every discovered image into `target_dir`.
pub fn copy_textures(
    scene: &Scene,
    maps: &ResourceMaps,
    settings: &ExportSettings,
    target_dir: &Path,
) -> Result<()> {
    for entry in &maps.images {
        let texture = scene.texture(entry.texture);
        let source = Path::new(&texture.path);
        let destination = target_dir.join(&entry.filename);

        let loaded = match image::open(source) {
            Ok(loaded) => loaded,
            Err(error) => {
                log::warn!(
                    "skipping texture {:?}: cannot read {:?}: {}",
                    texture.name,
                    source,
                    error
                );
                continue;
            }
        };

        if maps.is_lightmap_texture(entry.texture) {
            decode_rgbm(&loaded, settings.lightmap_contrast).save_with_format(
                &destination,
                ImageFormat::Png,
            )?;
        } else if texture.extension() == "jpg" {
            loaded.to_rgb8().save_with_format(&destination, ImageFormat::Jpeg)?;
        } else {
            loaded.save_with_format(&destination, ImageFormat::Png)?;
        }
        log::debug!("wrote texture {:?}", destination);
    }
    Ok(())
}

/// Decode an RGBM-encoded lightmap: each channel is scaled by the alpha
/// multiplier and the contrast constant, alpha is dropped.
fn decode_rgbm(source: &image::DynamicImage, contrast: f32) -> RgbImage {
    let rgba = source.to_rgba32f();
    let mut out = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let multiplier = pixel[3] * contrast;
        let channel = |v: f32| ((v * multiplier).clamp(0.0, 1.0) * 255.0).round() as u8;
        out.put_pixel(
            x,
            y,
            image::Rgb([channel(pixel[0]), channel(pixel[1]), channel(pixel[2])]),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::dedup::discover;
    use crate::scene::{
        MaterialData, MeshData, MeshInstance, SceneNode, TextureAssignment, TextureData,
    };
    use image::{Rgba, RgbaImage};

    fn write_test_png(path: &Path, pixel: Rgba<u8>) {
        let mut img = RgbaImage::new(2, 2);
        for p in img.pixels_mut() {
            *p = pixel;
        }
        img.save_with_format(path, ImageFormat::Png).unwrap();
    }

    fn scene_with_texture(texture: TextureData) -> Scene {
        let mut scene = Scene::new();
        let mesh = scene.add_mesh(MeshData {
            name: "m".to_string(),
            vertices: vec![glam::Vec3::ZERO; 3],
            submeshes: vec![vec![0, 1, 2]],
            ..MeshData::default()
        });
        let texture = scene.add_texture(texture);
        let mut material = MaterialData::named("mat");
        material.diffuse_map = Some(TextureAssignment::new(texture));
        let material = scene.add_material(material);
        scene.nodes.push(SceneNode {
            name: "n".to_string(),
            mesh: Some(MeshInstance {
                mesh,
                materials: vec![Some(material)],
                lightmap: None,
            }),
            ..SceneNode::default()
        });
        scene
    }

    #[test]
    fn test_copies_texture_under_deduplicated_name() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bricks.png");
        write_test_png(&source, Rgba([200, 100, 50, 255]));

        let scene = scene_with_texture(TextureData::from_path(source.to_string_lossy()));
        let settings = ExportSettings::default();
        let maps = discover(&scene, &[0], &settings);
        copy_textures(&scene, &maps, &settings, dir.path()).unwrap();

        assert!(dir.path().join("mat_bricks.png").exists());
    }

    #[test]
    fn test_missing_source_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let scene = scene_with_texture(TextureData::from_path("/nonexistent/void.png"));
        let settings = ExportSettings::default();
        let maps = discover(&scene, &[0], &settings);
        // Must not fail the pass.
        copy_textures(&scene, &maps, &settings, dir.path()).unwrap();
        assert!(dir.path().read_dir().unwrap().next().is_none());
    }

    #[test]
    fn test_lightmap_rgbm_decode() {
        let dir = tempfile::tempdir().unwrap();
        let assets = dir.path().join("assets");
        std::fs::create_dir(&assets).unwrap();
        let source = assets.join("lm-0.png");
        // Half-intensity RGBM pixel: rgb 0.2, alpha 0.5, contrast 5.0
        // decodes each channel to 0.2 * 0.5 * 5.0 = 0.5.
        write_test_png(&source, Rgba([51, 51, 51, 128]));

        let mut scene = Scene::new();
        let lightmap = scene.add_texture(TextureData::from_path(source.to_string_lossy()));
        scene.lightmaps.push(lightmap);
        let settings = ExportSettings::default();
        let maps = discover(&scene, &[], &settings);
        copy_textures(&scene, &maps, &settings, dir.path()).unwrap();

        let decoded = image::open(dir.path().join("lm-0.png")).unwrap().to_rgb8();
        let pixel = decoded.get_pixel(0, 0);
        // 51/255 * (128/255 * 5.0) clamped ≈ 0.502 → 128.
        assert!((pixel[0] as i16 - 128).abs() <= 1, "got {}", pixel[0]);
    }
}
