//! Image and texture section encoding.

use crate::export::dedup::ResourceMaps;
use crate::export::document::{EnumCode, ImageEntry, TextureEntry};
use crate::export::{ExportSettings, Revision};
use crate::scene::{FilterMode, Scene, TextureSlot, WrapMode};
use glam::Vec2;

/// Encode the images section: one entry per distinct texture object.
pub fn encode_images(maps: &ResourceMaps) -> Vec<ImageEntry> {
    maps.images
        .iter()
        .map(|image| ImageEntry {
            url: image.filename.clone(),
            uuid: image.id.clone(),
            name: image.filename.clone(),
            original_url: image.filename.clone(),
        })
        .collect()
}

/// Encode the textures section: one entry per deduplicated binding.
pub fn encode_textures(
    scene: &Scene,
    maps: &ResourceMaps,
    settings: &ExportSettings,
) -> Vec<TextureEntry> {
    maps.bindings
        .iter()
        .filter_map(|binding| {
            let Some(image) = maps.image_for(binding.texture) else {
                log::warn!("texture binding {} has no image entry", binding.id);
                return None;
            };
            let texture = scene.texture(binding.texture);
            let carrier = maps.carrier_material(scene, binding);

            let offset = carrier
                .texture_slot(binding.slot)
                .map(|a| a.offset)
                .unwrap_or(Vec2::ZERO);
            // Tiling is always read from the carrier's diffuse slot,
            // whatever slot the binding occupies.
            let repeat = carrier
                .texture_slot(TextureSlot::Diffuse)
                .map(|a| a.repeat)
                .unwrap_or(Vec2::ONE);

            let (mag_filter, min_filter) = filter_codes(texture.filter, settings.revision);
            let wrap = wrap_code(texture.wrap, settings.revision);

            Some(TextureEntry {
                uuid: binding.id.clone(),
                offset: [offset.x, offset.y],
                repeat: [repeat.x, repeat.y],
                mag_filter,
                min_filter,
                wrap: [wrap, wrap],
                image: image.id.clone(),
                name: image.filename.clone(),
                anisotropy: 16,
            })
        })
        .collect()
}

fn filter_codes(filter: FilterMode, revision: Revision) -> (EnumCode, EnumCode) {
    match (filter.is_point(), revision) {
        (true, Revision::R71) => (
            EnumCode::Name("NearestFilter"),
            EnumCode::Name("NearestMipMapNearestFilter"),
        ),
        (true, Revision::R72Plus) => (EnumCode::Code(1003), EnumCode::Code(1004)),
        (false, Revision::R71) => (
            EnumCode::Name("LinearFilter"),
            EnumCode::Name("LinearMipMapLinearFilter"),
        ),
        (false, Revision::R72Plus) => (EnumCode::Code(1006), EnumCode::Code(1008)),
    }
}

fn wrap_code(wrap: WrapMode, revision: Revision) -> EnumCode {
    match (wrap, revision) {
        (WrapMode::Repeat, Revision::R71) => EnumCode::Name("RepeatWrapping"),
        (WrapMode::Repeat, Revision::R72Plus) => EnumCode::Code(1000),
        (WrapMode::Clamp, Revision::R71) => EnumCode::Name("ClampToEdgeWrapping"),
        (WrapMode::Clamp, Revision::R72Plus) => EnumCode::Code(1001),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::dedup::discover;
    use crate::scene::{
        MaterialData, MeshData, MeshInstance, SceneNode, TextureAssignment, TextureData,
    };

    fn textured_scene(filter: FilterMode, wrap: WrapMode) -> (Scene, Vec<usize>) {
        let mut scene = Scene::new();
        let mesh = scene.add_mesh(MeshData {
            name: "m".to_string(),
            vertices: vec![glam::Vec3::ZERO; 3],
            submeshes: vec![vec![0, 1, 2]],
            ..MeshData::default()
        });
        let texture = scene.add_texture(TextureData {
            filter,
            wrap,
            ..TextureData::from_path("tiles.png")
        });
        let mut material = MaterialData::named("tiled");
        material.diffuse_map = Some(TextureAssignment {
            texture,
            offset: Vec2::new(0.25, 0.5),
            repeat: Vec2::new(2.0, 2.0),
        });
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
        (scene, vec![0])
    }

    #[test]
    fn test_texture_entry_offsets_and_image_reference() {
        let (scene, nodes) = textured_scene(FilterMode::Bilinear, WrapMode::Repeat);
        let settings = ExportSettings::default();
        let maps = discover(&scene, &nodes, &settings);
        let entries = encode_textures(&scene, &maps, &settings);
        let images = encode_images(&maps);

        assert_eq!(entries.len(), 1);
        assert_eq!(images.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.offset, [0.25, 0.5]);
        assert_eq!(entry.repeat, [2.0, 2.0]);
        assert_eq!(entry.image, images[0].uuid);
        assert_eq!(entry.name, "tiled_tiles.png");
        assert_eq!(entry.anisotropy, 16);
    }

    #[test]
    fn test_modern_revision_numeric_codes() {
        let (scene, nodes) = textured_scene(FilterMode::Point, WrapMode::Clamp);
        let settings = ExportSettings::default();
        let maps = discover(&scene, &nodes, &settings);
        let entry = &encode_textures(&scene, &maps, &settings)[0];

        assert!(matches!(entry.mag_filter, EnumCode::Code(1003)));
        assert!(matches!(entry.min_filter, EnumCode::Code(1004)));
        assert!(matches!(entry.wrap[0], EnumCode::Code(1001)));
    }

    #[test]
    fn test_legacy_revision_string_names() {
        let (scene, nodes) = textured_scene(FilterMode::Bilinear, WrapMode::Repeat);
        let settings = ExportSettings {
            revision: Revision::R71,
            ..ExportSettings::default()
        };
        let maps = discover(&scene, &nodes, &settings);
        let entry = &encode_textures(&scene, &maps, &settings)[0];

        assert!(matches!(entry.mag_filter, EnumCode::Name("LinearFilter")));
        assert!(matches!(
            entry.min_filter,
            EnumCode::Name("LinearMipMapLinearFilter")
        ));
        assert!(matches!(entry.wrap[0], EnumCode::Name("RepeatWrapping")));
    }

    #[test]
    fn test_lightmap_binding_uses_placeholder_defaults() {
        let mut scene = Scene::new();
        let lightmap = scene.add_texture(TextureData::from_path("lm-0.exr"));
        scene.lightmaps.push(lightmap);
        let settings = ExportSettings::default();
        let maps = discover(&scene, &[], &settings);
        let entry = &encode_textures(&scene, &maps, &settings)[0];

        assert_eq!(entry.offset, [0.0, 0.0]);
        assert_eq!(entry.repeat, [1.0, 1.0]);
        assert_eq!(entry.name, "lm-0.png");
    }
}
