//! Geometry encoding: one document entry per deduplicated submesh.

use crate::export::convert::swizzle_zyx_rounded;
use crate::export::dedup::{ResourceMaps, SubmeshEntry};
use crate::export::document::{GeometryData, GeometryEntry};
use crate::export::ExportSettings;
use crate::scene::{LightmapAssignment, Scene};
use glam::Vec2;

/// Face record type flag: triangle with UV and normal indexing.
const FACE_TRIANGLE_UV_NORMAL: u32 = 8;

/// Encode every deduplicated submesh, in discovery order.
pub fn encode_submeshes(
    scene: &Scene,
    maps: &ResourceMaps,
    settings: &ExportSettings,
) -> Vec<GeometryEntry> {
    maps.submeshes
        .iter()
        .map(|entry| encode_submesh(scene, entry, settings.decimal_places))
        .collect()
}

fn encode_submesh(scene: &Scene, entry: &SubmeshEntry, places: u32) -> GeometryEntry {
    let mesh = scene.mesh(entry.mesh);
    let triangles = mesh.triangles(entry.index);
    let bake = scene.nodes[entry.node]
        .mesh
        .as_ref()
        .and_then(|instance| instance.lightmap);

    // The vertex range is the min/max of the referenced indices. It is not
    // guaranteed contiguous or exclusive to this submesh; vertices shared
    // with neighboring submeshes ride along.
    let range = triangles
        .iter()
        .fold(None, |acc: Option<(usize, usize)>, &i| {
            let i = i as usize;
            Some(match acc {
                Some((lo, hi)) => (lo.min(i), hi.max(i)),
                None => (i, i),
            })
        });

    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    if let Some((lo, hi)) = range {
        vertices.reserve((hi - lo + 1) * 3);
        for i in lo..=hi {
            vertices.extend(swizzle_zyx_rounded(mesh.vertices[i], places));
        }
        if !mesh.normals.is_empty() {
            normals.reserve((hi - lo + 1) * 3);
            for i in lo..=hi {
                normals.extend(swizzle_zyx_rounded(mesh.normals[i], places));
            }
        }
    }

    let uvs = encode_uv_channels(&mesh.uv, &mesh.uv2, bake, range);
    let faces = encode_faces(triangles, range, !mesh.uv.is_empty(), second_channel(mesh, bake));

    GeometryEntry {
        uuid: entry.id.clone(),
        kind: "Geometry",
        data: GeometryData {
            vertices,
            normals,
            uvs,
            faces,
        },
    }
}

/// Whether the face records carry a second UV index group: the mesh has a
/// real secondary channel, or the owning node is light-baked (in which case
/// the channel was synthesized).
fn second_channel(mesh: &crate::scene::MeshData, bake: Option<LightmapAssignment>) -> bool {
    !mesh.uv2.is_empty() || bake.is_some()
}

/// Build the two UV channel arrays for the `[lo, hi]` range.
///
/// The primary channel is emitted untouched. The secondary channel is the
/// mesh's own `uv2` or, for a light-baked node without one, a synthesized
/// copy of the primary; either way the bake's scale/offset is applied.
fn encode_uv_channels(
    uv: &[Vec2],
    uv2: &[Vec2],
    bake: Option<LightmapAssignment>,
    range: Option<(usize, usize)>,
) -> Vec<Vec<f32>> {
    let mut primary = Vec::new();
    let mut secondary = Vec::new();

    if let Some((lo, hi)) = range {
        if !uv.is_empty() {
            primary.reserve((hi - lo + 1) * 2);
            for i in lo..=hi {
                primary.push(uv[i].x);
                primary.push(uv[i].y);
            }
        }

        let source = if !uv2.is_empty() {
            uv2
        } else if bake.is_some() {
            uv
        } else {
            &[]
        };
        if !source.is_empty() {
            secondary.reserve((hi - lo + 1) * 2);
            for i in lo..=hi {
                let mut texel = source[i];
                if let Some(bake) = bake {
                    let scale = Vec2::new(bake.scale_offset.x, bake.scale_offset.y);
                    let offset = Vec2::new(bake.scale_offset.z, bake.scale_offset.w);
                    texel = texel * scale + offset;
                }
                secondary.push(texel.x);
                secondary.push(texel.y);
            }
        }
    }

    vec![primary, secondary]
}

/// Build the face records: per triangle a type flag, then the renumbered
/// indices in reverse winding, repeated once per present UV channel.
fn encode_faces(
    triangles: &[u32],
    range: Option<(usize, usize)>,
    has_uv: bool,
    has_second_channel: bool,
) -> Vec<u32> {
    let Some((lo, _)) = range else {
        return Vec::new();
    };
    let lo = lo as u32;

    let mut faces = Vec::with_capacity((triangles.len() / 3) * 10);
    for triangle in triangles.chunks_exact(3) {
        let renumbered = [
            triangle[2] - lo,
            triangle[1] - lo,
            triangle[0] - lo,
        ];
        faces.push(FACE_TRIANGLE_UV_NORMAL);
        faces.extend(renumbered);
        if has_uv {
            faces.extend(renumbered);
        }
        if has_second_channel {
            faces.extend(renumbered);
        }
    }
    faces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::dedup::discover;
    use crate::scene::{MaterialData, MeshData, MeshInstance, SceneNode};
    use crate::types::MeshRef;
    use glam::{Vec3, Vec4};

    fn scene_with_mesh(mesh: MeshData, lightmap: Option<LightmapAssignment>) -> Scene {
        let mut scene = Scene::new();
        let mesh = scene.add_mesh(mesh);
        let material = scene.add_material(MaterialData::named("m"));
        scene.nodes.push(SceneNode {
            name: "n".to_string(),
            mesh: Some(MeshInstance {
                mesh,
                materials: vec![Some(material)],
                lightmap,
            }),
            ..SceneNode::default()
        });
        scene
    }

    fn encode_first(scene: &Scene) -> GeometryEntry {
        let settings = ExportSettings::default();
        let maps = discover(scene, &[0], &settings);
        encode_submesh(scene, &maps.submeshes[0], settings.decimal_places)
    }

    #[test]
    fn test_vertex_range_from_index_extremes() {
        // Indices {2, 5, 7}: range is [2, 7], six vertices, faces
        // renumbered by subtracting 2.
        let mesh = MeshData {
            name: "m".to_string(),
            vertices: (0..8).map(|i| Vec3::splat(i as f32)).collect(),
            submeshes: vec![vec![2, 5, 7]],
            ..MeshData::default()
        };
        let entry = encode_first(&scene_with_mesh(mesh, None));
        assert_eq!(entry.data.vertices.len(), 6 * 3);
        // No UVs on the mesh: flag + one index group.
        assert_eq!(entry.data.faces, vec![8, 5, 3, 0]);
    }

    #[test]
    fn test_vertices_swizzled_and_rounded() {
        let mesh = MeshData {
            name: "m".to_string(),
            vertices: vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.125, 0.0, 0.0), Vec3::ZERO],
            normals: vec![Vec3::Z; 3],
            submeshes: vec![vec![0, 1, 2]],
            ..MeshData::default()
        };
        let mut scene = scene_with_mesh(mesh, None);
        let entry = {
            let settings = ExportSettings {
                decimal_places: 2,
                ..ExportSettings::default()
            };
            let maps = discover(&scene, &[0], &settings);
            encode_submesh(&scene, &maps.submeshes[0], settings.decimal_places)
        };
        // (1,2,3) emits as (3,2,1); 0.125 rounds half away from zero.
        assert_eq!(&entry.data.vertices[0..3], &[3.0, 2.0, 1.0]);
        assert_eq!(&entry.data.vertices[3..6], &[0.0, 0.0, 0.13]);
        // Normal (0,0,1) emits as (1,0,0).
        assert_eq!(&entry.data.normals[0..3], &[1.0, 0.0, 0.0]);
        scene.meshes[0].normals.clear();
        let entry = encode_first(&scene);
        assert!(entry.data.normals.is_empty());
    }

    #[test]
    fn test_faces_reverse_winding_with_uv_group() {
        let mesh = MeshData {
            name: "m".to_string(),
            vertices: vec![Vec3::ZERO; 3],
            uv: vec![glam::Vec2::ZERO; 3],
            submeshes: vec![vec![0, 1, 2]],
            ..MeshData::default()
        };
        let entry = encode_first(&scene_with_mesh(mesh, None));
        // Flag, winding-reversed indices, then the same group for UV1.
        assert_eq!(entry.data.faces, vec![8, 2, 1, 0, 2, 1, 0]);
    }

    #[test]
    fn test_lightmap_synthesizes_and_scales_uv2() {
        let mesh = MeshData {
            name: "m".to_string(),
            vertices: vec![Vec3::ZERO; 3],
            uv: vec![
                glam::Vec2::new(0.0, 0.0),
                glam::Vec2::new(1.0, 0.0),
                glam::Vec2::new(0.0, 1.0),
            ],
            submeshes: vec![vec![0, 1, 2]],
            ..MeshData::default()
        };
        let bake = LightmapAssignment {
            index: 0,
            scale_offset: Vec4::new(0.5, 0.5, 0.25, 0.25),
        };
        let entry = encode_first(&scene_with_mesh(mesh, Some(bake)));

        // Primary channel stays pristine.
        assert_eq!(entry.data.uvs[0], vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        // Secondary is the primary copied, then scaled and offset.
        assert_eq!(entry.data.uvs[1], vec![0.25, 0.25, 0.75, 0.25, 0.25, 0.75]);
        // Faces carry three index groups: positions, UV1, UV2.
        assert_eq!(
            entry.data.faces,
            vec![8, 2, 1, 0, 2, 1, 0, 2, 1, 0]
        );
    }

    #[test]
    fn test_existing_uv2_scaled_only_when_baked() {
        let mesh = MeshData {
            name: "m".to_string(),
            vertices: vec![Vec3::ZERO; 3],
            uv: vec![glam::Vec2::ZERO; 3],
            uv2: vec![glam::Vec2::new(0.5, 0.5); 3],
            submeshes: vec![vec![0, 1, 2]],
            ..MeshData::default()
        };
        let entry = encode_first(&scene_with_mesh(mesh.clone(), None));
        assert_eq!(entry.data.uvs[1], vec![0.5; 6]);

        let bake = LightmapAssignment {
            index: 0,
            scale_offset: Vec4::new(2.0, 2.0, 0.1, 0.1),
        };
        let entry = encode_first(&scene_with_mesh(mesh, Some(bake)));
        assert_eq!(entry.data.uvs[1], vec![1.1; 6]);
    }

    #[test]
    fn test_empty_submesh_emits_empty_arrays() {
        let mesh = MeshData {
            name: "m".to_string(),
            vertices: vec![Vec3::ZERO; 3],
            submeshes: vec![Vec::new()],
            ..MeshData::default()
        };
        let entry = encode_first(&scene_with_mesh(mesh, None));
        assert!(entry.data.vertices.is_empty());
        assert!(entry.data.faces.is_empty());
        assert_eq!(entry.data.uvs, vec![Vec::<f32>::new(), Vec::new()]);
    }

    #[test]
    fn test_two_submeshes_share_geometry_entries_by_index() {
        let mut scene = Scene::new();
        let mesh = scene.add_mesh(MeshData {
            name: "m".to_string(),
            vertices: vec![Vec3::ZERO; 4],
            submeshes: vec![vec![0, 1, 2], vec![1, 2, 3]],
            ..MeshData::default()
        });
        let material = scene.add_material(MaterialData::named("m"));
        for _ in 0..2 {
            scene.nodes.push(SceneNode {
                name: "n".to_string(),
                mesh: Some(MeshInstance {
                    mesh,
                    materials: vec![Some(material), Some(material)],
                    lightmap: None,
                }),
                ..SceneNode::default()
            });
        }
        let settings = ExportSettings::default();
        let maps = discover(&scene, &[0, 1], &settings);
        let entries = encode_submeshes(&scene, &maps, &settings);
        assert_eq!(entries.len(), 2);
        assert_eq!(maps.submesh_id(MeshRef(0), 0).unwrap(), &entries[0].uuid);
        assert_eq!(maps.submesh_id(MeshRef(0), 1).unwrap(), &entries[1].uuid);
    }
}
