//! The input scene data model.
//!
//! A [`Scene`] is a read-only snapshot of a host scene graph: a flat node
//! list plus arenas of shared resources (meshes, materials, textures)
//! referenced by index handles. The exporter never mutates a scene; it walks
//! the snapshot once per pass.
//!
//! All types derive `serde` so snapshots can be loaded from JSON (used by
//! the CLI and tests).

mod material;
mod mesh;
mod node;
mod texture;

pub use material::{MaterialData, TextureAssignment, TextureSlot};
pub use mesh::MeshData;
pub use node::{
    BakeMode, CameraData, ColliderData, LightData, LightKind, LightmapAssignment, MeshInstance,
    SceneNode, ScriptData, ScriptField,
};
pub use texture::{FilterMode, TextureData, WrapMode};

use crate::error::{ExportError, Result};
use crate::types::{Color, MaterialRef, MeshRef, TextureRef};
use serde::{Deserialize, Serialize};

/// A scene snapshot: nodes plus resource arenas.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Scene nodes in export order.
    #[serde(default)]
    pub nodes: Vec<SceneNode>,
    /// Mesh arena.
    #[serde(default)]
    pub meshes: Vec<MeshData>,
    /// Material arena.
    #[serde(default)]
    pub materials: Vec<MaterialData>,
    /// Texture arena.
    #[serde(default)]
    pub textures: Vec<TextureData>,
    /// Baked lightmap textures, indexed by the nodes' bake indices.
    #[serde(default)]
    pub lightmaps: Vec<TextureRef>,
    /// Scene-wide ambient light color.
    #[serde(default)]
    pub ambient_color: Color,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh to the arena and return its handle.
    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshRef {
        self.meshes.push(mesh);
        MeshRef(self.meshes.len() - 1)
    }

    /// Add a material to the arena and return its handle.
    pub fn add_material(&mut self, material: MaterialData) -> MaterialRef {
        self.materials.push(material);
        MaterialRef(self.materials.len() - 1)
    }

    /// Add a texture to the arena and return its handle.
    pub fn add_texture(&mut self, texture: TextureData) -> TextureRef {
        self.textures.push(texture);
        TextureRef(self.textures.len() - 1)
    }

    pub fn mesh(&self, handle: MeshRef) -> &MeshData {
        &self.meshes[handle.0]
    }

    pub fn material(&self, handle: MaterialRef) -> &MaterialData {
        &self.materials[handle.0]
    }

    pub fn texture(&self, handle: TextureRef) -> &TextureData {
        &self.textures[handle.0]
    }

    /// Check that every handle in the snapshot points inside its arena.
    ///
    /// Called before an export pass begins; a bad handle is a precondition
    /// failure, not a skippable data issue.
    pub fn validate(&self) -> Result<()> {
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(instance) = &node.mesh {
                if instance.mesh.0 >= self.meshes.len() {
                    return Err(invalid(format!(
                        "node {} ({:?}) references mesh {} but the arena holds {}",
                        i,
                        node.name,
                        instance.mesh.0,
                        self.meshes.len()
                    )));
                }
                for slot in instance.materials.iter().flatten() {
                    if slot.0 >= self.materials.len() {
                        return Err(invalid(format!(
                            "node {} ({:?}) references material {} but the arena holds {}",
                            i,
                            node.name,
                            slot.0,
                            self.materials.len()
                        )));
                    }
                }
            }
        }
        for (i, material) in self.materials.iter().enumerate() {
            for slot in TextureSlot::ALL {
                if let Some(assignment) = material.texture_slot(slot) {
                    if assignment.texture.0 >= self.textures.len() {
                        return Err(invalid(format!(
                            "material {} ({:?}) references texture {} but the arena holds {}",
                            i,
                            material.name,
                            assignment.texture.0,
                            self.textures.len()
                        )));
                    }
                }
            }
        }
        for lightmap in &self.lightmaps {
            if lightmap.0 >= self.textures.len() {
                return Err(invalid(format!(
                    "lightmap references texture {} but the arena holds {}",
                    lightmap.0,
                    self.textures.len()
                )));
            }
        }
        Ok(())
    }
}

fn invalid(msg: String) -> ExportError {
    ExportError::InvalidScene(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_empty_scene() {
        assert!(Scene::new().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_mesh_handle() {
        let mut scene = Scene::new();
        scene.nodes.push(SceneNode {
            name: "broken".to_string(),
            mesh: Some(MeshInstance {
                mesh: MeshRef(7),
                materials: Vec::new(),
                lightmap: None,
            }),
            ..SceneNode::default()
        });
        assert!(matches!(
            scene.validate(),
            Err(ExportError::InvalidScene(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_texture_handle() {
        let mut scene = Scene::new();
        let mut material = MaterialData::named("m");
        material.diffuse_map = Some(TextureAssignment::new(TextureRef(3)));
        scene.add_material(material);
        assert!(matches!(
            scene.validate(),
            Err(ExportError::InvalidScene(_))
        ));
    }

    #[test]
    fn test_scene_json_round_trip() {
        let mut scene = Scene::new();
        let mesh = scene.add_mesh(MeshData {
            name: "quad".to_string(),
            vertices: vec![glam::Vec3::ZERO, glam::Vec3::X, glam::Vec3::Y],
            submeshes: vec![vec![0, 1, 2]],
            ..MeshData::default()
        });
        let material = scene.add_material(MaterialData::named("mat"));
        scene.nodes.push(SceneNode {
            name: "quad".to_string(),
            mesh: Some(MeshInstance {
                mesh,
                materials: vec![Some(material)],
                lightmap: None,
            }),
            ..SceneNode::default()
        });

        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back.nodes.len(), 1);
        assert_eq!(back.meshes[0].submeshes[0], vec![0, 1, 2]);
        assert!(back.nodes[0].active);
    }
}
