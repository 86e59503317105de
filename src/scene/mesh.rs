//! Mesh geometry data.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Vertex and index data for a shared mesh.
///
/// A mesh is split into submeshes, one triangle index list per material
/// slot. All index lists address the same vertex/normal/UV arrays.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshData {
    #[serde(default)]
    pub name: String,
    /// Vertex positions.
    pub vertices: Vec<Vec3>,
    /// Vertex normals; empty when the mesh carries none.
    #[serde(default)]
    pub normals: Vec<Vec3>,
    /// Primary UV channel; empty when the mesh carries none.
    #[serde(default)]
    pub uv: Vec<Vec2>,
    /// Secondary (lightmap) UV channel; empty when the mesh carries none.
    #[serde(default)]
    pub uv2: Vec<Vec2>,
    /// Triangle index lists, one per submesh. Lengths are multiples of 3.
    #[serde(default)]
    pub submeshes: Vec<Vec<u32>>,
}

impl MeshData {
    /// Number of submeshes (material slots) on this mesh.
    pub fn submesh_count(&self) -> usize {
        self.submeshes.len()
    }

    /// The triangle index list for one submesh.
    pub fn triangles(&self, submesh: usize) -> &[u32] {
        &self.submeshes[submesh]
    }
}
