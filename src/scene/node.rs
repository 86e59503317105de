//! Scene nodes and their attached components.

use crate::types::{Color, MaterialRef, MeshRef};
use glam::{Mat4, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// One transform in the scene, with optional attachments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    /// Local-to-world transform, column-major.
    #[serde(default = "identity")]
    pub matrix: Mat4,
    /// Inactive nodes are skipped unless the pass includes them.
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub mesh: Option<MeshInstance>,
    #[serde(default)]
    pub camera: Option<CameraData>,
    #[serde(default)]
    pub light: Option<LightData>,
    #[serde(default)]
    pub collider: Option<ColliderData>,
    #[serde(default)]
    pub script: Option<ScriptData>,
}

impl Default for SceneNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            matrix: Mat4::IDENTITY,
            active: true,
            mesh: None,
            camera: None,
            light: None,
            collider: None,
            script: None,
        }
    }
}

fn identity() -> Mat4 {
    Mat4::IDENTITY
}

fn default_true() -> bool {
    true
}

/// A mesh attachment: which mesh, which materials per slot, and an optional
/// light-bake assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshInstance {
    pub mesh: MeshRef,
    /// One entry per material slot; `None` marks a missing material, which
    /// is skipped with a warning during export.
    #[serde(default)]
    pub materials: Vec<Option<MaterialRef>>,
    #[serde(default)]
    pub lightmap: Option<LightmapAssignment>,
}

/// Per-node baked lighting assignment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LightmapAssignment {
    /// Index into the scene's lightmap texture list.
    pub index: usize,
    /// UV2 transform packed as (scale.x, scale.y, offset.x, offset.y).
    #[serde(default = "default_scale_offset")]
    pub scale_offset: Vec4,
}

fn default_scale_offset() -> Vec4 {
    Vec4::new(1.0, 1.0, 0.0, 0.0)
}

/// Perspective camera attachment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraData {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// Kind of an attached light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    Directional,
    Point,
    Spot,
    /// Not representable in the output format; skipped with a warning.
    Area,
}

/// How a light participates in baked lighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BakeMode {
    #[default]
    Realtime,
    Mixed,
    /// Contributes only to lightmaps; suppressed in the export.
    Baked,
}

/// Light attachment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LightData {
    pub kind: LightKind,
    pub color: Color,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
    /// Spot light range; unused for other kinds.
    #[serde(default)]
    pub range: f32,
    /// Spot cone angle in degrees; unused for other kinds.
    #[serde(default)]
    pub spot_angle: f32,
    #[serde(default)]
    pub bake: BakeMode,
}

fn default_intensity() -> f32 {
    1.0
}

/// Collider attachment, one of the supported shapes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ColliderData {
    Box { center: Vec3, size: Vec3 },
    Sphere { center: Vec3, radius: f32 },
    Capsule { center: Vec3, radius: f32, height: f32 },
    Mesh,
}

/// Caller-declared script metadata attached to a node.
///
/// The exporter does no introspection; whatever key/value pairs the caller
/// lists here are serialized into the node's `userData`, in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptData {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<ScriptField>,
}

/// One exported script field. The value is kept as text; the document
/// encoder decides whether it serializes as a number, boolean, or string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptField {
    pub name: String,
    pub value: String,
}

impl ScriptField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
