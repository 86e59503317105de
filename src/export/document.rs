//! The typed output document tree.
//!
//! The exporter builds this tree in memory, then serializes it in one pass
//! with `serde_json`. Struct field declaration order is the wire field
//! order, and the serializer owns separator placement, so no section can
//! ever emit a trailing comma.
//!
//! Field names, casing quirks included (`userdata` on mesh instances,
//! `userData` elsewhere), are the consuming format's fixed schema.

use crate::export::ids::ExportId;
use serde::Serialize;
use serde_json::{Map, Value};

/// The complete export document. Section order is fixed by the consumer:
/// geometries and materials must precede the object hierarchy that
/// references them, and images must precede textures.
#[derive(Debug, Serialize)]
pub struct Document {
    pub metadata: Metadata,
    pub geometries: Vec<GeometryEntry>,
    pub materials: Vec<MaterialEntry>,
    pub object: ObjectRoot,
    pub images: Vec<ImageEntry>,
    pub textures: Vec<TextureEntry>,
}

impl Document {
    /// Serialize the tree to pretty-printed JSON text.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Static format tags identifying the document revision and producer.
#[derive(Debug, Serialize)]
pub struct Metadata {
    pub version: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub generator: &'static str,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            version: "4.3",
            kind: "Object",
            generator: "three-scene-export",
        }
    }
}

/// One geometry section entry, produced per deduplicated submesh.
#[derive(Debug, Serialize)]
pub struct GeometryEntry {
    pub uuid: ExportId,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: GeometryData,
}

/// Flat geometry arrays for one submesh's vertex range.
#[derive(Debug, Serialize)]
pub struct GeometryData {
    /// Rounded `(z, y, x)` position components.
    pub vertices: Vec<f64>,
    /// Rounded `(z, y, x)` normal components; empty when the mesh has none.
    pub normals: Vec<f64>,
    /// Exactly two channel arrays (primary, lightmap), raw and unrounded.
    pub uvs: Vec<Vec<f32>>,
    /// Triangle records: type flag, then 1–3 groups of renumbered indices.
    pub faces: Vec<u32>,
}

/// One material section entry, produced per deduplicated material.
#[derive(Debug, Serialize)]
pub struct MaterialEntry {
    pub uuid: ExportId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specular: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emissive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shininess: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<ExportId>,
    #[serde(rename = "normalMap", skip_serializing_if = "Option::is_none")]
    pub normal_map: Option<ExportId>,
    #[serde(rename = "aoMap", skip_serializing_if = "Option::is_none")]
    pub ao_map: Option<ExportId>,
    #[serde(rename = "lightMap", skip_serializing_if = "Option::is_none")]
    pub light_map: Option<ExportId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blending: Option<u8>,
    pub transparent: bool,
    pub wireframe: bool,
}

/// The root of the object hierarchy.
#[derive(Debug, Serialize)]
pub struct ObjectRoot {
    pub uuid: ExportId,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub name: &'static str,
    pub matrix: Vec<f64>,
    pub children: Vec<DocumentNode>,
}

/// A node in the object hierarchy.
///
/// Untagged: each variant serializes as a plain object whose field order
/// matches the consumer's expectation for that node kind.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DocumentNode {
    AmbientLight {
        uuid: ExportId,
        #[serde(rename = "type")]
        kind: &'static str,
        color: String,
        name: &'static str,
    },
    Camera {
        uuid: ExportId,
        #[serde(rename = "type")]
        kind: &'static str,
        name: String,
        fov: String,
        aspect: String,
        near: String,
        far: String,
        matrix: Vec<f64>,
    },
    Light {
        uuid: ExportId,
        #[serde(rename = "type")]
        kind: &'static str,
        #[serde(skip_serializing_if = "Option::is_none")]
        distance: Option<f32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        angle: Option<f32>,
        color: String,
        name: String,
        intensity: f32,
        matrix: Vec<f64>,
    },
    Object {
        uuid: ExportId,
        #[serde(rename = "type")]
        kind: &'static str,
        name: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        children: Vec<DocumentNode>,
        matrix: Vec<f64>,
    },
    MeshInstance {
        uuid: ExportId,
        #[serde(rename = "type")]
        kind: &'static str,
        name: String,
        geometry: ExportId,
        material: ExportId,
        userdata: Map<String, Value>,
    },
    Collider {
        uuid: ExportId,
        name: String,
        #[serde(rename = "type")]
        kind: &'static str,
        #[serde(rename = "userData")]
        user_data: ColliderInfo,
    },
    Script {
        uuid: ExportId,
        #[serde(rename = "type")]
        kind: &'static str,
        name: String,
        #[serde(rename = "userData")]
        user_data: ScriptInfo,
    },
}

/// Shape description carried in a collider node's `userData`.
#[derive(Debug, Serialize)]
pub struct ColliderInfo {
    #[serde(rename = "type")]
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

/// Script metadata carried in a script node's `userData`: the caller's
/// fields in declaration order, then the fixed `type` tag.
#[derive(Debug, Serialize)]
pub struct ScriptInfo {
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

/// One image section entry per distinct texture object.
#[derive(Debug, Serialize)]
pub struct ImageEntry {
    pub url: String,
    pub uuid: ExportId,
    pub name: String,
    #[serde(rename = "originalUrl")]
    pub original_url: String,
}

/// One texture section entry per deduplicated texture binding.
#[derive(Debug, Serialize)]
pub struct TextureEntry {
    pub uuid: ExportId,
    pub offset: [f32; 2],
    pub repeat: [f32; 2],
    #[serde(rename = "magFilter")]
    pub mag_filter: EnumCode,
    #[serde(rename = "minFilter")]
    pub min_filter: EnumCode,
    pub wrap: [EnumCode; 2],
    pub image: ExportId,
    pub name: String,
    pub anisotropy: u32,
}

/// Revision-dependent enum encoding: older consumers expect string
/// constant names, newer ones numeric codes.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(untagged)]
pub enum EnumCode {
    Name(&'static str),
    Code(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_entry_omits_absent_fields() {
        let entry = MaterialEntry {
            uuid: ExportId::fresh(),
            name: "bare".to_string(),
            kind: "MeshPhongMaterial",
            color: None,
            specular: None,
            emissive: None,
            shininess: None,
            opacity: None,
            map: None,
            normal_map: None,
            ao_map: None,
            light_map: None,
            blending: None,
            transparent: false,
            wireframe: false,
        };
        let json = serde_json::to_value(&entry).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("color"));
        assert!(!object.contains_key("lightMap"));
        assert!(object.contains_key("transparent"));
    }

    #[test]
    fn test_script_info_field_order() {
        let mut fields = Map::new();
        fields.insert("speed".to_string(), Value::from(2.5));
        fields.insert("enabled".to_string(), Value::Bool(true));
        let info = ScriptInfo {
            fields,
            kind: "Script",
        };
        let json = serde_json::to_string(&info).unwrap();
        // Caller fields first, fixed tag last.
        assert_eq!(json, r#"{"speed":2.5,"enabled":true,"type":"Script"}"#);
    }

    #[test]
    fn test_enum_code_encodings() {
        assert_eq!(
            serde_json::to_string(&EnumCode::Name("RepeatWrapping")).unwrap(),
            "\"RepeatWrapping\""
        );
        assert_eq!(serde_json::to_string(&EnumCode::Code(1000)).unwrap(), "1000");
    }

    #[test]
    fn test_object_node_omits_empty_children() {
        let node = DocumentNode::Object {
            uuid: ExportId::fresh(),
            kind: "Object3D",
            name: "empty".to_string(),
            children: Vec::new(),
            matrix: vec![0.0; 16],
        };
        let json = serde_json::to_value(&node).unwrap();
        assert!(!json.as_object().unwrap().contains_key("children"));
    }
}
