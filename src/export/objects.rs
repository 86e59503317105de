//! Object hierarchy encoding.
//!
//! Walks the filtered node list in order, emitting one document node per
//! scene node plus synthetic siblings for cameras and lights. Colliders,
//! mesh instances, and script metadata become children of their node.

use crate::export::convert::{matrix_elements, swizzle_zyx, to_export_space};
use crate::export::dedup::ResourceMaps;
use crate::export::document::{ColliderInfo, DocumentNode, ObjectRoot, ScriptInfo};
use crate::export::ids::ExportId;
use crate::export::ExportSettings;
use crate::scene::{BakeMode, ColliderData, LightKind, Scene, SceneNode, ScriptData};
use glam::Mat4;
use serde_json::{Map, Value};

/// Build the root object and its children for the filtered node list.
pub fn encode_object_tree(
    scene: &Scene,
    nodes: &[usize],
    maps: &ResourceMaps,
    settings: &ExportSettings,
) -> ObjectRoot {
    let places = settings.decimal_places;
    let mut children = Vec::new();

    if settings.export_ambient_light {
        children.push(DocumentNode::AmbientLight {
            uuid: ExportId::fresh(),
            kind: "AmbientLight",
            color: format!("#{}", scene.ambient_color.to_hex()),
            name: "SceneAmbientLight",
        });
    }

    for &node_index in nodes {
        let node = &scene.nodes[node_index];
        let matrix = || matrix_elements(to_export_space(node.matrix), places);

        if settings.export_cameras {
            if let Some(camera) = &node.camera {
                children.push(DocumentNode::Camera {
                    uuid: ExportId::fresh(),
                    kind: "PerspectiveCamera",
                    name: node.name.clone(),
                    fov: camera.fov.to_string(),
                    aspect: camera.aspect.to_string(),
                    near: camera.near.to_string(),
                    far: camera.far.to_string(),
                    matrix: matrix(),
                });
            }
        }

        if settings.export_lights {
            if let Some(light_node) = encode_light(node, matrix()) {
                children.push(light_node);
            }
        }

        children.push(encode_node(scene, node, maps, settings, matrix()));
    }

    ObjectRoot {
        uuid: ExportId::fresh(),
        kind: "Object3D",
        name: "World",
        matrix: matrix_elements(Mat4::IDENTITY, places),
        children,
    }
}

/// Encode a node's light attachment, if it should appear at all: lights
/// baked into lightmaps contribute nothing at runtime and are suppressed.
fn encode_light(node: &SceneNode, matrix: Vec<f64>) -> Option<DocumentNode> {
    let light = node.light.as_ref()?;
    if light.bake == BakeMode::Baked {
        return None;
    }
    let kind = match light.kind {
        LightKind::Directional => "DirectionalLight",
        LightKind::Point => "PointLight",
        LightKind::Spot => "SpotLight",
        LightKind::Area => {
            log::warn!("node {:?} has an area light, which cannot be exported", node.name);
            return None;
        }
    };
    let is_spot = light.kind == LightKind::Spot;
    Some(DocumentNode::Light {
        uuid: ExportId::fresh(),
        kind,
        distance: is_spot.then_some(light.range),
        angle: is_spot.then_some(light.spot_angle),
        color: format!("#{}", light.color.to_hex()),
        name: node.name.clone(),
        intensity: light.intensity,
        matrix,
    })
}

/// Encode the node's own entry with its collider/mesh/script children.
fn encode_node(
    scene: &Scene,
    node: &SceneNode,
    maps: &ResourceMaps,
    settings: &ExportSettings,
    matrix: Vec<f64>,
) -> DocumentNode {
    let mut children = Vec::new();

    if settings.export_colliders {
        if let Some(collider) = &node.collider {
            children.push(DocumentNode::Collider {
                uuid: ExportId::fresh(),
                name: format!("{}_Collider", node.name),
                kind: "Object3D",
                user_data: collider_info(collider),
            });
        }
    }

    if let Some(instance) = &node.mesh {
        for index in 0..scene.mesh(instance.mesh).submesh_count() {
            let geometry = maps.submesh_id(instance.mesh, index);
            let material = instance
                .materials
                .get(index)
                .copied()
                .flatten()
                .and_then(|m| maps.material_id(m));
            // Only submeshes with both references resolved become
            // instances; the rest were already warned about upstream.
            if let (Some(geometry), Some(material)) = (geometry, material) {
                children.push(DocumentNode::MeshInstance {
                    uuid: ExportId::fresh(),
                    kind: "Mesh",
                    name: format!("{}_SubMesh {}", node.name, index),
                    geometry: geometry.clone(),
                    material: material.clone(),
                    userdata: Map::new(),
                });
            }
        }
    }

    if settings.export_scripts {
        if let Some(script) = &node.script {
            children.push(DocumentNode::Script {
                uuid: ExportId::fresh(),
                kind: "Object3D",
                name: format!("{}_Script", node.name),
                user_data: script_info(script),
            });
        }
    }

    DocumentNode::Object {
        uuid: ExportId::fresh(),
        kind: "Object3D",
        name: node.name.clone(),
        children,
        matrix,
    }
}

/// Collider shape fields, centers and sizes in `(z, y, x)` order.
fn collider_info(collider: &ColliderData) -> ColliderInfo {
    match *collider {
        ColliderData::Box { center, size } => ColliderInfo {
            kind: "BoxCollider",
            center: Some(swizzle_zyx(center)),
            size: Some(swizzle_zyx(size)),
            radius: None,
            height: None,
        },
        ColliderData::Sphere { center, radius } => ColliderInfo {
            kind: "SphereCollider",
            center: Some(swizzle_zyx(center)),
            size: None,
            radius: Some(radius),
            height: None,
        },
        ColliderData::Capsule {
            center,
            radius,
            height,
        } => ColliderInfo {
            kind: "CapsuleCollider",
            center: Some(swizzle_zyx(center)),
            size: None,
            radius: Some(radius),
            height: Some(height),
        },
        ColliderData::Mesh => ColliderInfo {
            kind: "MeshCollider",
            center: None,
            size: None,
            radius: None,
            height: None,
        },
    }
}

/// Script metadata: caller-declared fields in order, values emitted as bare
/// literals when they read as numbers or booleans.
fn script_info(script: &ScriptData) -> ScriptInfo {
    let mut fields = Map::new();
    for field in &script.fields {
        fields.insert(field.name.clone(), field_value(&field.value));
    }
    ScriptInfo {
        fields,
        kind: "Script",
    }
}

fn field_value(raw: &str) -> Value {
    if raw == "True" || raw == "False" {
        return Value::Bool(raw == "True");
    }
    if let Ok(integer) = raw.parse::<i64>() {
        return Value::from(integer);
    }
    if let Ok(number) = raw.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(number) {
            return Value::Number(number);
        }
    }
    Value::String(raw.to_string())
}
