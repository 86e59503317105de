//! Material encoding: one document entry per deduplicated material.

use crate::export::dedup::ResourceMaps;
use crate::export::document::MaterialEntry;
use crate::export::ids::ExportId;
use crate::scene::{Scene, TextureSlot};
use crate::types::MaterialRef;

/// Encode every deduplicated material, in discovery order.
pub fn encode_materials(
    scene: &Scene,
    nodes: &[usize],
    maps: &ResourceMaps,
) -> Vec<MaterialEntry> {
    maps.materials
        .iter()
        .map(|(id, material)| encode_material(scene, nodes, maps, id, *material))
        .collect()
}

fn encode_material(
    scene: &Scene,
    nodes: &[usize],
    maps: &ResourceMaps,
    id: &ExportId,
    material: MaterialRef,
) -> MaterialEntry {
    let data = scene.material(material);

    let slot_reference = |slot: TextureSlot| {
        data.texture_slot(slot)
            .and_then(|assignment| maps.binding_for(assignment.texture, slot))
            .map(|binding| binding.id.clone())
    };

    // Shader-name heuristics for the transparency flags.
    let additive = data.shader.contains("Additive");
    let transparent = data.render_mode.map_or(false, |mode| mode != 0.0)
        || data.shader.contains("Transparent")
        || additive;

    MaterialEntry {
        uuid: id.clone(),
        name: data.name.clone(),
        kind: "MeshPhongMaterial",
        color: data.color.map(|c| format!("0x{}", c.to_hex())),
        specular: data.specular.map(|c| format!("0x{}", c.to_hex())),
        emissive: data.emissive.map(|c| format!("0x{}", c.to_hex())),
        shininess: data.shininess,
        opacity: data.color.map(|c| c.a),
        map: slot_reference(TextureSlot::Diffuse),
        normal_map: slot_reference(TextureSlot::Normal),
        ao_map: slot_reference(TextureSlot::Occlusion),
        light_map: resolve_light_map(scene, nodes, maps, material),
        blending: additive.then_some(2),
        transparent,
        wireframe: false,
    }
}

/// Find the lightmap binding for a material.
///
/// Bake assignments are per node while the output field is per material, so
/// this is lossy by design: the first filtered node using the material with
/// an in-range bake index wins.
fn resolve_light_map(
    scene: &Scene,
    nodes: &[usize],
    maps: &ResourceMaps,
    material: MaterialRef,
) -> Option<ExportId> {
    nodes.iter().find_map(|&node_index| {
        let node = &scene.nodes[node_index];
        let instance = node.mesh.as_ref()?;
        if !instance.materials.contains(&Some(material)) {
            return None;
        }
        let bake = instance.lightmap?;
        let Some(&lightmap) = scene.lightmaps.get(bake.index) else {
            log::warn!(
                "node {:?} has bake index {} but only {} lightmaps exist",
                node.name,
                bake.index,
                scene.lightmaps.len()
            );
            return None;
        };
        maps.lightmap_binding(lightmap).map(|b| b.id.clone())
    })
}
