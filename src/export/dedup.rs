//! Resource discovery and deduplication.
//!
//! A single pass over the filtered node list discovers every distinct
//! material, submesh, texture binding, and image the export will emit.
//! Identity is handle identity, never value equality: two materials with
//! identical fields stay distinct, two nodes holding the same handle
//! collapse. Discovery order is node order, then slot-array order, then
//! recognized-texture-slot order — first discovery wins an identifier.

use crate::export::ids::ExportId;
use crate::export::ExportSettings;
use crate::scene::{MaterialData, Scene, TextureSlot};
use crate::types::{MaterialRef, MeshRef, TextureRef};
use std::collections::HashSet;

/// A deduplicated (mesh, submesh-index) pair.
#[derive(Debug)]
pub struct SubmeshEntry {
    pub id: ExportId,
    pub mesh: MeshRef,
    pub index: usize,
    /// Scene index of the first node discovered using this submesh; its
    /// light-bake assignment drives UV synthesis in the geometry encoder.
    pub node: usize,
}

/// What a texture binding hangs off: a scene material, or a pass-owned
/// placeholder created to carry a lightmap.
#[derive(Debug, Clone, Copy)]
pub enum BindingCarrier {
    Material(MaterialRef),
    Placeholder(usize),
}

/// A deduplicated (texture, slot) binding.
#[derive(Debug)]
pub struct TextureBinding {
    pub id: ExportId,
    pub texture: TextureRef,
    pub slot: TextureSlot,
    pub carrier: BindingCarrier,
}

impl TextureBinding {
    pub fn is_lightmap(&self) -> bool {
        matches!(self.carrier, BindingCarrier::Placeholder(_))
    }
}

/// A deduplicated image file, one per distinct texture object.
#[derive(Debug)]
pub struct ImageEntry {
    pub id: ExportId,
    pub texture: TextureRef,
    pub filename: String,
}

/// The id→entity maps built by the discovery pass. Owned by one export
/// pass; placeholder materials are torn down with the value.
#[derive(Debug, Default)]
pub struct ResourceMaps {
    pub materials: Vec<(ExportId, MaterialRef)>,
    pub submeshes: Vec<SubmeshEntry>,
    pub bindings: Vec<TextureBinding>,
    pub images: Vec<ImageEntry>,
    /// Synthetic unlit carriers for lightmap bindings.
    pub placeholder_materials: Vec<MaterialData>,
}

impl ResourceMaps {
    pub fn material_id(&self, material: MaterialRef) -> Option<&ExportId> {
        self.materials
            .iter()
            .find(|(_, m)| *m == material)
            .map(|(id, _)| id)
    }

    pub fn submesh_id(&self, mesh: MeshRef, index: usize) -> Option<&ExportId> {
        self.submeshes
            .iter()
            .find(|s| s.mesh == mesh && s.index == index)
            .map(|s| &s.id)
    }

    /// The binding a material slot reference resolves to. Keyed on
    /// (texture, slot) identity so materials sharing a texture all point
    /// at the first-discovered binding.
    pub fn binding_for(&self, texture: TextureRef, slot: TextureSlot) -> Option<&TextureBinding> {
        self.bindings
            .iter()
            .find(|b| !b.is_lightmap() && b.texture == texture && b.slot == slot)
    }

    /// The lightmap binding carrying a given lightmap texture.
    pub fn lightmap_binding(&self, texture: TextureRef) -> Option<&TextureBinding> {
        self.bindings
            .iter()
            .find(|b| b.is_lightmap() && b.texture == texture)
    }

    pub fn image_for(&self, texture: TextureRef) -> Option<&ImageEntry> {
        self.images.iter().find(|i| i.texture == texture)
    }

    /// Whether a texture entered the maps through a lightmap binding.
    pub fn is_lightmap_texture(&self, texture: TextureRef) -> bool {
        self.lightmap_binding(texture).is_some()
    }

    /// Resolve a binding's carrier to material data.
    pub fn carrier_material<'a>(
        &'a self,
        scene: &'a Scene,
        binding: &TextureBinding,
    ) -> &'a MaterialData {
        match binding.carrier {
            BindingCarrier::Material(m) => scene.material(m),
            BindingCarrier::Placeholder(i) => &self.placeholder_materials[i],
        }
    }
}

/// Run the discovery pass over `nodes` (indices into `scene.nodes`).
pub fn discover(scene: &Scene, nodes: &[usize], settings: &ExportSettings) -> ResourceMaps {
    let mut maps = ResourceMaps::default();
    let mut seen_materials: HashSet<MaterialRef> = HashSet::new();
    let mut seen_submeshes: HashSet<(MeshRef, usize)> = HashSet::new();
    let mut seen_bindings: HashSet<(TextureRef, TextureSlot)> = HashSet::new();
    let mut seen_images: HashSet<TextureRef> = HashSet::new();

    for &node_index in nodes {
        let node = &scene.nodes[node_index];
        let Some(instance) = &node.mesh else {
            continue;
        };
        if instance.materials.is_empty() {
            log::warn!("node {:?} has a mesh but no materials, skipping", node.name);
            continue;
        }

        // Distinct materials, slot-array order.
        for (slot_index, slot) in instance.materials.iter().enumerate() {
            let Some(material) = *slot else {
                log::warn!(
                    "node {:?} has a missing material in slot {}",
                    node.name,
                    slot_index
                );
                continue;
            };
            if seen_materials.insert(material) {
                maps.materials.push((ExportId::fresh(), material));
            }
        }

        // Distinct (mesh, submesh-index) pairs.
        for index in 0..scene.mesh(instance.mesh).submesh_count() {
            if seen_submeshes.insert((instance.mesh, index)) {
                maps.submeshes.push(SubmeshEntry {
                    id: ExportId::fresh(),
                    mesh: instance.mesh,
                    index,
                    node: node_index,
                });
            }
        }

        // Distinct (texture, slot) bindings and distinct images, walking
        // this node's material slots in order.
        for material in instance.materials.iter().flatten() {
            let material_data = scene.material(*material);
            for slot in TextureSlot::ALL {
                let Some(assignment) = material_data.texture_slot(slot) else {
                    continue;
                };
                if !seen_bindings.insert((assignment.texture, slot)) {
                    continue;
                }
                let material_id = maps
                    .material_id(*material)
                    .expect("binding owner was discovered above")
                    .clone();
                maps.bindings.push(TextureBinding {
                    id: material_id.with_suffix(slot.suffix()),
                    texture: assignment.texture,
                    slot,
                    carrier: BindingCarrier::Material(*material),
                });
                if seen_images.insert(assignment.texture) {
                    let texture = scene.texture(assignment.texture);
                    maps.images.push(ImageEntry {
                        id: ExportId::fresh(),
                        texture: assignment.texture,
                        filename: format!(
                            "{}_{}",
                            sanitize_file_name(&material_data.name),
                            texture.export_file_name()
                        ),
                    });
                }
            }
        }
    }

    // Lightmap textures ride along on synthetic unlit carriers.
    if settings.export_lightmaps {
        for &lightmap in &scene.lightmaps {
            if maps.lightmap_binding(lightmap).is_some() {
                continue;
            }
            let carrier = MaterialData {
                name: format!("{}_carrier", scene.texture(lightmap).name),
                shader: "Unlit".to_string(),
                ..MaterialData::default()
            };
            maps.placeholder_materials.push(carrier);
            maps.bindings.push(TextureBinding {
                id: ExportId::fresh(),
                texture: lightmap,
                slot: TextureSlot::Diffuse,
                carrier: BindingCarrier::Placeholder(maps.placeholder_materials.len() - 1),
            });
            if seen_images.insert(lightmap) {
                let texture = scene.texture(lightmap);
                let stem = std::path::Path::new(&texture.path)
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                maps.images.push(ImageEntry {
                    id: ExportId::fresh(),
                    texture: lightmap,
                    filename: format!("{}.png", stem),
                });
            }
        }
    }

    maps
}

/// Strip characters that are invalid in file names on common hosts.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|&c| {
            !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') && !c.is_control()
        })
        .collect()
}
