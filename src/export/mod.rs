//! The export pass.
//!
//! One call to [`export_scene`] runs the whole pipeline on a scene
//! snapshot: validate, filter nodes, discover distinct resources, encode
//! each section, assemble the document, serialize. All pass state lives in
//! values created here; nothing survives the call, and concurrent passes
//! over different scenes are independent.

pub mod convert;
pub mod dedup;
pub mod document;
pub mod geometry;
pub mod ids;
pub mod material;
pub mod objects;
pub mod textures;

use crate::error::{ExportError, Result};
use crate::scene::Scene;
use document::{Document, Metadata};

/// Which revision of the consuming format to target. Older consumers want
/// string constant names for sampler enums, newer ones numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Revision {
    R71,
    #[default]
    R72Plus,
}

/// Per-pass configuration. Construct one per export; there is no shared
/// exporter state between passes.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Decimal places for rounded matrix/vertex components.
    pub decimal_places: u32,
    /// Target format revision.
    pub revision: Revision,
    pub export_cameras: bool,
    pub export_colliders: bool,
    /// Gates texture file copying; the document's image/texture sections
    /// are always populated from discovery.
    pub export_textures: bool,
    pub export_lightmaps: bool,
    pub export_lights: bool,
    pub export_ambient_light: bool,
    pub export_scripts: bool,
    /// Include nodes whose active flag is off.
    pub include_inactive: bool,
    /// Brightness constant applied when decoding RGBM lightmaps to PNG.
    pub lightmap_contrast: f32,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            decimal_places: 4,
            revision: Revision::default(),
            export_cameras: true,
            export_colliders: true,
            export_textures: true,
            export_lightmaps: true,
            export_lights: true,
            export_ambient_light: true,
            export_scripts: true,
            include_inactive: false,
            lightmap_contrast: 5.0,
        }
    }
}

/// Indices of the nodes a pass will export, in scene order.
pub(crate) fn filtered_nodes(scene: &Scene, settings: &ExportSettings) -> Vec<usize> {
    scene
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.active || settings.include_inactive)
        .map(|(index, _)| index)
        .collect()
}

/// Run a full pass, returning the document text and the resource maps
/// (the maps are reused by texture copying).
pub(crate) fn run_pass(
    scene: &Scene,
    settings: &ExportSettings,
) -> Result<(String, dedup::ResourceMaps)> {
    scene.validate()?;
    let nodes = filtered_nodes(scene, settings);
    if nodes.is_empty() {
        return Err(ExportError::EmptySelection);
    }

    let maps = dedup::discover(scene, &nodes, settings);
    let document = Document {
        metadata: Metadata::default(),
        geometries: geometry::encode_submeshes(scene, &maps, settings),
        materials: material::encode_materials(scene, &nodes, &maps),
        object: objects::encode_object_tree(scene, &nodes, &maps, settings),
        images: textures::encode_images(&maps),
        textures: textures::encode_textures(scene, &maps, settings),
    };
    let json = document.to_json_string()?;
    Ok((json, maps))
}

/// Serialize a scene snapshot to document text.
pub fn export_scene(scene: &Scene, settings: &ExportSettings) -> Result<String> {
    run_pass(scene, settings).map(|(json, _)| json)
}
