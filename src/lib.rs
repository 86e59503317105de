//! # Three Scene Export
//!
//! A Rust library for exporting 3D scene snapshots to the Three.js Object
//! Scene Format (JSON) plus associated texture files.
//!
//! ## Overview
//!
//! The input is a [`Scene`]: a flat list of nodes (transforms with optional
//! mesh/camera/light/collider/script attachments) and arenas of shared
//! meshes, materials, and textures. One export pass deduplicates the shared
//! resources, converts every transform and vertex into the target
//! coordinate convention, and emits a single JSON document whose sections
//! reference each other by freshly issued identifiers.
//!
//! ## Quick Start
//!
//! ```ignore
//! use three_scene_export::{export_to_directory, ExportSettings, Scene};
//!
//! // Build or load a scene snapshot
//! let scene: Scene = serde_json::from_str(&snapshot_json)?;
//!
//! // Export with default settings
//! let settings = ExportSettings::default();
//! let path = export_to_directory(&scene, &settings, "out/level1", "scene.json")?;
//! println!("wrote {}", path.display());
//! ```
//!
//! To get the document text without touching the file system, use
//! [`export_scene`].
//!
//! Each pass operates on an immutable snapshot and keeps all of its state
//! in per-call values; run concurrent passes only on independent scenes.

pub mod error;
pub mod export;
pub mod scene;
pub mod texture_copy;
pub mod types;

// Re-export main types for convenience
pub use error::{ExportError, Result};
pub use export::{export_scene, ExportSettings, Revision};
pub use scene::{
    BakeMode, CameraData, ColliderData, FilterMode, LightData, LightKind, LightmapAssignment,
    MaterialData, MeshData, MeshInstance, Scene, SceneNode, ScriptData, ScriptField,
    TextureAssignment, TextureData, WrapMode,
};
pub use types::{Color, MaterialRef, MeshRef, TextureRef};

use std::fs;
use std::path::{Path, PathBuf};

/// Run a full export: create the target directory, write the document, and
/// copy the referenced textures (when enabled).
///
/// Returns the path of the written document. An uncreatable directory or an
/// empty node selection fails before any encoding begins.
pub fn export_to_directory(
    scene: &Scene,
    settings: &ExportSettings,
    target_dir: impl AsRef<Path>,
    json_filename: &str,
) -> Result<PathBuf> {
    let target_dir = target_dir.as_ref();
    fs::create_dir_all(target_dir)?;

    let (json, maps) = export::run_pass(scene, settings)?;
    let document_path = target_dir.join(json_filename);
    fs::write(&document_path, json)?;

    if settings.export_textures {
        texture_copy::copy_textures(scene, &maps, settings, target_dir)?;
    }

    Ok(document_path)
}
