//! Texture asset descriptions.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// UV wrap mode of a texture asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    #[default]
    Repeat,
    Clamp,
}

/// Sampling filter mode of a texture asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    Point,
    #[default]
    Bilinear,
    Trilinear,
}

impl FilterMode {
    pub fn is_point(self) -> bool {
        matches!(self, FilterMode::Point)
    }
}

/// A texture asset: where its pixels live on disk plus sampling state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextureData {
    #[serde(default)]
    pub name: String,
    /// Source image file path.
    pub path: String,
    #[serde(default)]
    pub wrap: WrapMode,
    #[serde(default)]
    pub filter: FilterMode,
}

impl TextureData {
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = Path::new(&path)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            path,
            wrap: WrapMode::default(),
            filter: FilterMode::default(),
        }
    }

    /// The source file's extension, lower-cased.
    pub fn extension(&self) -> String {
        Path::new(&self.path)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// The source file name with its extension normalized for export:
    /// `.png` and `.jpg` pass through, everything else becomes `.png`.
    pub fn export_file_name(&self) -> String {
        let path = Path::new(&self.path);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        match self.extension().as_str() {
            "png" => format!("{}.png", stem),
            "jpg" => format!("{}.jpg", stem),
            _ => format!("{}.png", stem),
        }
    }
}
