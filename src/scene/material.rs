//! Material definitions and texture slot assignments.

use crate::types::{Color, TextureRef};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The texture slots the exporter recognizes on a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Diffuse,
    Normal,
    Occlusion,
}

impl TextureSlot {
    /// Slot scan order. This is the tie-break order for texture
    /// deduplication, so it must stay fixed.
    pub const ALL: [TextureSlot; 3] = [
        TextureSlot::Diffuse,
        TextureSlot::Normal,
        TextureSlot::Occlusion,
    ];

    /// The document field a binding in this slot is referenced from.
    pub fn field(self) -> &'static str {
        match self {
            TextureSlot::Diffuse => "map",
            TextureSlot::Normal => "normalMap",
            TextureSlot::Occlusion => "aoMap",
        }
    }

    /// Suffix appended to the owning material's id to form the binding id.
    pub fn suffix(self) -> &'static str {
        match self {
            TextureSlot::Diffuse => "_map",
            TextureSlot::Normal => "_normal",
            TextureSlot::Occlusion => "_occlusion",
        }
    }
}

/// A texture bound to one of a material's slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureAssignment {
    pub texture: TextureRef,
    /// UV offset for this slot.
    #[serde(default = "Vec2::default")]
    pub offset: Vec2,
    /// UV tiling for this slot.
    #[serde(default = "default_repeat")]
    pub repeat: Vec2,
}

fn default_repeat() -> Vec2 {
    Vec2::ONE
}

impl TextureAssignment {
    pub fn new(texture: TextureRef) -> Self {
        Self {
            texture,
            offset: Vec2::ZERO,
            repeat: Vec2::ONE,
        }
    }
}

/// A shading definition shared between nodes.
///
/// Optional fields model the host API's "has this property" checks: `None`
/// means the property does not exist on the source material, and the
/// corresponding document field is omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterialData {
    #[serde(default)]
    pub name: String,
    /// Shader name; drives the transparency/blending heuristics.
    #[serde(default)]
    pub shader: String,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub specular: Option<Color>,
    #[serde(default)]
    pub emissive: Option<Color>,
    #[serde(default)]
    pub shininess: Option<f32>,
    /// Explicit render-mode override; any non-zero value forces the
    /// transparent flag.
    #[serde(default)]
    pub render_mode: Option<f32>,
    #[serde(default)]
    pub diffuse_map: Option<TextureAssignment>,
    #[serde(default)]
    pub normal_map: Option<TextureAssignment>,
    #[serde(default)]
    pub occlusion_map: Option<TextureAssignment>,
}

impl MaterialData {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up the assignment in a recognized slot.
    pub fn texture_slot(&self, slot: TextureSlot) -> Option<&TextureAssignment> {
        match slot {
            TextureSlot::Diffuse => self.diffuse_map.as_ref(),
            TextureSlot::Normal => self.normal_map.as_ref(),
            TextureSlot::Occlusion => self.occlusion_map.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_slot_lookup() {
        let mut material = MaterialData::named("m");
        material.normal_map = Some(TextureAssignment::new(TextureRef(0)));
        assert!(material.texture_slot(TextureSlot::Normal).is_some());
        assert!(material.texture_slot(TextureSlot::Diffuse).is_none());
    }

    #[test]
    fn test_slot_fields() {
        assert_eq!(TextureSlot::Diffuse.field(), "map");
        assert_eq!(TextureSlot::Normal.field(), "normalMap");
        assert_eq!(TextureSlot::Occlusion.field(), "aoMap");
    }
}
