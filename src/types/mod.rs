//! Shared types used throughout the library.
//!
//! Scene resources (meshes, materials, textures) live in arenas on
//! [`Scene`](crate::scene::Scene) and are referenced by index handles.
//! Handle equality is identity equality: two nodes holding the same handle
//! share the same resource, which is what export-time deduplication keys on.

use serde::{Deserialize, Serialize};

/// Handle to a mesh in the scene's mesh arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshRef(pub usize);

/// Handle to a material in the scene's material arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialRef(pub usize);

/// Handle to a texture in the scene's texture arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureRef(pub usize);

/// An RGBA color with linear float channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "default_alpha")]
    pub a: f32,
}

fn default_alpha() -> f32 {
    1.0
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Render as an `RRGGBB` hex string, channels quantized to 8 bits.
    pub fn to_hex(&self) -> String {
        format!(
            "{:02X}{:02X}{:02X}",
            channel_byte(self.r),
            channel_byte(self.g),
            channel_byte(self.b)
        )
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

fn channel_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
