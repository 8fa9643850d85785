//! Layout and visual types

use serde::{Deserialize, Serialize};

/// Available drawing area, in the host's length units
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Negative or NaN dimensions collapse to zero
    pub fn sanitized(width: f32, height: f32) -> Self {
        Self {
            width: if width > 0.0 { width } else { 0.0 },
            height: if height > 0.0 { height } else { 0.0 },
        }
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x <= self.width
    }
}

/// RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Parse `0xAARRGGBB`
    pub fn from_argb(argb: u32) -> Self {
        Self {
            r: ((argb >> 16) & 0xFF) as f32 / 255.0,
            g: ((argb >> 8) & 0xFF) as f32 / 255.0,
            b: (argb & 0xFF) as f32 / 255.0,
            a: ((argb >> 24) & 0xFF) as f32 / 255.0,
        }
    }

    /// Autumn leaf palette, indexed by a leaf's color `AssetId`
    pub fn autumn_palette() -> [Color; 7] {
        [
            Color::from_argb(0xFFFE8318),
            Color::from_argb(0xFFF3D220),
            Color::from_argb(0xFFFFC651),
            Color::from_argb(0xFFCE6C59),
            Color::from_argb(0xFFCE422A),
            Color::from_argb(0xFFC35C17),
            Color::from_argb(0xFFA04427),
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
