//! Conversions between the physics frame (meters) and the screen frame (pixels).
//!
//! Authored coordinates are Y-up with the origin at the world centre. They are
//! mirrored into the engine frame exactly once, by [`flip_y`], when an entity is
//! built. Everything read back from the engine is already in that frame and
//! goes straight through [`Viewport::to_screen`] without a second flip.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Maps an engine-frame position to pixels (origin top-left, Y down).
pub fn to_screen(meters: Vec2, half_width_m: f32, half_height_m: f32, scale: f32) -> Vec2 {
    Vec2::new(
        (half_width_m + meters.x) * scale,
        (half_height_m + meters.y) * scale,
    )
}

/// Mirrors an authored Y-up vector into the engine frame.
pub fn flip_y(authored: Vec2) -> Vec2 {
    Vec2::new(authored.x, -authored.y)
}

/// Pixel dimensions of the render target and the fixed meters-to-pixels scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
}

impl Viewport {
    pub fn new(width: u32, height: u32, scale: f32) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    /// Half the viewport size, in meters.
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) / self.scale / 2.0
    }

    pub fn size_px(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn to_screen(&self, meters: Vec2) -> Vec2 {
        let half = self.half_extents();
        to_screen(meters, half.x, half.y, self.scale)
    }

    /// Inverse of [`Viewport::to_screen`].
    pub fn to_meters(&self, pixels: Vec2) -> Vec2 {
        pixels / self.scale - self.half_extents()
    }

    pub fn meters_to_pixels(&self, length: f32) -> f32 {
        length * self.scale
    }

    /// Authored-frame corners of the visible area shrunk by `inset` meters,
    /// as `(min, max)`.
    pub fn bounds(&self, inset: f32) -> (Vec2, Vec2) {
        let half = self.half_extents();
        (-half + Vec2::splat(inset), half - Vec2::splat(inset))
    }
}
