//! Rendering backend boundary.
//!
//! Entities only ever talk to a [`Canvas`]. The window demos use
//! [`MacroquadCanvas`]; tests and benches use the headless [`RecordingCanvas`].

pub mod headless;
#[cfg(feature = "window")]
pub mod quad;

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::{core::Color, error::Result, utils::Handle};

pub use headless::{DrawCommand, RecordingCanvas};
#[cfg(feature = "window")]
pub use quad::MacroquadCanvas;

/// Cached image owned by the canvas and referenced by entities.
pub type TextureId = Handle;

/// Axis-aligned pixel rectangle, origin at its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl ScreenRect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size / 2.0
    }
}

/// Trait implemented by the 2D backends the simulator can draw into.
pub trait Canvas {
    fn name(&self) -> &str;

    /// Fills the whole frame buffer.
    fn clear(&mut self, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color);

    fn draw_point(&mut self, at: Vec2, color: Color);

    /// Creates an off-screen image of `size` pixels filled with `color`.
    fn create_solid_texture(&mut self, size: UVec2, color: Color) -> Result<TextureId>;

    /// Copies `texture` into `dest`, rotated clockwise by `angle_degrees` about its centre.
    fn draw_texture_rotated(&mut self, texture: TextureId, dest: ScreenRect, angle_degrees: f32);

    fn release_texture(&mut self, texture: TextureId);

    fn draw_text(&mut self, origin: Vec2, text: &str, color: Color);

    /// Shows the finished frame.
    fn present(&mut self);

    /// Whether the user asked to close the window (close button or Escape).
    fn quit_requested(&mut self) -> bool {
        false
    }
}
