use glam::{UVec2, Vec2};
use log::{debug, warn};

use super::{Canvas, ScreenRect, TextureId};
use crate::{
    core::Color,
    error::{Result, SimError},
    utils::Arena,
};

/// One primitive issued to a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Point {
        at: Vec2,
        color: Color,
    },
    Texture {
        texture: TextureId,
        dest: ScreenRect,
        angle_degrees: f32,
    },
    Text {
        origin: Vec2,
        text: String,
        color: Color,
    },
}

#[derive(Debug, Clone, Copy)]
struct SolidTexture {
    size: UVec2,
    color: Color,
}

/// Backend that keeps all work in memory, so scenes run without a display.
///
/// Commands accumulate until [`Canvas::present`], which moves them into
/// [`RecordingCanvas::last_frame`].
#[derive(Default)]
pub struct RecordingCanvas {
    current: Vec<DrawCommand>,
    last_frame: Vec<DrawCommand>,
    frames_presented: u64,
    textures: Arena<SolidTexture>,
    textures_created: usize,
    released: Vec<TextureId>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands issued since the last present.
    pub fn current(&self) -> &[DrawCommand] {
        &self.current
    }

    pub fn last_frame(&self) -> &[DrawCommand] {
        &self.last_frame
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub fn textures_created(&self) -> usize {
        self.textures_created
    }

    /// Textures given back so far, in release order.
    pub fn released(&self) -> &[TextureId] {
        &self.released
    }

    pub fn texture_size(&self, texture: TextureId) -> Option<UVec2> {
        self.textures.get(texture).map(|t| t.size)
    }

    pub fn texture_color(&self, texture: TextureId) -> Option<Color> {
        self.textures.get(texture).map(|t| t.color)
    }

    /// Circles of the last presented frame, in draw order.
    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32)> + '_ {
        self.last_frame.iter().filter_map(|cmd| match cmd {
            DrawCommand::FillCircle { center, radius, .. } => Some((*center, *radius)),
            _ => None,
        })
    }

    /// Line segments of the last presented frame, in draw order.
    pub fn lines(&self) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
        self.last_frame.iter().filter_map(|cmd| match cmd {
            DrawCommand::Line { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn name(&self) -> &str {
        "recording"
    }

    fn clear(&mut self, color: Color) {
        self.current.clear();
        self.current.push(DrawCommand::Clear(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.current.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.current.push(DrawCommand::Line { from, to, color });
    }

    fn draw_point(&mut self, at: Vec2, color: Color) {
        self.current.push(DrawCommand::Point { at, color });
    }

    fn create_solid_texture(&mut self, size: UVec2, color: Color) -> Result<TextureId> {
        if size.x == 0 || size.y == 0 {
            return Err(SimError::Texture(format!(
                "cannot create a {}x{} texture",
                size.x, size.y
            )));
        }
        self.textures_created += 1;
        let id = self.textures.insert(SolidTexture { size, color });
        debug!("recording canvas: created {}x{} texture {id:?}", size.x, size.y);
        Ok(id)
    }

    fn draw_texture_rotated(&mut self, texture: TextureId, dest: ScreenRect, angle_degrees: f32) {
        if !self.textures.contains(texture) {
            warn!("recording canvas: draw with released texture {texture:?}");
            return;
        }
        self.current.push(DrawCommand::Texture {
            texture,
            dest,
            angle_degrees,
        });
    }

    fn release_texture(&mut self, texture: TextureId) {
        if self.textures.remove(texture).is_none() {
            warn!("recording canvas: texture {texture:?} released twice");
            return;
        }
        self.released.push(texture);
    }

    fn draw_text(&mut self, origin: Vec2, text: &str, color: Color) {
        self.current.push(DrawCommand::Text {
            origin,
            text: text.to_string(),
            color,
        });
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.current);
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_moves_commands_into_last_frame() {
        let mut canvas = RecordingCanvas::new();
        canvas.clear(Color::GRAY);
        canvas.fill_circle(Vec2::new(1.0, 2.0), 3.0, Color::BLUE);
        assert_eq!(canvas.current().len(), 2);

        canvas.present();
        assert!(canvas.current().is_empty());
        assert_eq!(canvas.last_frame()[0], DrawCommand::Clear(Color::GRAY));
        assert_eq!(canvas.circles().next(), Some((Vec2::new(1.0, 2.0), 3.0)));
        assert_eq!(canvas.frames_presented(), 1);
    }

    #[test]
    fn textures_are_tracked_until_released() {
        let mut canvas = RecordingCanvas::new();
        let id = canvas
            .create_solid_texture(UVec2::new(8, 4), Color::WHITE)
            .expect("texture");
        assert_eq!(canvas.live_textures(), 1);
        assert_eq!(canvas.texture_size(id), Some(UVec2::new(8, 4)));

        canvas.release_texture(id);
        assert_eq!(canvas.live_textures(), 0);
        assert_eq!(canvas.textures_created(), 1);
        assert_eq!(canvas.released(), &[id]);

        canvas.draw_texture_rotated(id, ScreenRect::default(), 0.0);
        assert!(canvas.current().is_empty());
    }

    #[test]
    fn empty_texture_is_an_error() {
        let mut canvas = RecordingCanvas::new();
        let err = canvas
            .create_solid_texture(UVec2::new(0, 4), Color::WHITE)
            .unwrap_err();
        assert!(matches!(err, SimError::Texture(_)));
    }
}
