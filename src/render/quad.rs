use ::macroquad::{
    color::{Color as MqColor, WHITE},
    input::{is_key_pressed, is_quit_requested, KeyCode},
    math::vec2,
    shapes::{draw_circle, draw_line, draw_rectangle},
    text::draw_text,
    texture::{draw_texture_ex, DrawTextureParams, FilterMode, Texture2D},
    window::clear_background,
};
use glam::{UVec2, Vec2};
use log::{debug, warn};

use super::{Canvas, ScreenRect, TextureId};
use crate::{
    core::Color,
    error::{Result, SimError},
    utils::Arena,
};

const LINE_THICKNESS: f32 = 1.0;
const FONT_SIZE: f32 = 16.0;

fn to_mq(color: Color) -> MqColor {
    MqColor::from_rgba(color.r, color.g, color.b, color.a)
}

/// Canvas drawing into the macroquad window of the running process.
///
/// Must be created and used from inside the `#[macroquad::main]` future.
#[derive(Default)]
pub struct MacroquadCanvas {
    textures: Arena<Texture2D>,
}

impl MacroquadCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for MacroquadCanvas {
    fn name(&self) -> &str {
        "macroquad"
    }

    fn clear(&mut self, color: Color) {
        clear_background(to_mq(color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        draw_circle(center.x, center.y, radius, to_mq(color));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        draw_line(from.x, from.y, to.x, to.y, LINE_THICKNESS, to_mq(color));
    }

    fn draw_point(&mut self, at: Vec2, color: Color) {
        draw_rectangle(at.x, at.y, 1.0, 1.0, to_mq(color));
    }

    fn create_solid_texture(&mut self, size: UVec2, color: Color) -> Result<TextureId> {
        let (Ok(width), Ok(height)) = (u16::try_from(size.x), u16::try_from(size.y)) else {
            return Err(SimError::Texture(format!(
                "{}x{} exceeds the backend texture limit",
                size.x, size.y
            )));
        };
        if width == 0 || height == 0 {
            return Err(SimError::Texture(format!(
                "cannot create a {width}x{height} texture"
            )));
        }

        let pixels = color.to_array().repeat(width as usize * height as usize);
        let texture = Texture2D::from_rgba8(width, height, &pixels);
        texture.set_filter(FilterMode::Nearest);

        let id = self.textures.insert(texture);
        debug!("macroquad canvas: created {width}x{height} texture {id:?}");
        Ok(id)
    }

    fn draw_texture_rotated(&mut self, texture: TextureId, dest: ScreenRect, angle_degrees: f32) {
        let Some(image) = self.textures.get(texture) else {
            warn!("macroquad canvas: draw with released texture {texture:?}");
            return;
        };
        draw_texture_ex(
            image,
            dest.origin.x,
            dest.origin.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(dest.size.x, dest.size.y)),
                rotation: angle_degrees.to_radians(),
                ..Default::default()
            },
        );
    }

    fn release_texture(&mut self, texture: TextureId) {
        // Dropping the Texture2D frees the GPU image.
        if self.textures.remove(texture).is_none() {
            warn!("macroquad canvas: texture {texture:?} released twice");
        }
    }

    fn draw_text(&mut self, origin: Vec2, text: &str, color: Color) {
        // macroquad positions text by its baseline.
        draw_text(text, origin.x, origin.y + FONT_SIZE, FONT_SIZE, to_mq(color));
    }

    fn present(&mut self) {
        // The batch is flushed by `next_frame().await` in the driver loop.
    }

    fn quit_requested(&mut self) -> bool {
        is_quit_requested() || is_key_pressed(KeyCode::Escape)
    }
}
