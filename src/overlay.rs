//! Heads-up drawing shared by the demo loops: the FPS label and a dotted guide line.

use glam::{IVec2, Vec2};

use crate::{core::Color, render::Canvas};

/// Pixels drawn, then skipped, along a dotted line.
const DASH: u32 = 10;

/// Bresenham rasterisation of `from..=to`, keeping alternating runs of ten pixels.
pub fn dotted_line(from: IVec2, to: IVec2) -> Vec<IVec2> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };

    let mut points = Vec::new();
    let mut p = from;
    let mut err = dx + dy;
    let mut count = 0;
    loop {
        if count < DASH {
            points.push(p);
        }
        if p == to {
            break;
        }
        let e2 = 2 * err;
        if e2 > dy {
            err += dy;
            p.x += sx;
        }
        if e2 < dx {
            err += dx;
            p.y += sy;
        }
        count = (count + 1) % (2 * DASH);
    }
    points
}

pub fn draw_dotted_line(canvas: &mut dyn Canvas, from: IVec2, to: IVec2, color: Color) {
    for p in dotted_line(from, to) {
        canvas.draw_point(p.as_vec2(), color);
    }
}

/// Draws `fps : N` at the top-left corner.
pub fn draw_fps(canvas: &mut dyn Canvas, fps: u32) {
    canvas.draw_text(Vec2::ZERO, &format!("fps : {fps}"), Color::WHITE);
}
