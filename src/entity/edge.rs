use glam::Vec2;
use rapier2d::prelude::RigidBodyHandle;
use serde::{Deserialize, Serialize};

use super::{check_material, BuildContext, DrawContext};
use crate::{
    core::{BodyKind, Color, Material},
    error::{Result, SimError},
    mapping::flip_y,
    world::{BodyDesc, ColliderShape, PhysicsWorld},
};

/// Authored description of a line segment. Endpoints are Y-up, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub start: Vec2,
    pub end: Vec2,
    pub kind: BodyKind,
    pub color: Color,
    #[serde(default)]
    pub material: Option<Material>,
}

impl EdgeSpec {
    pub fn new(start: Vec2, end: Vec2, kind: BodyKind, color: Color) -> Self {
        Self {
            start,
            end,
            kind,
            color,
            material: None,
        }
    }

    /// Lowest authored Y of the two endpoints.
    pub fn floor(&self) -> f32 {
        self.start.y.min(self.end.y)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(SimError::geometry("edge", "endpoints must be finite"));
        }
        if self.start == self.end {
            return Err(SimError::geometry(
                "edge",
                format!("endpoints coincide at {}", self.start),
            ));
        }
        check_material("edge", self.material)
    }
}

/// Line segment backed by a segment collider on a body sitting at the origin.
///
/// The body keeps a zero position so the endpoints can live in the shape
/// itself; a dynamic edge adds the body's translation back on every draw.
#[derive(Debug)]
pub struct Edge {
    body: RigidBodyHandle,
    vertices: [Vec2; 2],
    kind: BodyKind,
    color: Color,
    screen: [Vec2; 2],
}

impl Edge {
    pub fn build(spec: &EdgeSpec, ctx: &mut BuildContext<'_>) -> Result<Self> {
        spec.validate()?;

        let vertices = [flip_y(spec.start), flip_y(spec.end)];
        let body = ctx.world.create_body(
            &BodyDesc::new(spec.kind, Vec2::ZERO).with_ccd(ctx.ccd),
        );
        if let Err(err) = ctx.world.attach(
            body,
            &ColliderShape::Segment {
                a: vertices[0],
                b: vertices[1],
            },
            spec.material.or_else(|| Material::for_kind(spec.kind)),
        ) {
            ctx.world.remove_body(body);
            return Err(err);
        }

        Ok(Self {
            body,
            vertices,
            kind: spec.kind,
            color: spec.color,
            screen: vertices.map(|v| ctx.viewport.to_screen(v)),
        })
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Pixel endpoints used by the most recent draw.
    pub fn screen_endpoints(&self) -> [Vec2; 2] {
        self.screen
    }

    pub fn release(&self, world: &mut PhysicsWorld) {
        world.remove_body(self.body);
    }

    pub fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        if self.kind.is_dynamic() {
            if let Some(pose) = ctx.world.pose(self.body) {
                self.screen = self
                    .vertices
                    .map(|v| ctx.viewport.to_screen(v + pose.position));
            }
        }
        ctx.canvas
            .draw_line(self.screen[0], self.screen[1], self.color);
    }
}
