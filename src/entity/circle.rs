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

/// Authored description of a disk. `center` is Y-up, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircleSpec {
    pub center: Vec2,
    pub radius: f32,
    pub kind: BodyKind,
    pub color: Color,
    #[serde(default)]
    pub material: Option<Material>,
}

impl CircleSpec {
    pub fn new(center: Vec2, radius: f32, kind: BodyKind, color: Color) -> Self {
        Self {
            center,
            radius,
            kind,
            color,
            material: None,
        }
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Rejects the spec before anything is created in the world.
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(SimError::geometry(
                "circle",
                format!("radius must be positive, got {}", self.radius),
            ));
        }
        if !self.center.is_finite() {
            return Err(SimError::geometry("circle", "center must be finite"));
        }
        check_material("circle", self.material)
    }
}

/// Filled disk backed by a ball collider.
#[derive(Debug)]
pub struct Circle {
    body: RigidBodyHandle,
    radius: f32,
    kind: BodyKind,
    color: Color,
    screen_center: Vec2,
}

impl Circle {
    pub fn build(spec: &CircleSpec, ctx: &mut BuildContext<'_>) -> Result<Self> {
        spec.validate()?;

        let position = flip_y(spec.center);
        let body = ctx.world.create_body(
            &BodyDesc::new(spec.kind, position).with_ccd(ctx.ccd),
        );
        if let Err(err) = ctx.world.attach(
            body,
            &ColliderShape::Ball {
                radius: spec.radius,
            },
            spec.material.or_else(|| Material::for_kind(spec.kind)),
        ) {
            ctx.world.remove_body(body);
            return Err(err);
        }

        Ok(Self {
            body,
            radius: spec.radius,
            kind: spec.kind,
            color: spec.color,
            screen_center: ctx.viewport.to_screen(position),
        })
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Pixel position used by the most recent draw.
    pub fn screen_center(&self) -> Vec2 {
        self.screen_center
    }

    /// Takes the body out of the world.
    pub fn release(&self, world: &mut PhysicsWorld) {
        world.remove_body(self.body);
    }

    pub fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        if self.kind.is_dynamic() {
            if let Some(pose) = ctx.world.pose(self.body) {
                self.screen_center = ctx.viewport.to_screen(pose.position);
            }
        }
        ctx.canvas.fill_circle(
            self.screen_center,
            ctx.viewport.meters_to_pixels(self.radius),
            self.color,
        );
    }
}
