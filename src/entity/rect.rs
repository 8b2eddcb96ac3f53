use glam::{UVec2, Vec2};
use rapier2d::prelude::RigidBodyHandle;
use serde::{Deserialize, Serialize};

use super::{check_material, BuildContext, DrawContext};
use crate::{
    core::{BodyKind, Color, Material},
    error::{Result, SimError},
    mapping::flip_y,
    render::{Canvas, ScreenRect, TextureId},
    world::{BodyDesc, ColliderShape, PhysicsWorld},
};

/// Authored description of an oriented rectangle.
///
/// `center` and `velocity` are Y-up; `angle` is counter-clockwise in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpec {
    pub center: Vec2,
    pub size: Vec2,
    pub angle: f32,
    pub kind: BodyKind,
    pub color: Color,
    #[serde(default)]
    pub velocity: Vec2,
    #[serde(default)]
    pub material: Option<Material>,
}

impl BoxSpec {
    pub fn new(center: Vec2, size: Vec2, angle: f32, kind: BodyKind, color: Color) -> Self {
        Self {
            center,
            size,
            angle,
            kind,
            color,
            velocity: Vec2::ZERO,
            material: None,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.size.is_finite() || self.size.x <= 0.0 || self.size.y <= 0.0 {
            return Err(SimError::geometry(
                "box",
                format!("size must be positive, got {}", self.size),
            ));
        }
        if !self.center.is_finite() || !self.angle.is_finite() || !self.velocity.is_finite() {
            return Err(SimError::geometry(
                "box",
                "center, angle and velocity must be finite",
            ));
        }
        check_material("box", self.material)
    }
}

/// Rotated filled rectangle drawn from a cached solid-colour texture.
#[derive(Debug)]
pub struct BoxEntity {
    body: RigidBodyHandle,
    kind: BodyKind,
    texture: Option<TextureId>,
    rect: ScreenRect,
    angle: f32,
}

impl BoxEntity {
    pub fn build(spec: &BoxSpec, ctx: &mut BuildContext<'_>) -> Result<Self> {
        spec.validate()?;

        let position = flip_y(spec.center);
        let angle = -spec.angle;
        let size_px = (spec.size * ctx.viewport.scale).round().max(Vec2::ONE);
        let texture = ctx
            .canvas
            .create_solid_texture(size_px.as_uvec2(), spec.color)?;

        let body = ctx.world.create_body(
            &BodyDesc::new(spec.kind, position)
                .with_angle(angle)
                .with_linear_velocity(flip_y(spec.velocity))
                .with_ccd(ctx.ccd),
        );
        let material = spec.material.or_else(|| match spec.kind {
            BodyKind::Static => None,
            BodyKind::Dynamic => Some(Material::crate_box()),
        });
        if let Err(err) = ctx.world.attach(
            body,
            &ColliderShape::Cuboid {
                half_extents: spec.size / 2.0,
            },
            material,
        ) {
            ctx.canvas.release_texture(texture);
            ctx.world.remove_body(body);
            return Err(err);
        }

        Ok(Self {
            body,
            kind: spec.kind,
            texture: Some(texture),
            rect: ScreenRect::from_center(ctx.viewport.to_screen(position), size_px),
            angle,
        })
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// Pixel footprint used by the most recent draw.
    pub fn screen_rect(&self) -> ScreenRect {
        self.rect
    }

    /// Engine-frame angle (radians) used by the most recent draw.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        let Some(texture) = self.texture else {
            return;
        };
        if self.kind.is_dynamic() {
            if let Some(pose) = ctx.world.pose(self.body) {
                self.rect = ScreenRect::from_center(
                    ctx.viewport.to_screen(pose.position),
                    self.rect.size,
                );
                self.angle = pose.angle;
            }
        }
        ctx.canvas
            .draw_texture_rotated(texture, self.rect, self.angle.to_degrees());
    }

    /// Gives the cached texture back to the canvas and the body back to the
    /// world. Safe to call twice.
    pub fn release(&mut self, canvas: &mut dyn Canvas, world: &mut PhysicsWorld) {
        if let Some(texture) = self.texture.take() {
            canvas.release_texture(texture);
            world.remove_body(self.body);
        }
    }
}
