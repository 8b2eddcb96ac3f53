//! Drawable entities, each pairing a shape with a body in the physics world.
//!
//! [`Entity`] is a closed sum over the four variants. Construction flips the
//! authored Y axis once and caches the screen coordinates; `draw` refreshes
//! them from the engine for dynamic bodies only.

pub mod circle;
pub mod control;
pub mod edge;
pub mod rect;

use serde::{Deserialize, Serialize};

use crate::{
    core::{BodyKind, Material},
    error::{Result, SimError},
    mapping::Viewport,
    render::Canvas,
    world::PhysicsWorld,
};

pub use circle::{Circle, CircleSpec};
pub use control::{Control, ControlSpec, ControlState};
pub use edge::{Edge, EdgeSpec};
pub use rect::{BoxEntity, BoxSpec};

/// What an entity needs while it is being built.
pub struct BuildContext<'a> {
    pub world: &'a mut PhysicsWorld,
    pub viewport: &'a Viewport,
    pub canvas: &'a mut dyn Canvas,
    /// Whether dynamic bodies get continuous collision detection.
    pub ccd: bool,
}

/// What an entity needs to draw one frame.
pub struct DrawContext<'a> {
    pub world: &'a mut PhysicsWorld,
    pub viewport: &'a Viewport,
    pub canvas: &'a mut dyn Canvas,
}

/// Fails when a requested material override has unusable coefficients.
fn check_material(entity: &'static str, material: Option<Material>) -> Result<()> {
    match material {
        Some(material) if !material.is_valid() => Err(SimError::geometry(
            entity,
            format!("material must be finite and non-negative, got {material:?}"),
        )),
        _ => Ok(()),
    }
}

/// Serializable description of one entity of a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntitySpec {
    Circle(CircleSpec),
    Edge(EdgeSpec),
    Box(BoxSpec),
    Control(ControlSpec),
}

impl From<CircleSpec> for EntitySpec {
    fn from(spec: CircleSpec) -> Self {
        Self::Circle(spec)
    }
}

impl From<EdgeSpec> for EntitySpec {
    fn from(spec: EdgeSpec) -> Self {
        Self::Edge(spec)
    }
}

impl From<BoxSpec> for EntitySpec {
    fn from(spec: BoxSpec) -> Self {
        Self::Box(spec)
    }
}

impl From<ControlSpec> for EntitySpec {
    fn from(spec: ControlSpec) -> Self {
        Self::Control(spec)
    }
}

#[derive(Debug)]
pub enum Entity {
    Circle(Circle),
    Edge(Edge),
    Box(BoxEntity),
    Control(Control),
}

impl Entity {
    pub fn build(spec: &EntitySpec, ctx: &mut BuildContext<'_>) -> Result<Self> {
        Ok(match spec {
            EntitySpec::Circle(spec) => Entity::Circle(Circle::build(spec, ctx)?),
            EntitySpec::Edge(spec) => Entity::Edge(Edge::build(spec, ctx)?),
            EntitySpec::Box(spec) => Entity::Box(BoxEntity::build(spec, ctx)?),
            EntitySpec::Control(spec) => Entity::Control(Control::build(spec, ctx)?),
        })
    }

    /// Issues this entity's primitives for the current frame.
    pub fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        match self {
            Entity::Circle(circle) => circle.draw(ctx),
            Entity::Edge(edge) => edge.draw(ctx),
            Entity::Box(rect) => rect.draw(ctx),
            Entity::Control(control) => control.draw(ctx),
        }
    }

    /// Frees the entity's bodies and any rendering resources it cached.
    pub fn release(&mut self, canvas: &mut dyn Canvas, world: &mut PhysicsWorld) {
        match self {
            Entity::Circle(circle) => circle.release(world),
            Entity::Edge(edge) => edge.release(world),
            Entity::Box(rect) => rect.release(canvas, world),
            Entity::Control(control) => control.release(world),
        }
    }

    /// Body kind of the entity; a control reports its ball.
    pub fn kind(&self) -> BodyKind {
        match self {
            Entity::Circle(circle) => circle.kind(),
            Entity::Edge(edge) => edge.kind(),
            Entity::Box(rect) => rect.kind(),
            Entity::Control(control) => control.ball().kind(),
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Entity::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            Entity::Edge(edge) => Some(edge),
            _ => None,
        }
    }

    pub fn as_box(&self) -> Option<&BoxEntity> {
        match self {
            Entity::Box(rect) => Some(rect),
            _ => None,
        }
    }

    pub fn as_control(&self) -> Option<&Control> {
        match self {
            Entity::Control(control) => Some(control),
            _ => None,
        }
    }
}
