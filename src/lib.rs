//! Sandbox2D – rapier2d bodies drawn through a pluggable 2D canvas.
//!
//! The crate glues a rigid-body engine to a renderer: it builds bodies from
//! simple geometric specs, maps engine meters to screen pixels, draws every
//! entity once per frame, and paces the frame loop. Collision, integration
//! and rasterisation all stay inside the wrapped libraries.

pub mod config;
pub mod core;
pub mod entity;
pub mod error;
pub mod mapping;
pub mod overlay;
pub mod render;
pub mod scene;
pub mod simulator;
pub mod timing;
pub mod utils;
pub mod world;

pub use glam::{IVec2, UVec2, Vec2};

pub use config::SimulatorConfig;
pub use crate::core::{BodyKind, Color, Material, Pose};
pub use entity::{
    BoxEntity, BoxSpec, Circle, CircleSpec, Control, ControlSpec, ControlState, Edge, EdgeSpec,
    Entity, EntitySpec,
};
pub use error::{Result, SimError};
pub use mapping::{flip_y, to_screen, Viewport};
pub use render::{Canvas, DrawCommand, RecordingCanvas, ScreenRect, TextureId};
pub use scene::Scene;
pub use simulator::Simulator;
pub use timing::{AverageFps, FpsCounter, FrameLimiter};
pub use world::{BodyDesc, ColliderShape, PhysicsWorld, StepSettings};

#[cfg(feature = "window")]
pub use render::MacroquadCanvas;
