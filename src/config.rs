//! Configuration constants and the simulator configuration value.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{
    core::Color,
    error::{Result, SimError},
    mapping::Viewport,
    world::StepSettings,
};

/// Pixels per meter.
pub const DEFAULT_SCALE: f32 = 80.0;

/// Viewport width in pixels.
pub const DEFAULT_WIDTH: u32 = 1024;

/// Viewport height in pixels.
pub const DEFAULT_HEIGHT: u32 = 512;

/// Gravity in the engine frame. Positive Y points down the screen.
pub const DEFAULT_GRAVITY: [f32; 2] = [0.0, 9.81];

/// Default integration timestep (in seconds).
pub const DEFAULT_TIME_STEP: f32 = 1.0 / 60.0;

/// Solver iterations per step.
pub const DEFAULT_VELOCITY_ITERATIONS: usize = 10;

/// Stabilization iterations per step.
pub const DEFAULT_POSITION_ITERATIONS: usize = 10;

/// Colour the frame buffer is cleared to before entities are drawn.
pub const DEFAULT_BACKGROUND: Color = Color::GRAY;

/// Distance (meters) between the boundary edges and the viewport border.
pub const BOUNDARY_INSET: f32 = 0.15;

/// Title of the demo windows.
pub const WINDOW_TITLE: &str = "Physics Simulator";

/// Frame rate targeted by the ramp demo.
pub const RAMP_TARGET_FPS: u32 = 60;

/// Frame rate targeted by the stress demo.
pub const STRESS_TARGET_FPS: u32 = 30;

/// Number of free circles in the stress scene.
pub const STRESS_CIRCLE_COUNT: usize = 1000;

/// Stress circles spawn uniformly in `[-extent, extent]` on both axes.
pub const STRESS_SPAWN_EXTENT: f32 = 3.5;

/// Radius (meters) of a stress circle.
pub const STRESS_CIRCLE_RADIUS: f32 = 0.10;

/// Height (meters) above the ramp's lower end under which the control fires.
pub const CONTROL_PROXIMITY: f32 = 0.2;

/// Force (Newton, authored Y-up frame) applied once per control excursion.
pub const CONTROL_FORCE: [f32; 2] = [-20.0, -20.0];

/// Pixel inset of the ramp demo's dotted guide line.
pub const GUIDE_INSET: i32 = 15;

/// Everything the world container needs to know up front.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub scale: f32,
    pub width: u32,
    pub height: u32,
    pub gravity: Vec2,
    pub time_step: f32,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
    pub background: Color,
    /// Enables continuous collision detection on dynamic bodies.
    pub ccd: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            gravity: Vec2::from_array(DEFAULT_GRAVITY),
            time_step: DEFAULT_TIME_STEP,
            velocity_iterations: DEFAULT_VELOCITY_ITERATIONS,
            position_iterations: DEFAULT_POSITION_ITERATIONS,
            background: DEFAULT_BACKGROUND,
            ccd: true,
        }
    }
}

impl SimulatorConfig {
    pub fn with_viewport(mut self, width: u32, height: u32, scale: f32) -> Self {
        self.width = width;
        self.height = height;
        self.scale = scale;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec2) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    /// Steps the physics world once per frame at `fps`.
    pub fn with_target_fps(self, fps: u32) -> Self {
        self.with_time_step(1.0 / fps.max(1) as f32)
    }

    pub fn with_iterations(mut self, velocity: usize, position: usize) -> Self {
        self.velocity_iterations = velocity;
        self.position_iterations = position;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height, self.scale)
    }

    pub fn step_settings(&self) -> StepSettings {
        StepSettings {
            time_step: self.time_step,
            velocity_iterations: self.velocity_iterations,
            position_iterations: self.position_iterations,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        if self.width == 0 || self.height == 0 {
            return Err(SimError::InvalidConfig(format!(
                "viewport must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !self.time_step.is_finite() || self.time_step <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "time step must be positive, got {}",
                self.time_step
            )));
        }
        if self.velocity_iterations == 0 || self.position_iterations == 0 {
            return Err(SimError::InvalidConfig(
                "iteration counts must be at least 1".to_string(),
            ));
        }
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulatorConfig::default();
        config.validate().expect("defaults validate");
        assert_eq!(config.viewport().width, DEFAULT_WIDTH);
        assert_eq!(config.step_settings().velocity_iterations, 10);
    }

    #[test]
    fn target_fps_sets_time_step() {
        let config = SimulatorConfig::default().with_target_fps(30);
        assert!((config.time_step - 1.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let bad = [
            SimulatorConfig::default().with_viewport(0, 512, 80.0),
            SimulatorConfig::default().with_viewport(1024, 512, 0.0),
            SimulatorConfig::default().with_time_step(-1.0),
            SimulatorConfig::default().with_iterations(0, 10),
            SimulatorConfig::default().with_gravity(Vec2::new(f32::NAN, 0.0)),
        ];
        for config in bad {
            assert!(matches!(
                config.validate(),
                Err(SimError::InvalidConfig(_))
            ));
        }
    }
}
