use glam::Vec2;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{
    circle::{Circle, CircleSpec},
    edge::{Edge, EdgeSpec},
    BuildContext, DrawContext,
};
use crate::{
    config::{CONTROL_FORCE, CONTROL_PROXIMITY},
    error::{Result, SimError},
    mapping::flip_y,
    world::PhysicsWorld,
};

/// A ball, the ramp it rolls on, and the scripted nudge applied near the ramp's foot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlSpec {
    pub ball: CircleSpec,
    pub ramp: EdgeSpec,
    /// Force in the authored Y-up frame, Newton.
    pub force: Vec2,
    /// Height above the ramp's lower end under which the nudge fires.
    pub proximity: f32,
}

impl ControlSpec {
    pub fn new(ball: CircleSpec, ramp: EdgeSpec) -> Self {
        Self {
            ball,
            ramp,
            force: Vec2::from_array(CONTROL_FORCE),
            proximity: CONTROL_PROXIMITY,
        }
    }

    pub fn with_force(mut self, force: Vec2) -> Self {
        self.force = force;
        self
    }

    pub fn with_proximity(mut self, proximity: f32) -> Self {
        self.proximity = proximity;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlState {
    /// Ready to fire the next time the ball comes close.
    Armed,
    /// Already fired during the current excursion.
    Cooldown,
}

impl ControlState {
    /// Next state and whether the force has to be applied on this transition.
    pub fn advance(self, near: bool) -> (ControlState, bool) {
        match (self, near) {
            (ControlState::Armed, true) => (ControlState::Cooldown, true),
            (ControlState::Cooldown, false) => (ControlState::Armed, false),
            (state, _) => (state, false),
        }
    }
}

/// Composite entity owning its ball and ramp.
#[derive(Debug)]
pub struct Control {
    ball: Circle,
    ramp: Edge,
    force: Vec2,
    floor: f32,
    proximity: f32,
    state: ControlState,
    applications: u32,
}

impl Control {
    pub fn build(spec: &ControlSpec, ctx: &mut BuildContext<'_>) -> Result<Self> {
        if !spec.force.is_finite() {
            return Err(SimError::geometry("control", "force must be finite"));
        }
        if !spec.proximity.is_finite() || spec.proximity < 0.0 {
            return Err(SimError::geometry(
                "control",
                format!("proximity must be non-negative, got {}", spec.proximity),
            ));
        }

        spec.ball.validate()?;
        spec.ramp.validate()?;

        let ball = Circle::build(&spec.ball, ctx)?;
        let ramp = match Edge::build(&spec.ramp, ctx) {
            Ok(ramp) => ramp,
            Err(err) => {
                ball.release(ctx.world);
                return Err(err);
            }
        };

        Ok(Self {
            ball,
            ramp,
            force: flip_y(spec.force),
            floor: spec.ramp.floor(),
            proximity: spec.proximity,
            state: ControlState::Armed,
            applications: 0,
        })
    }

    pub fn ball(&self) -> &Circle {
        &self.ball
    }

    pub fn ramp(&self) -> &Edge {
        &self.ramp
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    /// How many times the nudge has fired so far.
    pub fn applications(&self) -> u32 {
        self.applications
    }

    /// Removes the ramp, then the ball.
    pub fn release(&self, world: &mut PhysicsWorld) {
        self.ramp.release(world);
        self.ball.release(world);
    }

    pub fn draw(&mut self, ctx: &mut DrawContext<'_>) {
        if let Some(pose) = ctx.world.pose(self.ball.body()) {
            // Engine Y points down; undo it to compare with the authored ramp.
            let height = -pose.position.y - self.floor;
            let (next, fire) = self.state.advance(height < self.proximity);
            if fire {
                match ctx
                    .world
                    .apply_force_at_point(self.ball.body(), self.force, pose.position)
                {
                    Ok(()) => {
                        self.applications += 1;
                        debug!(
                            "control: nudged ball at height {height:.3} m (#{})",
                            self.applications
                        );
                    }
                    Err(err) => warn!("control: {err}"),
                }
            }
            self.state = next;
        }
        self.ball.draw(ctx);
        self.ramp.draw(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_excursion() {
        let mut state = ControlState::Armed;
        let mut fired = 0;
        for near in [false, true, true, true, false, false, true, true] {
            let (next, fire) = state.advance(near);
            fired += fire as u32;
            state = next;
        }
        assert_eq!(fired, 2);
        assert_eq!(state, ControlState::Cooldown);
    }

    #[test]
    fn cooldown_rearms_when_clear() {
        assert_eq!(
            ControlState::Cooldown.advance(false),
            (ControlState::Armed, false)
        );
        assert_eq!(
            ControlState::Armed.advance(false),
            (ControlState::Armed, false)
        );
    }
}
