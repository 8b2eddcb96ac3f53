use std::num::NonZeroUsize;

use glam::Vec2;
use rapier2d::prelude::{
    CCDSolver, ColliderBuilder, ColliderHandle, ColliderSet, DefaultBroadPhase, ImpulseJointSet,
    IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline, Point,
    QueryPipeline, Real, RigidBodyBuilder, RigidBodyHandle, RigidBodySet, RigidBodyType, Vector,
};
use serde::{Deserialize, Serialize};

use crate::{
    config::{DEFAULT_POSITION_ITERATIONS, DEFAULT_TIME_STEP, DEFAULT_VELOCITY_ITERATIONS},
    core::{BodyKind, Material, Pose},
    error::{Result, SimError},
    utils::logging::TraceSpan,
};

/// Fixed parameters of every [`PhysicsWorld::step`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepSettings {
    pub time_step: f32,
    pub velocity_iterations: usize,
    pub position_iterations: usize,
}

impl Default for StepSettings {
    fn default() -> Self {
        Self {
            time_step: DEFAULT_TIME_STEP,
            velocity_iterations: DEFAULT_VELOCITY_ITERATIONS,
            position_iterations: DEFAULT_POSITION_ITERATIONS,
        }
    }
}

/// Body creation parameters, already expressed in the engine frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub kind: BodyKind,
    pub position: Vec2,
    pub angle: f32,
    pub linear_velocity: Vec2,
    pub ccd: bool,
}

impl BodyDesc {
    pub fn new(kind: BodyKind, position: Vec2) -> Self {
        Self {
            kind,
            position,
            angle: 0.0,
            linear_velocity: Vec2::ZERO,
            ccd: false,
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_linear_velocity(mut self, velocity: Vec2) -> Self {
        self.linear_velocity = velocity;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }
}

/// Collider geometry relative to the body origin, in the engine frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Ball { radius: f32 },
    Segment { a: Vec2, b: Vec2 },
    Cuboid { half_extents: Vec2 },
}

pub(crate) fn to_vector(v: Vec2) -> Vector<Real> {
    Vector::new(v.x, v.y)
}

pub(crate) fn to_point(v: Vec2) -> Point<Real> {
    Point::new(v.x, v.y)
}

pub(crate) fn from_vector(v: &Vector<Real>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

/// Owns every rapier structure and advances them with a fixed step.
pub struct PhysicsWorld {
    gravity: Vec2,
    settings: StepSettings,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
    steps_taken: u64,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec2, settings: StepSettings) -> Self {
        let mut params = IntegrationParameters::default();
        params.dt = if settings.time_step > 0.0 {
            settings.time_step
        } else {
            DEFAULT_TIME_STEP
        };
        params.num_solver_iterations =
            NonZeroUsize::new(settings.velocity_iterations).unwrap_or(NonZeroUsize::MIN);
        params.num_internal_pgs_iterations = settings.position_iterations.max(1);

        Self {
            gravity,
            settings,
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            steps_taken: 0,
        }
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn time_step(&self) -> f32 {
        self.params.dt
    }

    pub fn settings(&self) -> &StepSettings {
        &self.settings
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    pub fn create_body(&mut self, desc: &BodyDesc) -> RigidBodyHandle {
        let body_type = match desc.kind {
            BodyKind::Static => RigidBodyType::Fixed,
            BodyKind::Dynamic => RigidBodyType::Dynamic,
        };
        let body = RigidBodyBuilder::new(body_type)
            .translation(to_vector(desc.position))
            .rotation(desc.angle)
            .linvel(to_vector(desc.linear_velocity))
            .ccd_enabled(desc.ccd && desc.kind.is_dynamic())
            .build();
        self.bodies.insert(body)
    }

    /// Attaches a fixture to `body`. `None` keeps the engine's default coefficients.
    pub fn attach(
        &mut self,
        body: RigidBodyHandle,
        shape: &ColliderShape,
        material: Option<Material>,
    ) -> Result<ColliderHandle> {
        if !self.bodies.contains(body) {
            return Err(SimError::MissingBody(body));
        }
        if let Some(material) = material {
            if !material.is_valid() {
                return Err(SimError::geometry(
                    "material",
                    format!("coefficients must be finite and non-negative, got {material:?}"),
                ));
            }
        }

        let mut builder = match *shape {
            ColliderShape::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderShape::Segment { a, b } => ColliderBuilder::segment(to_point(a), to_point(b)),
            ColliderShape::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y)
            }
        };
        if let Some(material) = material {
            builder = builder
                .density(material.density)
                .friction(material.friction)
                .restitution(material.restitution);
        }

        Ok(self
            .colliders
            .insert_with_parent(builder.build(), body, &mut self.bodies))
    }

    /// Removes `body` together with its colliders. Returns `false` for an unknown handle.
    pub fn remove_body(&mut self, body: RigidBodyHandle) -> bool {
        self.bodies
            .remove(
                body,
                &mut self.islands,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    pub fn pose(&self, body: RigidBodyHandle) -> Option<Pose> {
        self.bodies
            .get(body)
            .map(|rb| Pose::new(from_vector(rb.translation()), rb.rotation().angle()))
    }

    pub fn linear_velocity(&self, body: RigidBodyHandle) -> Option<Vec2> {
        self.bodies.get(body).map(|rb| from_vector(rb.linvel()))
    }

    /// Teleports a body, keeping its velocity.
    pub fn set_position(&mut self, body: RigidBodyHandle, position: Vec2) -> Result<()> {
        let rb = self
            .bodies
            .get_mut(body)
            .ok_or(SimError::MissingBody(body))?;
        rb.set_translation(to_vector(position), true);
        Ok(())
    }

    /// Applies `force` at `point` for exactly one step.
    ///
    /// The engine keeps persistent forces until reset, so the force is folded
    /// into an impulse of `force * dt` instead.
    pub fn apply_force_at_point(
        &mut self,
        body: RigidBodyHandle,
        force: Vec2,
        point: Vec2,
    ) -> Result<()> {
        let dt = self.params.dt;
        let rb = self
            .bodies
            .get_mut(body)
            .ok_or(SimError::MissingBody(body))?;
        rb.apply_impulse_at_point(to_vector(force * dt), to_point(point), true);
        Ok(())
    }

    /// Advances the simulation by one fixed step.
    pub fn step(&mut self) {
        let _span = TraceSpan::enter("physics::step");
        self.pipeline.step(
            &to_vector(self.gravity),
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
        self.steps_taken += 1;
    }
}
