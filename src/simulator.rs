use log::info;

use crate::{
    config::SimulatorConfig,
    entity::{BuildContext, DrawContext, Entity, EntitySpec},
    error::Result,
    mapping::Viewport,
    render::Canvas,
    scene::Scene,
    utils::profiling::{FrameProfile, PhaseTimer},
    world::PhysicsWorld,
};

/// World container: the physics world, the canvas, and the entities drawn into it.
///
/// Entities are kept in insertion order, which is also draw order. Teardown
/// releases them back to front before the world and canvas go away.
pub struct Simulator<C: Canvas> {
    config: SimulatorConfig,
    viewport: Viewport,
    world: PhysicsWorld,
    canvas: C,
    entities: Vec<Entity>,
    profile: FrameProfile,
}

impl<C: Canvas> Simulator<C> {
    pub fn new(config: SimulatorConfig, canvas: C) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            viewport: config.viewport(),
            world: PhysicsWorld::new(config.gravity, config.step_settings()),
            config,
            canvas,
            entities: Vec::new(),
            profile: FrameProfile::default(),
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut C {
        &mut self.canvas
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn profile(&self) -> &FrameProfile {
        &self.profile
    }

    /// Builds one entity and appends it on top of the draw order. Returns its index.
    pub fn spawn(&mut self, spec: &EntitySpec) -> Result<usize> {
        let mut ctx = BuildContext {
            world: &mut self.world,
            viewport: &self.viewport,
            canvas: &mut self.canvas,
            ccd: self.config.ccd,
        };
        let entity = Entity::build(spec, &mut ctx)?;
        self.entities.push(entity);
        self.profile.entity_count = self.entities.len();
        Ok(self.entities.len() - 1)
    }

    pub fn populate(&mut self, scene: &Scene) -> Result<()> {
        for spec in scene.iter() {
            self.spawn(spec)?;
        }
        info!(
            "populated scene: {} entities, {} bodies on the {} canvas",
            self.entities.len(),
            self.world.body_count(),
            self.canvas.name()
        );
        Ok(())
    }

    /// Clears the frame buffer, then draws every entity in insertion order.
    pub fn draw(&mut self) {
        let _timer = PhaseTimer::new(&mut self.profile.draw_time);
        self.canvas.clear(self.config.background);
        let mut ctx = DrawContext {
            world: &mut self.world,
            viewport: &self.viewport,
            canvas: &mut self.canvas,
        };
        for entity in self.entities.iter_mut() {
            entity.draw(&mut ctx);
        }
    }

    /// Advances the physics world by one fixed step.
    pub fn update(&mut self) {
        let _timer = PhaseTimer::new(&mut self.profile.step_time);
        self.world.step();
    }

    /// Presents the current frame buffer.
    pub fn render(&mut self) {
        {
            let _timer = PhaseTimer::new(&mut self.profile.present_time);
            self.canvas.present();
        }
        self.profile.frames += 1;
    }

    /// Releases every entity, last inserted first, removing its bodies from the world.
    pub fn clear(&mut self) {
        if self.entities.is_empty() {
            return;
        }
        let count = self.entities.len();
        while let Some(mut entity) = self.entities.pop() {
            entity.release(&mut self.canvas, &mut self.world);
        }
        self.profile.entity_count = 0;
        info!(
            "released {count} entities, {} bodies left",
            self.world.body_count()
        );
    }
}

impl<C: Canvas> Drop for Simulator<C> {
    fn drop(&mut self) {
        self.profile.report();
        self.clear();
    }
}
