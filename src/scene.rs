//! Scene descriptions: ordered entity specs that a [`Simulator`](crate::Simulator)
//! turns into bodies and drawables. Order is draw order.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    config::{BOUNDARY_INSET, STRESS_CIRCLE_RADIUS, STRESS_SPAWN_EXTENT},
    core::{BodyKind, Color},
    entity::{CircleSpec, ControlSpec, EdgeSpec, EntitySpec},
    mapping::Viewport,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub entities: Vec<EntitySpec>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, spec: impl Into<EntitySpec>) -> &mut Self {
        self.entities.push(spec.into());
        self
    }

    pub fn extend(&mut self, other: Scene) -> &mut Self {
        self.entities.extend(other.entities);
        self
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntitySpec> {
        self.entities.iter()
    }

    /// Left wall, floor and right wall, `inset` meters inside the viewport. The top stays open.
    pub fn boundary(viewport: &Viewport, inset: f32) -> Self {
        let (min, max) = viewport.bounds(inset);
        let wall =
            |start: Vec2, end: Vec2| EdgeSpec::new(start, end, BodyKind::Static, Color::BLACK);

        let mut scene = Scene::new();
        scene
            .push(wall(Vec2::new(min.x, max.y), Vec2::new(min.x, min.y)))
            .push(wall(Vec2::new(min.x, min.y), Vec2::new(max.x, min.y)))
            .push(wall(Vec2::new(max.x, min.y), Vec2::new(max.x, max.y)));
        scene
    }

    /// A ball rolling down a ramp, nudged once each time it nears the ramp's foot.
    pub fn ramp(viewport: &Viewport) -> Self {
        let ball = CircleSpec::new(
            Vec2::new(-4.0 + 0.15, 2.0),
            0.15,
            BodyKind::Dynamic,
            Color::BLUE,
        );
        let ramp = EdgeSpec::new(
            Vec2::new(-5.0, 2.0),
            Vec2::new(-2.0, 0.0),
            BodyKind::Static,
            Color::ORANGE,
        );

        let mut scene = Self::boundary(viewport, BOUNDARY_INSET);
        scene.push(ControlSpec::new(ball, ramp));
        scene
    }

    /// `count` free circles scattered uniformly over a square, clipped so each
    /// one starts between the walls and above the floor.
    pub fn stress<R: Rng>(viewport: &Viewport, rng: &mut R, count: usize) -> Self {
        let (min, max) = Self::stress_spawn_area(viewport);
        let mut scene = Self::boundary(viewport, BOUNDARY_INSET);
        scene.entities.reserve(count);
        for _ in 0..count {
            let center = Vec2::new(
                rng.random_range(min.x..=max.x),
                rng.random_range(min.y..=max.y),
            );
            scene.push(CircleSpec::new(
                center,
                STRESS_CIRCLE_RADIUS,
                BodyKind::Dynamic,
                Color::BLUE,
            ));
        }
        scene
    }

    /// Corners of the region stress circles are centred in, as `(min, max)`.
    ///
    /// The spawn square is intersected with the boundary shrunk by one radius.
    /// On a viewport too small for that, the region collapses onto its centre.
    pub fn stress_spawn_area(viewport: &Viewport) -> (Vec2, Vec2) {
        let (walls_min, walls_max) = viewport.bounds(BOUNDARY_INSET + STRESS_CIRCLE_RADIUS);
        let min = walls_min.max(Vec2::splat(-STRESS_SPAWN_EXTENT));
        let max = walls_max.min(Vec2::splat(STRESS_SPAWN_EXTENT));
        let centre = (min + max) / 2.0;
        (min.min(centre), max.max(centre))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn viewport() -> Viewport {
        Viewport::new(1024, 512, 80.0)
    }

    #[test]
    fn boundary_is_three_static_edges() {
        let scene = Scene::boundary(&viewport(), BOUNDARY_INSET);
        assert_eq!(scene.len(), 3);
        assert!(scene
            .iter()
            .all(|spec| matches!(spec, EntitySpec::Edge(edge) if edge.kind == BodyKind::Static)));
    }

    #[test]
    fn ramp_scene_ends_with_control() {
        let scene = Scene::ramp(&viewport());
        assert_eq!(scene.len(), 4);
        let Some(EntitySpec::Control(control)) = scene.entities.last() else {
            panic!("last entity should be the control");
        };
        assert_eq!(control.ball.kind, BodyKind::Dynamic);
        assert_eq!(control.ramp.floor(), 0.0);
    }

    #[test]
    fn stress_circles_spawn_inside_square() {
        let mut rng = StdRng::seed_from_u64(7);
        let scene = Scene::stress(&viewport(), &mut rng, 200);
        assert_eq!(scene.len(), 203);
        let (floor, _) = viewport().bounds(BOUNDARY_INSET);
        for spec in &scene.entities[3..] {
            let EntitySpec::Circle(circle) = spec else {
                panic!("expected circle, got {spec:?}");
            };
            assert!(circle.center.abs().max_element() <= STRESS_SPAWN_EXTENT);
            assert!(circle.center.y - circle.radius >= floor.y - 1e-5);
        }
    }

    #[test]
    fn stress_spawn_area_sits_above_the_floor() {
        let (min, max) = Scene::stress_spawn_area(&viewport());
        let (walls_min, _) = viewport().bounds(BOUNDARY_INSET);
        assert!((min.y - (walls_min.y + STRESS_CIRCLE_RADIUS)).abs() < 1e-5);
        assert_eq!(min.x, -STRESS_SPAWN_EXTENT);
        assert_eq!(max.x, STRESS_SPAWN_EXTENT);
        assert!((max.y - 2.95).abs() < 1e-5);
    }

    #[test]
    fn tiny_viewport_still_yields_a_spawn_point() {
        let tiny = Viewport::new(16, 16, 80.0);
        let (min, max) = Scene::stress_spawn_area(&tiny);
        assert!(min.cmple(max).all());
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Scene::stress(&tiny, &mut rng, 5).len(), 8);
    }
}
