use serde::{Deserialize, Serialize};

/// Common math types re-exported for convenience.
pub use glam::{IVec2, UVec2, Vec2};

/// Straight RGBA colour, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);
    pub const BLUE: Color = Color::rgba(5, 5, 255, 255);
    pub const ORANGE: Color = Color::rgba(255, 100, 50, 255);
    pub const GRAY: Color = Color::rgba(100, 100, 100, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Whether a body is moved by the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BodyKind {
    /// Never moves; drawn from its construction-time coordinates.
    #[default]
    Static,
    /// Integrated every step; re-read from the engine on every draw.
    Dynamic,
}

impl BodyKind {
    pub fn is_dynamic(self) -> bool {
        matches!(self, BodyKind::Dynamic)
    }
}

/// Position (meters, engine frame) and orientation (radians) of a body.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec2,
    pub angle: f32,
}

impl Pose {
    pub fn new(position: Vec2, angle: f32) -> Self {
        Self { position, angle }
    }
}

/// Fixture coefficients handed to the physics engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub density: f32,
    pub friction: f32,
    pub restitution: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            density: 1.0,
            friction: 0.3,
            restitution: 0.1,
        }
    }
}

impl Material {
    pub fn new(density: f32, friction: f32, restitution: f32) -> Self {
        Self {
            density,
            friction,
            restitution,
        }
    }

    /// Bouncier coefficients used by boxes unless a spec overrides them.
    pub fn crate_box() -> Self {
        Self {
            density: 1.0,
            friction: 0.3,
            restitution: 0.5,
        }
    }

    /// Material attached to a fixture of the given kind when none is requested.
    ///
    /// Static fixtures keep the engine's own defaults, so this returns `None`.
    pub fn for_kind(kind: BodyKind) -> Option<Self> {
        match kind {
            BodyKind::Static => None,
            BodyKind::Dynamic => Some(Self::default()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.density.is_finite()
            && self.density >= 0.0
            && self.friction.is_finite()
            && self.friction >= 0.0
            && self.restitution.is_finite()
            && self.restitution >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_bodies_use_engine_defaults() {
        assert!(Material::for_kind(BodyKind::Static).is_none());

        let dynamic = Material::for_kind(BodyKind::Dynamic).expect("dynamic material");
        assert!(dynamic.density > 0.0);
        assert!(dynamic.friction > 0.0);
        assert!(dynamic.restitution > 0.0);
    }

    #[test]
    fn negative_coefficients_are_rejected() {
        assert!(Material::default().is_valid());
        assert!(Material::crate_box().is_valid());
        assert!(!Material::new(-1.0, 0.3, 0.1).is_valid());
        assert!(!Material::new(1.0, f32::NAN, 0.1).is_valid());
    }

    #[test]
    fn color_channels_round_trip_through_array() {
        let color = Color::rgba(1, 2, 3, 4);
        assert_eq!(color.to_array(), [1, 2, 3, 4]);
        assert_eq!(Color::default(), Color::BLACK);
    }
}
