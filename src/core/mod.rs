//! Plain value types shared by the physics wrapper, the entities and the scenes.

pub mod types;

pub use types::{BodyKind, Color, Material, Pose};
