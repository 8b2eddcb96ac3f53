//! Error types for the simulator.
//!
//! Every fallible construction step returns [`SimError`] through the [`Result`] alias.
//! Nothing in the frame loop is expected to fail once a scene has been built.

use rapier2d::prelude::RigidBodyHandle;
use thiserror::Error;

/// Main error type for scene construction.
#[derive(Debug, Error)]
pub enum SimError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// An entity was described with unusable geometry.
    #[error("invalid {entity} geometry: {reason}")]
    InvalidGeometry {
        entity: &'static str,
        reason: String,
    },
    /// A body handle does not belong to the physics world.
    #[error("rigid body {0:?} is not part of the physics world")]
    MissingBody(RigidBodyHandle),
    /// The rendering backend refused to create a texture.
    #[error("texture creation failed: {0}")]
    Texture(String),
}

impl SimError {
    pub(crate) fn geometry(entity: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            entity,
            reason: reason.into(),
        }
    }
}

/// Convenient Result type alias for simulator operations.
pub type Result<T> = std::result::Result<T, SimError>;
