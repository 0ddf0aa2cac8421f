//! Movement component for entities that can move in 3D space
//!
//! Velocity is integrated by the movement subsystem. The collision engine
//! only rewrites it when a solid contact bounces.

use crate::foundation::math::Vec3;

/// Component for entities that can move
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MovementComponent {
    /// Linear velocity in units per second
    pub velocity: Vec3,
}

impl MovementComponent {
    /// Create a new movement component at rest
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a movement component with initial velocity
    pub fn with_velocity(velocity: Vec3) -> Self {
        Self { velocity }
    }

    /// Current speed in units per second
    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }
}
