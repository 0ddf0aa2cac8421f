//! Transform component for the ECS system
//!
//! Pure data component. Position is shared with the movement subsystem: it
//! integrates before the collision tick, and collision resolution may push the
//! entity out of overlaps during the tick.

use crate::foundation::math::Vec3;

/// ECS Transform component
///
/// World space position, Y-up. Collisions are axis-aligned, so no rotation
/// is carried.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransformComponent {
    /// World space position (Y-up)
    pub position: Vec3,
}

impl TransformComponent {
    /// Create from position only
    pub fn from_position(position: Vec3) -> Self {
        Self { position }
    }

    /// Create from individual coordinates
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self::from_position(Vec3::new(x, y, z))
    }

    /// Builder pattern: Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Offset the position in place
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }
}
