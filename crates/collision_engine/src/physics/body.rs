//! Per-tick view of a collidable entity
//!
//! The frame driver copies position and velocity out of the entity store,
//! lets detection and resolution work on these copies, then writes them back.

use crate::ecs::components::ColliderComponent;
use crate::ecs::Entity;
use crate::foundation::math::Vec3;

/// An entity taking part in one collision tick
#[derive(Debug, Clone)]
pub struct ColliderBody<'a> {
    /// Entity this body belongs to
    pub entity: Entity,
    /// Entity position, moved by separation
    pub position: Vec3,
    /// Velocity if the entity has one; only bodies with a velocity bounce
    pub velocity: Option<Vec3>,
    /// Collider configuration (read-only)
    pub collider: &'a ColliderComponent,
}

impl<'a> ColliderBody<'a> {
    /// Create a body
    pub fn new(entity: Entity, position: Vec3, velocity: Option<Vec3>, collider: &'a ColliderComponent) -> Self {
        Self {
            entity,
            position,
            velocity,
            collider,
        }
    }

    /// World-space center of the collider shape
    pub fn world_center(&self) -> Vec3 {
        self.position + self.collider.offset
    }

    /// Horizontal radius used for broad-phase queries
    pub fn bounding_radius(&self, default_radius: f32) -> f32 {
        self.collider.shape.bounding_radius(default_radius)
    }
}
