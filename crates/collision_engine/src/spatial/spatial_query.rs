//! Abstract spatial query interface for broad-phase collision detection
//!
//! This abstraction allows swapping different spatial partitioning schemes
//! without changing the collision system. Implementations partition on the
//! horizontal plane only; vertical separation is left to the narrow phase.

use crate::ecs::Entity;
use std::any::Any;

/// Abstract interface for spatial partitioning used in broad-phase collision detection
///
/// Contract: after `insert`ing two entities, a `query` around either one with a
/// radius at least the horizontal distance between them must return the other.
/// Extra candidates are allowed.
pub trait SpatialQuery: Send + Sync {
    /// Bucket an entity by its horizontal position
    ///
    /// Inserting an entity that is already present moves it.
    fn insert(&mut self, entity: Entity, x: f32, z: f32);

    /// Append every entity whose cell overlaps the square of half-size
    /// `radius` around `(x, z)` to `out`
    ///
    /// The result may contain the querying entity itself; callers filter it.
    fn query_into(&self, x: f32, z: f32, radius: f32, out: &mut Vec<Entity>);

    /// Allocating variant of [`SpatialQuery::query_into`]
    fn query(&self, x: f32, z: f32, radius: f32) -> Vec<Entity> {
        let mut out = Vec::new();
        self.query_into(x, z, radius, &mut out);
        out
    }

    /// Clear all entities from the spatial structure
    fn clear(&mut self);

    /// Get the number of entities in the structure
    fn entity_count(&self) -> usize;

    /// Downcast to Any for type-specific access (e.g., UniformGrid)
    fn as_any(&self) -> &dyn Any;
}
