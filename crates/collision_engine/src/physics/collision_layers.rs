//! Collision layer system for filtering collision detection
//!
//! Each collider sits on one named layer and lists the layers it wants to
//! collide with. A pair is allowed to interact when EITHER side lists the
//! other's layer; a single interested side is enough.

use crate::ecs::components::ColliderComponent;

/// Collision layer filtering
pub struct CollisionLayers;

impl CollisionLayers {
    /// Check if two colliders should be tested against each other
    ///
    /// # Example
    /// ```
    /// use collision_engine::ecs::components::ColliderComponent;
    /// use collision_engine::physics::CollisionLayers;
    ///
    /// let player = ColliderComponent::sphere(1.0)
    ///     .with_layer("player")
    ///     .with_collides_with(["enemy"]);
    /// let enemy = ColliderComponent::sphere(1.0).with_layer("enemy");
    ///
    /// // The enemy lists nothing, but the player wants to hit enemies
    /// assert!(CollisionLayers::should_collide(&player, &enemy));
    /// ```
    pub fn should_collide(a: &ColliderComponent, b: &ColliderComponent) -> bool {
        a.can_collide_with(&b.layer) || b.can_collide_with(&a.layer)
    }
}
