//! Physics module for collision detection and response
//!
//! Narrow-phase shape tests, layer filtering, contact resolution and the
//! enter/stay/exit lifecycle, driven once per tick by
//! [`PhysicsCollisionSystem`].

pub mod body;
pub mod collision;
pub mod collision_events;
pub mod collision_layers;
pub mod collision_system;
pub mod lifecycle;
pub mod resolution;

pub use body::ColliderBody;
pub use collision::{test_shapes, Aabb, BoundingSphere, ColliderShape, Contact, WorldSpaceShape};
pub use collision_events::{CollisionEvent, CollisionEventKind, CollisionListener, ListenerRegistry};
pub use collision_layers::CollisionLayers;
pub use collision_system::{CollisionPair, CollisionStats, ContactRecord, PhysicsCollisionSystem};
pub use lifecycle::CollisionTracker;
pub use resolution::{AxisMask, ResolutionMode};
