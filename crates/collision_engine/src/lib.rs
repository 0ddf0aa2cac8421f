//! # Collision Engine
//!
//! Grid-accelerated collision detection and resolution for real-time entity
//! simulations with mostly 2.5D gameplay.
//!
//! ## Features
//!
//! - **Broad Phase**: Uniform grid on the horizontal (x, z) plane
//! - **Narrow Phase**: Sphere, axis-aligned box and capsule overlap tests
//! - **Resolution**: Mass-weighted separation and bounce, gated per axis
//! - **Lifecycle**: Enter / stay / exit events, queued and dispatched to listeners
//! - **ECS Integration**: Drives `World` components once per simulation tick
//!
//! ## Quick Start
//!
//! ```rust
//! use collision_engine::prelude::*;
//!
//! let mut world = World::new();
//! let mut collisions = EcsCollisionSystem::from_config(CollisionConfig::default()).unwrap();
//!
//! let a = world.create_entity();
//! world.add_component(a, TransformComponent::from_xyz(0.0, 0.0, 0.0));
//! world.add_component(a, ColliderComponent::sphere(1.0));
//!
//! let b = world.create_entity();
//! world.add_component(b, TransformComponent::from_xyz(1.5, 0.0, 0.0));
//! world.add_component(b, ColliderComponent::sphere(1.0));
//!
//! collisions.update(&mut world);
//!
//! let state = world.get_component::<CollisionStateComponent>(a).unwrap();
//! assert!(state.is_colliding_with(b));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod ecs;
pub mod foundation;
pub mod physics;
pub mod spatial;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError},
        ecs::{
            components::{
                ColliderComponent, ColliderError, CollisionStateComponent, MovementComponent,
                TransformComponent,
            },
            systems::EcsCollisionSystem,
            Component, Entity, World,
        },
        foundation::math::Vec3,
        physics::{
            AxisMask, ColliderBody, ColliderShape, CollisionEvent, CollisionEventKind,
            CollisionListener, CollisionStats, ListenerRegistry, PhysicsCollisionSystem,
            ResolutionMode,
        },
        spatial::{SpatialQuery, UniformGrid},
    };
}
