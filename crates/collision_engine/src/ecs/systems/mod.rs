//! ECS Systems module

pub mod collision_system;

pub use collision_system::EcsCollisionSystem;
