//! Entity-Component-System implementation
//!
//! The minimal entity/component collaborator the collision engine is driven
//! through: stable entity ids, typed component storage, and the collision
//! system that reads and writes those components once per tick.

pub mod world;
pub mod entity;
pub mod component;
pub mod components;
pub mod systems;

#[cfg(test)]
mod tests;

pub use world::World;
pub use entity::Entity;
pub use component::Component;
