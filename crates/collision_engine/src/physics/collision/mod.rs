//! Narrow-phase collision geometry
//!
//! # Module Organization
//!
//! - [`primitives`] - World-space spheres and boxes with exact contact tests
//! - [`shape`] - Collider shapes and the pairwise dispatch between them
//!
//! # Key Types
//!
//! - [`ColliderShape`] - Shape attached to a collider (sphere, box, capsule)
//! - [`WorldSpaceShape`] - Temporary world-space shape for collision testing
//! - [`Contact`] - Normal and penetration depth of an overlap

pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use primitives::{fallback_normal, Aabb, BoundingSphere, Contact};
pub use shape::{test_shapes, ColliderShape, WorldSpaceShape};
