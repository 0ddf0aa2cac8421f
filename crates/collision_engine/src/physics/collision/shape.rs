//! High-level collision shape abstractions
//!
//! Shapes are stored relative to their collider's center and turned into
//! world-space primitives on demand during narrow-phase tests.

use super::primitives::{Aabb, BoundingSphere, Contact};
use crate::ecs::components::ColliderError;
use crate::foundation::math::{utils, Vec3};

/// Collision shape types (stored relative to the collider center)
#[derive(Debug, Clone, PartialEq)]
pub enum ColliderShape {
    /// A sphere
    Sphere {
        /// Sphere radius
        radius: f32,
    },
    /// An axis-aligned box
    Box {
        /// Half the box size along each axis
        half_extents: Vec3,
    },
    /// A vertical capsule; narrow phase treats it as a sphere of `radius`
    Capsule {
        /// Capsule radius
        radius: f32,
        /// Capsule height (not used by overlap tests)
        height: f32,
    },
}

impl ColliderShape {
    /// Creates a spherical collision shape with given radius
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Creates an axis-aligned box from its half extents
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::Box { half_extents }
    }

    /// Creates a capsule
    pub fn capsule(radius: f32, height: f32) -> Self {
        Self::Capsule { radius, height }
    }

    /// The shape's own radius, if it defines one
    pub fn radius(&self) -> Option<f32> {
        match self {
            Self::Sphere { radius } | Self::Capsule { radius, .. } => Some(*radius),
            Self::Box { .. } => None,
        }
    }

    /// Horizontal (x, z) reach of the shape from its center
    ///
    /// `default_radius` is included for shapes without a radius, because mixed
    /// pairs may test them as a sphere of that size.
    pub fn bounding_radius(&self, default_radius: f32) -> f32 {
        match self {
            Self::Sphere { radius } | Self::Capsule { radius, .. } => *radius,
            Self::Box { half_extents } => half_extents
                .x
                .hypot(half_extents.z)
                .max(default_radius),
        }
    }

    /// Check sizes are finite and non-negative
    pub fn validate(&self) -> Result<(), ColliderError> {
        let valid = match self {
            Self::Sphere { radius } => radius.is_finite() && *radius >= 0.0,
            Self::Box { half_extents } => {
                utils::is_finite(half_extents) && half_extents.iter().all(|&e| e >= 0.0)
            }
            Self::Capsule { radius, height } => {
                radius.is_finite() && *radius >= 0.0 && height.is_finite() && *height >= 0.0
            }
        };

        if valid {
            Ok(())
        } else {
            Err(ColliderError::InvalidSize(format!("{self:?}")))
        }
    }

    /// Place this shape at a world-space center
    pub fn to_world_space(&self, center: Vec3, default_radius: f32) -> WorldSpaceShape {
        match self {
            Self::Box { half_extents } => {
                WorldSpaceShape::Box(Aabb::from_center_half_extents(center, *half_extents))
            }
            _ => WorldSpaceShape::Sphere(BoundingSphere::new(
                center,
                self.radius().unwrap_or(default_radius),
            )),
        }
    }
}

/// World-space collision shape (temporary, for testing only)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldSpaceShape {
    /// World-space sphere
    Sphere(BoundingSphere),
    /// World-space box
    Box(Aabb),
}

impl WorldSpaceShape {
    /// Get center position
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Sphere(sphere) => sphere.center,
            Self::Box(aabb) => aabb.center(),
        }
    }

    /// Get contact with another shape, normal pointing from `self` to `other`
    pub fn contact(&self, other: &WorldSpaceShape) -> Option<Contact> {
        match (self, other) {
            (Self::Sphere(a), Self::Sphere(b)) => a.contact_sphere(b),
            (Self::Sphere(sphere), Self::Box(aabb)) => sphere.contact_aabb(aabb),
            (Self::Box(aabb), Self::Sphere(sphere)) => aabb.contact_sphere(sphere),
            (Self::Box(a), Self::Box(b)) => a.contact_aabb(b),
        }
    }
}

/// Narrow-phase test between two shapes centered at `center_a` and `center_b`
///
/// Sphere and box pairs use their exact tests. Every other combination
/// (anything involving a capsule) is tested as two spheres, using each
/// shape's radius or `default_radius` when it has none.
pub fn test_shapes(
    shape_a: &ColliderShape,
    center_a: Vec3,
    shape_b: &ColliderShape,
    center_b: Vec3,
    default_radius: f32,
) -> Option<Contact> {
    match (shape_a, shape_b) {
        (ColliderShape::Sphere { .. } | ColliderShape::Box { .. }, ColliderShape::Sphere { .. } | ColliderShape::Box { .. }) => {
            shape_a
                .to_world_space(center_a, default_radius)
                .contact(&shape_b.to_world_space(center_b, default_radius))
        }
        _ => {
            let a = BoundingSphere::new(center_a, shape_a.radius().unwrap_or(default_radius));
            let b = BoundingSphere::new(center_b, shape_b.radius().unwrap_or(default_radius));
            a.contact_sphere(&b)
        }
    }
}
