//! Primitive collision shapes and intersection algorithms
//!
//! World-space spheres and axis-aligned boxes with exact overlap tests. Every
//! test returns a [`Contact`] whose normal points from the first argument to
//! the second.

use crate::foundation::math::{utils, Vec3};

/// Normal used when two centers coincide and no direction can be derived
pub fn fallback_normal() -> Vec3 {
    Vec3::x()
}

/// Below this distance two points are treated as coincident
const COINCIDENT_EPSILON: f32 = 1.0e-6;

/// Result of an overlap test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit vector from the first shape towards the second
    pub normal: Vec3,
    /// How far the shapes must move apart along `normal` to stop overlapping (> 0)
    pub penetration: f32,
}

impl Contact {
    /// Creates a new contact
    pub fn new(normal: Vec3, penetration: f32) -> Self {
        Self { normal, penetration }
    }

    /// Same contact seen from the other shape
    #[must_use]
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            penetration: self.penetration,
        }
    }
}

/// Direction from `from` to `to` and the distance between them
fn direction_and_distance(from: &Vec3, to: &Vec3) -> (Vec3, f32) {
    let delta = to - from;
    let distance = delta.magnitude();
    if distance > COINCIDENT_EPSILON {
        (delta / distance, distance)
    } else {
        (fallback_normal(), 0.0)
    }
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this sphere intersects with another
    ///
    /// Touching spheres do not intersect.
    pub fn intersects(&self, other: &BoundingSphere) -> bool {
        let distance_squared = (self.center - other.center).magnitude_squared();
        let radius_sum = self.radius + other.radius;
        distance_squared < radius_sum * radius_sum
    }

    /// Contact against another sphere
    pub fn contact_sphere(&self, other: &BoundingSphere) -> Option<Contact> {
        if !self.intersects(other) {
            return None;
        }

        let (normal, distance) = direction_and_distance(&self.center, &other.center);
        Some(Contact::new(normal, self.radius + other.radius - distance))
    }

    /// Contact against an axis-aligned box, normal pointing from sphere to box
    pub fn contact_aabb(&self, aabb: &Aabb) -> Option<Contact> {
        let closest = aabb.closest_point(&self.center);
        let distance_squared = (closest - self.center).magnitude_squared();
        if distance_squared >= self.radius * self.radius {
            return None;
        }

        // Center inside the box: no closest-point direction, fall back like sphere-sphere
        let (normal, distance) = direction_and_distance(&self.center, &closest);
        Some(Contact::new(normal, self.radius - distance))
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Creates a box from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Creates a box from a center and non-negative half extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Point inside (or on) the box closest to `point`
    pub fn closest_point(&self, point: &Vec3) -> Vec3 {
        utils::clamp_vec(point, &self.min, &self.max)
    }

    /// Contact against a sphere, normal pointing from box to sphere
    pub fn contact_sphere(&self, sphere: &BoundingSphere) -> Option<Contact> {
        sphere.contact_aabb(self).map(Contact::flipped)
    }

    /// Contact against another box
    ///
    /// The normal lies along the axis of least overlap and points towards the
    /// box whose center is further along that axis.
    pub fn contact_aabb(&self, other: &Aabb) -> Option<Contact> {
        let overlap = Vec3::new(
            self.max.x.min(other.max.x) - self.min.x.max(other.min.x),
            self.max.y.min(other.max.y) - self.min.y.max(other.min.y),
            self.max.z.min(other.max.z) - self.min.z.max(other.min.z),
        );
        if overlap.x <= 0.0 || overlap.y <= 0.0 || overlap.z <= 0.0 {
            return None;
        }

        let axis = overlap.imin();
        let delta = other.center() - self.center();
        let mut normal = Vec3::zeros();
        normal[axis] = if delta[axis] >= 0.0 { 1.0 } else { -1.0 };

        Some(Contact::new(normal, overlap[axis]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_sphere_contact() {
        let a = BoundingSphere::new(Vec3::zeros(), 1.0);
        let b = BoundingSphere::new(Vec3::new(1.5, 0.0, 0.0), 1.0);

        let contact = a.contact_sphere(&b).unwrap();
        assert_relative_eq!(contact.normal, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(contact.penetration, 0.5);
    }

    #[test]
    fn test_touching_spheres_do_not_collide() {
        let a = BoundingSphere::new(Vec3::zeros(), 1.0);
        let b = BoundingSphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0);
        assert!(a.contact_sphere(&b).is_none());
    }

    #[test]
    fn test_coincident_spheres_use_fallback_normal() {
        let a = BoundingSphere::new(Vec3::new(3.0, 3.0, 3.0), 1.0);
        let b = BoundingSphere::new(Vec3::new(3.0, 3.0, 3.0), 0.5);

        let contact = a.contact_sphere(&b).unwrap();
        assert_eq!(contact.normal, fallback_normal());
        assert_relative_eq!(contact.penetration, 1.5);
        assert!(contact.normal.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_sphere_box_contact() {
        let sphere = BoundingSphere::new(Vec3::new(-1.5, 0.0, 0.0), 1.0);
        let aabb = Aabb::from_center_half_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));

        let contact = sphere.contact_aabb(&aabb).unwrap();
        assert_relative_eq!(contact.normal, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(contact.penetration, 0.5);
    }

    #[test]
    fn test_box_sphere_negates_normal() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, 1.8), 1.0);
        let aabb = Aabb::from_center_half_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));

        let sphere_first = sphere.contact_aabb(&aabb).unwrap();
        let box_first = aabb.contact_sphere(&sphere).unwrap();
        assert_relative_eq!(sphere_first.normal, Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(box_first.normal, Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(box_first.penetration, sphere_first.penetration);
    }

    #[test]
    fn test_sphere_misses_box_corner() {
        let sphere = BoundingSphere::new(Vec3::new(1.8, 1.8, 0.0), 1.0);
        let aabb = Aabb::from_center_half_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        // Distance to the corner edge is ~1.13
        assert!(sphere.contact_aabb(&aabb).is_none());
    }

    #[test]
    fn test_sphere_center_inside_box() {
        let sphere = BoundingSphere::new(Vec3::new(0.2, 0.0, 0.0), 0.5);
        let aabb = Aabb::from_center_half_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));

        let contact = sphere.contact_aabb(&aabb).unwrap();
        assert_eq!(contact.normal, fallback_normal());
        assert_relative_eq!(contact.penetration, 0.5);
    }

    #[test]
    fn test_box_box_least_overlap_axis() {
        let a = Aabb::from_center_half_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::from_center_half_extents(Vec3::new(0.5, 0.2, -1.8), Vec3::new(1.0, 1.0, 1.0));

        let contact = a.contact_aabb(&b).unwrap();
        assert_relative_eq!(contact.normal, Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(contact.penetration, 0.2, epsilon = 1.0e-6);
    }

    #[test]
    fn test_box_box_requires_overlap_on_every_axis() {
        let a = Aabb::from_center_half_extents(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let b = Aabb::from_center_half_extents(Vec3::new(0.5, 3.0, 0.5), Vec3::new(1.0, 1.0, 1.0));
        assert!(a.contact_aabb(&b).is_none());
    }
}
