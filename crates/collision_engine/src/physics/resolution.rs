//! Contact resolution
//!
//! Pushes overlapping solid bodies apart, weighted by mass, and bounces their
//! velocities along the contact normal. Every correction passes through an
//! [`AxisMask`] so that games can keep resolution in the horizontal plane.

use super::body::ColliderBody;
use super::collision::Contact;
use crate::ecs::components::ColliderComponent;
use crate::foundation::math::Vec3;

/// Per-axis gate for resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisMask {
    /// Resolve along x
    pub x: bool,
    /// Resolve along y
    pub y: bool,
    /// Resolve along z
    pub z: bool,
}

impl AxisMask {
    /// x and z only
    pub const HORIZONTAL: Self = Self::new(true, false, true);

    /// Every axis
    pub const ALL: Self = Self::new(true, true, true);

    /// Create a mask
    pub const fn new(x: bool, y: bool, z: bool) -> Self {
        Self { x, y, z }
    }

    /// Component-wise AND
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        Self::new(self.x && other.x, self.y && other.y, self.z && other.z)
    }

    /// Zero out the masked-off components of `v`
    pub fn apply(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            if self.x { v.x } else { 0.0 },
            if self.y { v.y } else { 0.0 },
            if self.z { v.z } else { 0.0 },
        )
    }
}

impl Default for AxisMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// Which axes a collider lets resolution act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolutionMode {
    /// Resolve on x and z only (2.5D gameplay)
    #[default]
    Horizontal,
    /// Resolve on every axis
    Full3D,
    /// Resolve on the collider's explicit axis mask
    Custom,
}

impl ResolutionMode {
    /// Mask of a named mode; `Custom` has no mask of its own and yields `ALL`
    pub const fn axis_mask(self) -> AxisMask {
        match self {
            Self::Horizontal => AxisMask::HORIZONTAL,
            Self::Full3D | Self::Custom => AxisMask::ALL,
        }
    }
}

/// Mask used to resolve a pair
///
/// A custom side contributes its explicit mask and the masks are ANDed. Two
/// named modes resolve to the more restrictive one, so `Horizontal` beats
/// `Full3D`.
pub fn combined_axis_mask(a: &ColliderComponent, b: &ColliderComponent) -> AxisMask {
    match (a.resolution_mode, b.resolution_mode) {
        (ResolutionMode::Custom, _) | (_, ResolutionMode::Custom) => {
            a.effective_axis_mask().and(b.effective_axis_mask())
        }
        (mode_a, mode_b) if mode_a == mode_b => mode_a.axis_mask(),
        _ => ResolutionMode::Horizontal.axis_mask(),
    }
}

/// Whether a pair takes part in resolution at all
///
/// Triggers and non-solid colliders never resolve. A pair of static colliders
/// has nothing to move.
pub fn should_resolve(a: &ColliderComponent, b: &ColliderComponent) -> bool {
    !a.is_trigger && !b.is_trigger && a.is_solid && b.is_solid && !(a.is_static && b.is_static)
}

/// Position deltas `(delta_a, delta_b)` that separate a pair
///
/// `normal` points from `a` to `b`, so `a` moves against it and `b` along it.
pub fn separation_offsets(a: &ColliderComponent, b: &ColliderComponent, contact: &Contact, mask: AxisMask) -> (Vec3, Vec3) {
    let separation = mask.apply(contact.normal * contact.penetration);

    match (a.is_static, b.is_static) {
        (true, true) => (Vec3::zeros(), Vec3::zeros()),
        (true, false) => (Vec3::zeros(), separation),
        (false, true) => (-separation, Vec3::zeros()),
        (false, false) => {
            let total_mass = a.mass + b.mass;
            let ratio_a = b.mass / total_mass;
            let ratio_b = a.mass / total_mass;
            (-separation * ratio_a, separation * ratio_b)
        }
    }
}

/// Post-bounce velocities `(velocity_a, velocity_b)`, or `None` when the pair
/// does not bounce
///
/// Bodies already moving apart along the normal are left alone. The impulse is
/// split by mass even when one side is static, so a static body's velocity can
/// change here; integrators should not move static colliders.
pub fn bounce_velocities(
    a: &ColliderComponent,
    velocity_a: Vec3,
    b: &ColliderComponent,
    velocity_b: Vec3,
    normal: &Vec3,
    mask: AxisMask,
) -> Option<(Vec3, Vec3)> {
    if a.is_static && b.is_static {
        return None;
    }

    let relative_velocity = velocity_b - velocity_a;
    let velocity_along_normal = relative_velocity.dot(normal);
    if velocity_along_normal > 0.0 {
        return None;
    }

    let restitution = a.bounciness.min(b.bounciness);
    let reflection = -(1.0 + restitution) * velocity_along_normal;

    let impulse = reflection / (a.mass + b.mass);
    Some((
        velocity_a - mask.apply(normal * (impulse * b.mass)),
        velocity_b + mask.apply(normal * (impulse * a.mass)),
    ))
}

/// Separate and bounce a colliding pair in place
///
/// Returns `false` without touching either body when the pair does not
/// resolve or the contact has no penetration.
pub fn resolve_contact(a: &mut ColliderBody<'_>, b: &mut ColliderBody<'_>, contact: &Contact) -> bool {
    if contact.penetration <= 0.0 || !should_resolve(a.collider, b.collider) {
        return false;
    }

    let mask = combined_axis_mask(a.collider, b.collider);

    let (delta_a, delta_b) = separation_offsets(a.collider, b.collider, contact, mask);
    a.position += delta_a;
    b.position += delta_b;

    if let (Some(velocity_a), Some(velocity_b)) = (a.velocity, b.velocity) {
        if let Some((new_a, new_b)) =
            bounce_velocities(a.collider, velocity_a, b.collider, velocity_b, &contact.normal, mask)
        {
            a.velocity = Some(new_a);
            b.velocity = Some(new_b);
        }
    }

    log::trace!(
        "Resolved {} <-> {}: depth {:.4}, moved {:?} / {:?}",
        a.entity,
        b.entity,
        contact.penetration,
        delta_a,
        delta_b
    );
    true
}
