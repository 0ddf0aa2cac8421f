//! Collision detection components for ECS
//!
//! [`ColliderComponent`] is the configuration an entity carries; the engine
//! never mutates it. [`CollisionStateComponent`] holds the transient results
//! the engine rewrites from scratch every tick.

use crate::ecs::Entity;
use crate::foundation::math::{utils, Vec3};
use crate::physics::collision::ColliderShape;
use crate::physics::resolution::{AxisMask, ResolutionMode};
use std::collections::{BTreeSet, HashSet};

/// Layer assigned to colliders that do not name one
pub const DEFAULT_LAYER: &str = "default";

/// Reasons a collider is rejected for a tick
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ColliderError {
    /// Mass must be finite and strictly positive
    #[error("mass must be finite and > 0, got {0}")]
    InvalidMass(f32),

    /// Shape sizes and offset must be finite and non-negative
    #[error("shape has an invalid size: {0}")]
    InvalidSize(String),

    /// Bounciness must lie in [0, 1]
    #[error("bounciness must be within [0, 1], got {0}")]
    InvalidBounciness(f32),
}

/// Component that marks an entity as having collision detection enabled
///
/// Stores all configuration data for an entity's collision behavior.
#[derive(Debug, Clone)]
pub struct ColliderComponent {
    /// The collision shape, centered on `position + offset`
    pub shape: ColliderShape,

    /// Local displacement from the entity position to the shape center
    pub offset: Vec3,

    /// Is this a trigger volume (generates events but no physical response)?
    pub is_trigger: bool,

    /// Only pairs where both sides are solid get separated
    pub is_solid: bool,

    /// Static colliders are never moved by resolution
    pub is_static: bool,

    /// Resolution weighting factor (not true dynamics)
    pub mass: f32,

    /// Restitution in [0, 1]; a pair uses the smaller of the two
    pub bounciness: f32,

    /// Which axes resolution may push along
    pub resolution_mode: ResolutionMode,

    /// Explicit axes, only read when `resolution_mode` is `Custom`
    pub axis_mask: AxisMask,

    /// Collision layer this entity is on
    pub layer: String,

    /// Layers this entity wants to collide with (defaults to the default layer)
    pub collides_with: HashSet<String>,

    /// Disabled colliders are neither indexed nor tested
    pub enabled: bool,
}

impl ColliderComponent {
    /// Create a new collider with default settings
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            offset: Vec3::zeros(),
            is_trigger: false,
            is_solid: true,
            is_static: false,
            mass: 1.0,
            bounciness: 0.0,
            resolution_mode: ResolutionMode::Horizontal,
            axis_mask: AxisMask::ALL,
            layer: DEFAULT_LAYER.to_string(),
            collides_with: HashSet::from([DEFAULT_LAYER.to_string()]),
            enabled: true,
        }
    }

    /// Shorthand for a sphere collider
    pub fn sphere(radius: f32) -> Self {
        Self::new(ColliderShape::sphere(radius))
    }

    /// Shorthand for an axis-aligned box collider
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self::new(ColliderShape::cuboid(half_extents))
    }

    /// Shorthand for a capsule collider
    pub fn capsule(radius: f32, height: f32) -> Self {
        Self::new(ColliderShape::capsule(radius, height))
    }

    /// Builder pattern: Set the local offset
    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    /// Mark this as a trigger volume
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Mark this collider as immovable
    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Detect overlaps without taking part in separation
    pub fn non_solid(mut self) -> Self {
        self.is_solid = false;
        self
    }

    /// Builder pattern: Set the resolution mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Builder pattern: Set bounciness, clamped into [0, 1]
    pub fn with_bounciness(mut self, bounciness: f32) -> Self {
        self.bounciness = bounciness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set the resolution mode
    pub fn with_resolution_mode(mut self, mode: ResolutionMode) -> Self {
        self.resolution_mode = mode;
        self
    }

    /// Resolve only along the given axes
    pub fn with_custom_axes(mut self, axis_mask: AxisMask) -> Self {
        self.resolution_mode = ResolutionMode::Custom;
        self.axis_mask = axis_mask;
        self
    }

    /// Create a collider with a specific layer
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }

    /// Builder pattern: Set the layers this collider wants to hit
    pub fn with_collides_with<I, S>(mut self, layers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.collides_with = layers.into_iter().map(Into::into).collect();
        self
    }

    /// Builder pattern: Enable or disable the collider
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Does this collider list `layer` among the layers it collides with?
    pub fn can_collide_with(&self, layer: &str) -> bool {
        self.collides_with.contains(layer)
    }

    /// Mask this collider contributes when combined with another
    pub fn effective_axis_mask(&self) -> AxisMask {
        match self.resolution_mode {
            ResolutionMode::Custom => self.axis_mask,
            mode => mode.axis_mask(),
        }
    }

    /// Check that the collider can take part in a tick
    pub fn validate(&self) -> Result<(), ColliderError> {
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(ColliderError::InvalidMass(self.mass));
        }
        if !(0.0..=1.0).contains(&self.bounciness) {
            return Err(ColliderError::InvalidBounciness(self.bounciness));
        }
        if !utils::is_finite(&self.offset) {
            return Err(ColliderError::InvalidSize(format!("offset {:?}", self.offset)));
        }
        self.shape.validate()
    }
}

/// Component that tracks the current collision state of an entity
///
/// Updated each frame by the collision system to reflect which entities are
/// currently colliding with this entity. Nothing here carries over between
/// ticks; lifecycle history is kept by the engine itself.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CollisionStateComponent {
    /// True when `colliding_with` is non-empty
    pub is_colliding: bool,

    /// All entities we're currently colliding with
    pub colliding_with: BTreeSet<Entity>,

    /// Entities we started colliding with this frame (entered collision)
    pub collision_entered: Vec<Entity>,

    /// Entities we stopped colliding with this frame (exited collision)
    pub collision_exited: Vec<Entity>,
}

impl CollisionStateComponent {
    /// Check if we're colliding with a specific entity
    pub fn is_colliding_with(&self, entity: Entity) -> bool {
        self.colliding_with.contains(&entity)
    }

    /// Get the number of entities we're colliding with
    pub fn collision_count(&self) -> usize {
        self.colliding_with.len()
    }

    /// Check if we just started colliding with a specific entity this frame
    pub fn just_collided_with(&self, entity: Entity) -> bool {
        self.collision_entered.contains(&entity)
    }

    /// Check if we just stopped colliding with a specific entity this frame
    pub fn just_stopped_colliding_with(&self, entity: Entity) -> bool {
        self.collision_exited.contains(&entity)
    }

    /// Clear everything (called by collision system at start of update)
    pub(crate) fn reset(&mut self) {
        self.is_colliding = false;
        self.colliding_with.clear();
        self.collision_entered.clear();
        self.collision_exited.clear();
    }
}
