//! Core collision detection system
//!
//! This module implements a pure collision system that doesn't depend on ECS,
//! allowing it to be used in different contexts. The ECS wrapper is in
//! ecs/systems/collision_system.rs
//!
//! One call to [`PhysicsCollisionSystem::step`] runs a full tick:
//!
//! 1. clear and rebuild the spatial index from the enabled bodies
//! 2. for each body, query neighbours and test every unordered pair once,
//!    after the layer filter
//! 3. on a hit, record the contact, resolve it and emit `Enter` or `Stay`
//! 4. emit `Exit` for contacts of the previous tick that were not seen again,
//!    then rotate the contact history

use super::body::ColliderBody;
use super::collision::{test_shapes, Contact};
use super::collision_events::{CollisionEvent, CollisionListener, ListenerRegistry};
use super::collision_layers::CollisionLayers;
use super::lifecycle::{CollisionTracker, ContactMap};
use super::resolution::resolve_contact;
use crate::config::CollisionConfig;
use crate::ecs::Entity;
use crate::spatial::{SpatialQuery, UniformGrid};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// Unordered pair of entities (always stores the smaller entity first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// Smaller entity
    pub entity_a: Entity,
    /// Larger entity
    pub entity_b: Entity,
}

impl CollisionPair {
    /// Create a new collision pair (always stores smaller entity ID first for consistency)
    pub fn new(entity_a: Entity, entity_b: Entity) -> Self {
        if entity_a < entity_b {
            Self { entity_a, entity_b }
        } else {
            Self {
                entity_a: entity_b,
                entity_b: entity_a,
            }
        }
    }
}

/// A contact found during the last tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactRecord {
    /// Smaller entity of the pair
    pub entity_a: Entity,
    /// Larger entity of the pair
    pub entity_b: Entity,
    /// Normal points from `entity_a` to `entity_b`
    pub contact: Contact,
}

/// Work done by the last tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Enabled bodies indexed this tick
    pub entities_processed: usize,
    /// Pairs that reached a narrow-phase test
    pub narrow_phase_checks: usize,
    /// `n * (n - 1) / 2` for `n` processed entities
    pub max_pairs: usize,
    /// Pairs found touching
    pub colliding_pairs: usize,
}

impl CollisionStats {
    /// Percentage of possible pairs the broad phase and layer filter skipped
    pub fn pruning_efficiency(&self) -> f32 {
        if self.max_pairs == 0 {
            return 0.0;
        }
        (1.0 - self.narrow_phase_checks as f32 / self.max_pairs as f32) * 100.0
    }
}

impl fmt::Display for CollisionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} entities, {}/{} pairs tested ({:.1}% pruned), {} colliding",
            self.entities_processed,
            self.narrow_phase_checks,
            self.max_pairs,
            self.pruning_efficiency(),
            self.colliding_pairs
        )
    }
}

/// Core collision detection system
///
/// Owns the broad-phase index, the contact history and the listeners. Bodies
/// are lent to it for the duration of a tick.
pub struct PhysicsCollisionSystem {
    config: CollisionConfig,

    /// Spatial partitioning structure for broad-phase
    spatial_query: Box<dyn SpatialQuery>,

    tracker: CollisionTracker,
    listeners: ListenerRegistry,

    /// Events not yet drained by the caller
    events: Vec<CollisionEvent>,

    /// Contacts from the last tick, in detection order
    contacts: Vec<ContactRecord>,

    stats: CollisionStats,

    // Scratch buffers reused across ticks
    tested_pairs: HashSet<CollisionPair>,
    candidates: Vec<Entity>,
    exits: Vec<CollisionEvent>,
}

impl PhysicsCollisionSystem {
    /// Create a new collision system with the given spatial query implementation
    pub fn new(config: CollisionConfig, spatial_query: Box<dyn SpatialQuery>) -> Self {
        Self::with_listeners(config, spatial_query, ListenerRegistry::new())
    }

    /// Create a system backed by a [`UniformGrid`] sized from `config`
    pub fn with_grid(config: CollisionConfig) -> Self {
        let grid = UniformGrid::new(config.cell_size);
        Self::new(config, Box::new(grid))
    }

    /// Create a system with listeners registered up front
    pub fn with_listeners(
        config: CollisionConfig,
        spatial_query: Box<dyn SpatialQuery>,
        listeners: ListenerRegistry,
    ) -> Self {
        Self {
            config,
            spatial_query,
            tracker: CollisionTracker::new(),
            listeners,
            events: Vec::new(),
            contacts: Vec::new(),
            stats: CollisionStats::default(),
            tested_pairs: HashSet::new(),
            candidates: Vec::new(),
            exits: Vec::new(),
        }
    }

    /// Run one tick over `bodies`
    ///
    /// Positions and velocities of the bodies are updated in place by
    /// resolution. Bodies are visited in slice order; disabled or invalid
    /// colliders and repeated entities are ignored.
    pub fn step(&mut self, bodies: &mut [ColliderBody<'_>]) {
        let index = self.rebuild_index(bodies);

        self.tracker.begin_frame();
        self.contacts.clear();
        self.tested_pairs.clear();

        let max_radius = index
            .values()
            .map(|&i| bodies[i].bounding_radius(self.config.default_radius))
            .fold(0.0_f32, f32::max);

        let mut narrow_phase_checks = 0;
        let mut candidates = std::mem::take(&mut self.candidates);

        for i in 0..bodies.len() {
            let entity = bodies[i].entity;
            if index.get(&entity) != Some(&i) {
                continue;
            }

            let center = bodies[i].world_center();
            let radius = bodies[i].bounding_radius(self.config.default_radius) + max_radius;
            candidates.clear();
            self.spatial_query.query_into(center.x, center.z, radius, &mut candidates);
            // Index order is unspecified; pair order decides resolution order
            candidates.sort_unstable();
            candidates.dedup();

            for &other in &candidates {
                if other == entity {
                    continue;
                }
                let Some(&j) = index.get(&other) else {
                    continue;
                };

                let pair = CollisionPair::new(entity, other);
                if !self.tested_pairs.insert(pair) {
                    continue;
                }
                if !CollisionLayers::should_collide(bodies[i].collider, bodies[j].collider) {
                    continue;
                }

                narrow_phase_checks += 1;

                // Test oriented from the smaller entity so the normal is stable
                let (ia, ib) = if entity < other { (i, j) } else { (j, i) };
                let (a, b) = pair_mut(bodies, ia, ib);
                if let Some(contact) = self.test_pair(a, b) {
                    self.handle_contact(a, b, &contact);
                }
            }
        }
        self.candidates = candidates;

        self.exits.clear();
        self.tracker.finish_frame(&mut self.exits);
        for event in &self.exits {
            self.listeners.dispatch(event);
        }
        self.events.append(&mut self.exits);

        let n = index.len();
        self.stats = CollisionStats {
            entities_processed: n,
            narrow_phase_checks,
            max_pairs: n * n.saturating_sub(1) / 2,
            colliding_pairs: self.contacts.len(),
        };

        if self.config.debug_stats {
            log::debug!("Collision tick: {}", self.stats);
        }
    }

    /// Rebuild the spatial index, returning the slice index of each indexed entity
    fn rebuild_index(&mut self, bodies: &[ColliderBody<'_>]) -> HashMap<Entity, usize> {
        self.spatial_query.clear();

        let mut index = HashMap::with_capacity(bodies.len());
        for (i, body) in bodies.iter().enumerate() {
            if !body.collider.enabled {
                continue;
            }
            if let Err(err) = body.collider.validate() {
                log::warn!("Skipping {}: invalid collider: {err}", body.entity);
                continue;
            }
            if index.contains_key(&body.entity) {
                log::warn!("{} appears more than once in a collision tick, ignoring repeat", body.entity);
                continue;
            }

            let center = body.world_center();
            self.spatial_query.insert(body.entity, center.x, center.z);
            index.insert(body.entity, i);
        }
        index
    }

    fn test_pair(&self, a: &ColliderBody<'_>, b: &ColliderBody<'_>) -> Option<Contact> {
        test_shapes(
            &a.collider.shape,
            a.world_center(),
            &b.collider.shape,
            b.world_center(),
            self.config.default_radius,
        )
        .filter(|contact| contact.penetration > 0.0)
    }

    fn handle_contact(&mut self, a: &mut ColliderBody<'_>, b: &mut ColliderBody<'_>, contact: &Contact) {
        log::trace!(
            "Contact {} <-> {}: normal {:?}, depth {:.4}",
            a.entity,
            b.entity,
            contact.normal,
            contact.penetration
        );

        self.contacts.push(ContactRecord {
            entity_a: a.entity,
            entity_b: b.entity,
            contact: *contact,
        });

        resolve_contact(a, b, contact);

        let kind = self.tracker.record(a.entity, b.entity);
        for event in [
            CollisionEvent::new(kind, a.entity, b.entity),
            CollisionEvent::new(kind, b.entity, a.entity),
        ] {
            self.listeners.dispatch(&event);
            self.events.push(event);
        }
    }

    /// Take every event emitted since the last drain, in emission order
    pub fn drain_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events emitted since the last drain
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Contacts found during the last tick
    pub fn contacts(&self) -> &[ContactRecord] {
        &self.contacts
    }

    /// Entities `entity` touched during the last tick
    pub fn colliding_with(&self, entity: Entity) -> Option<&BTreeSet<Entity>> {
        self.tracker.colliding_with(entity)
    }

    /// Every contact of the last tick, keyed by entity
    pub fn contact_map(&self) -> &ContactMap {
        self.tracker.contacts()
    }

    /// Statistics of the last tick
    pub fn stats(&self) -> &CollisionStats {
        &self.stats
    }

    /// Active configuration
    pub fn config(&self) -> &CollisionConfig {
        &self.config
    }

    /// Get spatial query for direct access (e.g., for visualization)
    pub fn spatial_query(&self) -> &dyn SpatialQuery {
        self.spatial_query.as_ref()
    }

    /// Observe the collision lifecycle of `entity`
    pub fn register_listener(&mut self, entity: Entity, listener: Box<dyn CollisionListener>) {
        self.listeners.register(entity, listener);
    }

    /// Stop observing `entity`, returning how many listeners were removed
    pub fn unregister_listener(&mut self, entity: Entity) -> usize {
        self.listeners.unregister(entity)
    }

    /// Clear all collision data (listeners are kept)
    pub fn clear(&mut self) {
        self.spatial_query.clear();
        self.tracker.clear();
        self.events.clear();
        self.contacts.clear();
        self.stats = CollisionStats::default();
    }
}

impl fmt::Debug for PhysicsCollisionSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsCollisionSystem")
            .field("config", &self.config)
            .field("listeners", &self.listeners)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Mutable references to two distinct elements of a slice
fn pair_mut<T>(slice: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = slice.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = slice.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}
