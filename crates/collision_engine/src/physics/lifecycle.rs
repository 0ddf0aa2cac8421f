//! Enter/stay/exit tracking
//!
//! The tracker keeps two maps from entity to the set of entities it touches:
//! the one being built this tick and the one recorded last tick. At the end of
//! a tick the current map replaces the previous one wholesale.

use super::collision_events::{CollisionEvent, CollisionEventKind};
use crate::ecs::Entity;
use std::collections::{BTreeMap, BTreeSet};

/// Entity to touching entities, ordered for deterministic iteration
pub type ContactMap = BTreeMap<Entity, BTreeSet<Entity>>;

/// Per-pair contact history across ticks
#[derive(Debug, Default)]
pub struct CollisionTracker {
    current: ContactMap,
    previous: ContactMap,
}

impl CollisionTracker {
    /// Create a tracker with no history
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a tick with an empty current map
    pub fn begin_frame(&mut self) {
        self.current.clear();
    }

    /// Record that `a` and `b` touch this tick and classify the contact
    ///
    /// A pair is a `Stay` if either side had the other last tick, otherwise
    /// an `Enter`.
    pub fn record(&mut self, a: Entity, b: Entity) -> CollisionEventKind {
        self.current.entry(a).or_default().insert(b);
        self.current.entry(b).or_default().insert(a);

        if self.touched_previously(a, b) || self.touched_previously(b, a) {
            CollisionEventKind::Stay
        } else {
            CollisionEventKind::Enter
        }
    }

    /// Close the tick: queue an `Exit` for every contact that ended, then
    /// rotate the current map into the previous one
    ///
    /// Exits are pushed per side, in entity order.
    pub fn finish_frame(&mut self, events: &mut Vec<CollisionEvent>) {
        for (&entity, others) in &self.previous {
            let still_touching = self.current.get(&entity);
            for &other in others {
                if !still_touching.is_some_and(|set| set.contains(&other)) {
                    events.push(CollisionEvent::exit(entity, other));
                }
            }
        }

        std::mem::swap(&mut self.current, &mut self.previous);
        self.current.clear();
    }

    /// Entities `entity` touched in the most recently finished tick
    pub fn colliding_with(&self, entity: Entity) -> Option<&BTreeSet<Entity>> {
        self.previous.get(&entity)
    }

    /// The contact map of the most recently finished tick
    pub fn contacts(&self) -> &ContactMap {
        &self.previous
    }

    /// Forget all history; the next contact of any pair is an `Enter`
    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
    }

    fn touched_previously(&self, entity: Entity, other: Entity) -> bool {
        self.previous
            .get(&entity)
            .is_some_and(|set| set.contains(&other))
    }
}
