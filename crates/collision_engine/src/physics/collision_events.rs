//! Collision lifecycle notifications
//!
//! Every tick the collision system emits one [`CollisionEvent`] per side of a
//! pair: `Enter` on the first tick two entities touch, `Stay` on every tick
//! after that, and `Exit` on the first tick they no longer touch. Events are
//! queued for the caller to drain and also dispatched to any
//! [`CollisionListener`] registered for the receiving entity.

use crate::ecs::Entity;
use std::collections::HashMap;
use std::fmt;

/// Lifecycle phase of a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionEventKind {
    /// First tick of contact
    Enter,
    /// Contact continues from the previous tick
    Stay,
    /// First tick after contact ended
    Exit,
}

/// A lifecycle notification addressed to `entity` about `other`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionEvent {
    /// Lifecycle phase
    pub kind: CollisionEventKind,
    /// Entity receiving the notification
    pub entity: Entity,
    /// Entity it collided with
    pub other: Entity,
}

impl CollisionEvent {
    /// Create an event
    pub fn new(kind: CollisionEventKind, entity: Entity, other: Entity) -> Self {
        Self { kind, entity, other }
    }

    /// Shorthand for an `Enter` event
    pub fn enter(entity: Entity, other: Entity) -> Self {
        Self::new(CollisionEventKind::Enter, entity, other)
    }

    /// Shorthand for a `Stay` event
    pub fn stay(entity: Entity, other: Entity) -> Self {
        Self::new(CollisionEventKind::Stay, entity, other)
    }

    /// Shorthand for an `Exit` event
    pub fn exit(entity: Entity, other: Entity) -> Self {
        Self::new(CollisionEventKind::Exit, entity, other)
    }
}

impl fmt::Display for CollisionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} {} -> {}", self.kind, self.entity, self.other)
    }
}

/// Observer for the collision lifecycle of one entity
///
/// All methods default to doing nothing, so implementors only override the
/// phases they care about.
pub trait CollisionListener: Send {
    /// `entity` started touching `other`
    fn on_enter(&mut self, _entity: Entity, _other: Entity) {}

    /// `entity` is still touching `other`
    fn on_stay(&mut self, _entity: Entity, _other: Entity) {}

    /// `entity` stopped touching `other`
    fn on_exit(&mut self, _entity: Entity, _other: Entity) {}
}

/// Listeners keyed by the entity they observe
///
/// Owned by the collision system; build one up front and hand it to
/// `PhysicsCollisionSystem::with_listeners` to share setup between tests or
/// scenes.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: HashMap<Entity, Vec<Box<dyn CollisionListener>>>,
}

impl ListenerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener for `entity`; an entity may have several
    pub fn register(&mut self, entity: Entity, listener: Box<dyn CollisionListener>) {
        self.listeners.entry(entity).or_default().push(listener);
    }

    /// Drop every listener of `entity`, returning how many were removed
    pub fn unregister(&mut self, entity: Entity) -> usize {
        self.listeners.remove(&entity).map_or(0, |listeners| listeners.len())
    }

    /// Number of listeners registered for `entity`
    pub fn listener_count(&self, entity: Entity) -> usize {
        self.listeners.get(&entity).map_or(0, Vec::len)
    }

    /// True when no entity has a listener
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Deliver `event` to the listeners of `event.entity`
    pub fn dispatch(&mut self, event: &CollisionEvent) {
        let Some(listeners) = self.listeners.get_mut(&event.entity) else {
            return;
        };

        for listener in listeners.iter_mut() {
            match event.kind {
                CollisionEventKind::Enter => listener.on_enter(event.entity, event.other),
                CollisionEventKind::Stay => listener.on_stay(event.entity, event.other),
                CollisionEventKind::Exit => listener.on_exit(event.entity, event.other),
            }
        }
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("entities", &self.listeners.len())
            .finish()
    }
}
