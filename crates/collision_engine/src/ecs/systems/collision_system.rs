//! ECS collision system wrapper
//!
//! This module provides an ECS-aware wrapper around the core collision system.
//! Each update it gathers every entity with a [`ColliderComponent`] and a
//! [`TransformComponent`], runs one collision tick, writes the resolved
//! positions and velocities back, and refreshes every
//! [`CollisionStateComponent`].

use crate::config::{CollisionConfig, ConfigError};
use crate::ecs::components::{ColliderComponent, CollisionStateComponent, MovementComponent, TransformComponent};
use crate::ecs::{Entity, World};
use crate::foundation::math::Vec3;
use crate::physics::{
    ColliderBody, CollisionEvent, CollisionEventKind, CollisionListener, CollisionStats, PhysicsCollisionSystem,
};
use crate::spatial::SpatialQuery;
use std::collections::HashMap;

/// Resolved state of one body, copied out before the world is mutated
struct BodyUpdate {
    entity: Entity,
    position: Vec3,
    velocity: Option<Vec3>,
}

/// ECS collision system that integrates collision detection with the ECS World
///
/// This system:
/// - Feeds transforms, velocities and colliders to the [`PhysicsCollisionSystem`]
/// - Writes separation and bounce results back to the components
/// - Updates `CollisionStateComponent`s each frame, adding them where missing
pub struct EcsCollisionSystem {
    collision_system: PhysicsCollisionSystem,
    events: Vec<CollisionEvent>,
}

impl EcsCollisionSystem {
    /// Create a new ECS collision system with the given spatial query
    pub fn new(config: CollisionConfig, spatial_query: Box<dyn SpatialQuery>) -> Self {
        Self::from_system(PhysicsCollisionSystem::new(config, spatial_query))
    }

    /// Wrap an already configured core system
    pub fn from_system(collision_system: PhysicsCollisionSystem) -> Self {
        Self {
            collision_system,
            events: Vec::new(),
        }
    }

    /// Validate `config` and build a grid-backed system from it
    pub fn from_config(config: CollisionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!(
            "Collision system: cell size {}, default radius {}",
            config.cell_size,
            config.default_radius
        );
        Ok(Self::from_system(PhysicsCollisionSystem::with_grid(config)))
    }

    /// Main update function - performs collision detection and updates components
    ///
    /// Runs after movement integration and before gameplay logic reads the
    /// collision states.
    pub fn update(&mut self, world: &mut World) {
        let updates = self.run_tick(world);

        for update in updates {
            if let Some(transform) = world.get_component_mut::<TransformComponent>(update.entity) {
                transform.position = update.position;
            }
            if let (Some(velocity), Some(movement)) =
                (update.velocity, world.get_component_mut::<MovementComponent>(update.entity))
            {
                movement.velocity = velocity;
            }
        }

        let events = self.collision_system.drain_events();
        self.update_collision_states(world, &events);
        self.events.extend(events);
    }

    /// Gather bodies from the world, step the core system and copy the results out
    fn run_tick(&mut self, world: &World) -> Vec<BodyUpdate> {
        let mut bodies = Vec::new();

        for (entity, collider) in world.query::<ColliderComponent>() {
            if !collider.enabled {
                continue;
            }
            if let Err(err) = collider.validate() {
                log::warn!("Skipping {entity}: invalid collider: {err}");
                continue;
            }
            let Some(transform) = world.get_component::<TransformComponent>(entity) else {
                log::warn!("Skipping {entity}: collider without a transform");
                continue;
            };

            let velocity = world
                .get_component::<MovementComponent>(entity)
                .map(|movement| movement.velocity);
            bodies.push(ColliderBody::new(entity, transform.position, velocity, collider));
        }

        self.collision_system.step(&mut bodies);

        bodies
            .into_iter()
            .map(|body| BodyUpdate {
                entity: body.entity,
                position: body.position,
                velocity: body.velocity,
            })
            .collect()
    }

    /// Update CollisionStateComponents with current collision data
    fn update_collision_states(&self, world: &mut World, events: &[CollisionEvent]) {
        let missing: Vec<Entity> = world
            .query::<ColliderComponent>()
            .into_iter()
            .map(|(entity, _)| entity)
            .filter(|&entity| !world.has_component::<CollisionStateComponent>(entity))
            .collect();
        for entity in missing {
            world.add_component(entity, CollisionStateComponent::default());
        }

        let mut entered: HashMap<Entity, Vec<Entity>> = HashMap::new();
        let mut exited: HashMap<Entity, Vec<Entity>> = HashMap::new();
        for event in events {
            match event.kind {
                CollisionEventKind::Enter => entered.entry(event.entity).or_default().push(event.other),
                CollisionEventKind::Exit => exited.entry(event.entity).or_default().push(event.other),
                CollisionEventKind::Stay => {}
            }
        }

        for (entity, state) in world.query_mut::<CollisionStateComponent>() {
            state.reset();

            if let Some(others) = self.collision_system.colliding_with(entity) {
                state.colliding_with.clone_from(others);
            }
            state.is_colliding = !state.colliding_with.is_empty();

            if let Some(others) = entered.remove(&entity) {
                state.collision_entered = others;
            }
            if let Some(others) = exited.remove(&entity) {
                state.collision_exited = others;
            }
        }
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events emitted since the last drain
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Statistics of the last update
    pub fn stats(&self) -> &CollisionStats {
        self.collision_system.stats()
    }

    /// Observe the collision lifecycle of `entity`
    pub fn register_listener(&mut self, entity: Entity, listener: Box<dyn CollisionListener>) {
        self.collision_system.register_listener(entity, listener);
    }

    /// Stop observing `entity`
    pub fn unregister_listener(&mut self, entity: Entity) -> usize {
        self.collision_system.unregister_listener(entity)
    }

    /// Get reference to underlying collision system
    pub fn collision_system(&self) -> &PhysicsCollisionSystem {
        &self.collision_system
    }

    /// Get mutable reference to underlying collision system
    pub fn collision_system_mut(&mut self) -> &mut PhysicsCollisionSystem {
        &mut self.collision_system
    }

    /// Get reference to spatial query (shorthand for collision_system().spatial_query())
    pub fn spatial_query(&self) -> &dyn SpatialQuery {
        self.collision_system.spatial_query()
    }
}

impl Default for EcsCollisionSystem {
    fn default() -> Self {
        Self::from_system(PhysicsCollisionSystem::with_grid(CollisionConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn spawn(world: &mut World, position: Vec3, collider: ColliderComponent) -> Entity {
        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::from_position(position));
        world.add_component(entity, collider);
        entity
    }

    #[test]
    fn test_update_writes_back_positions_and_states() {
        let mut world = World::new();
        let mut system = EcsCollisionSystem::default();

        let a = spawn(&mut world, Vec3::zeros(), ColliderComponent::sphere(1.0));
        let b = spawn(&mut world, Vec3::new(1.5, 0.0, 0.0), ColliderComponent::sphere(1.0));

        system.update(&mut world);

        let pos_a = world.get_component::<TransformComponent>(a).unwrap().position;
        let pos_b = world.get_component::<TransformComponent>(b).unwrap().position;
        assert_relative_eq!(pos_a, Vec3::new(-0.25, 0.0, 0.0));
        assert_relative_eq!(pos_b, Vec3::new(1.75, 0.0, 0.0));

        let state = world.get_component::<CollisionStateComponent>(a).unwrap();
        assert!(state.is_colliding);
        assert!(state.is_colliding_with(b));
        assert!(state.just_collided_with(b));
    }

    #[test]
    fn test_bounce_updates_movement() {
        let mut world = World::new();
        let mut system = EcsCollisionSystem::default();

        let a = spawn(&mut world, Vec3::zeros(), ColliderComponent::sphere(1.0).with_bounciness(1.0));
        world.add_component(a, MovementComponent::with_velocity(Vec3::new(1.0, 0.0, 0.0)));
        let b = spawn(&mut world, Vec3::new(1.5, 0.0, 0.0), ColliderComponent::sphere(1.0).with_bounciness(1.0));
        world.add_component(b, MovementComponent::with_velocity(Vec3::new(-1.0, 0.0, 0.0)));

        system.update(&mut world);

        assert_relative_eq!(
            world.get_component::<MovementComponent>(a).unwrap().velocity,
            Vec3::new(-1.0, 0.0, 0.0)
        );
        assert_relative_eq!(
            world.get_component::<MovementComponent>(b).unwrap().velocity,
            Vec3::new(1.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_invalid_collider_is_skipped() {
        let mut world = World::new();
        let mut system = EcsCollisionSystem::default();

        let bad = spawn(&mut world, Vec3::zeros(), ColliderComponent::sphere(1.0).with_mass(-2.0));
        spawn(&mut world, Vec3::new(0.5, 0.0, 0.0), ColliderComponent::sphere(1.0));

        system.update(&mut world);

        assert_eq!(system.stats().entities_processed, 1);
        let state = world.get_component::<CollisionStateComponent>(bad).unwrap();
        assert!(!state.is_colliding);
        assert_eq!(world.get_component::<TransformComponent>(bad).unwrap().position, Vec3::zeros());
    }

    #[test]
    fn test_from_config_rejects_invalid_config() {
        let config = CollisionConfig::default().with_cell_size(0.0);
        assert!(matches!(
            EcsCollisionSystem::from_config(config),
            Err(ConfigError::Invalid { field: "cell_size", .. })
        ));
        assert!(EcsCollisionSystem::from_config(CollisionConfig::default()).is_ok());
    }

    #[test]
    fn test_events_accumulate_until_drained() {
        let mut world = World::new();
        let mut system = EcsCollisionSystem::default();

        spawn(&mut world, Vec3::zeros(), ColliderComponent::sphere(1.0).as_trigger());
        spawn(&mut world, Vec3::new(1.0, 0.0, 0.0), ColliderComponent::sphere(1.0));

        system.update(&mut world);
        system.update(&mut world);
        assert_eq!(system.events().len(), 4);
        assert_eq!(system.drain_events().len(), 4);
        assert!(system.events().is_empty());
    }
}
