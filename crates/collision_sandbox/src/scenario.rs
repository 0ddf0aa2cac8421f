//! Bouncing-ball arena
//!
//! Balls move inside a square of static walls and bounce off the walls and
//! each other. A trigger zone at the center counts the balls that pass through
//! it.

use crate::config::{SandboxConfig, ScenarioConfig};
use collision_engine::config::ConfigError;
use collision_engine::prelude::*;
use nalgebra::Vector3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

const BALL_LAYER: &str = "ball";
const WALL_LAYER: &str = "wall";
const ZONE_LAYER: &str = "zone";

const WALL_THICKNESS: f32 = 1.0;
const WALL_SEGMENT_HALF_LENGTH: f32 = 2.0;

/// Counts balls entering the trigger zone
struct ZoneListener {
    visits: Arc<AtomicU32>,
}

impl CollisionListener for ZoneListener {
    fn on_enter(&mut self, _zone: Entity, other: Entity) {
        self.visits.fetch_add(1, Ordering::Relaxed);
        log::debug!("{other} entered the zone");
    }

    fn on_exit(&mut self, _zone: Entity, other: Entity) {
        log::debug!("{other} left the zone");
    }
}

/// Totals over a whole run
#[derive(Debug, Default, Clone, Copy)]
pub struct RunSummary {
    /// Ticks simulated
    pub ticks: u32,
    /// Enter events seen, both sides counted
    pub enters: usize,
    /// Exit events seen, both sides counted
    pub exits: usize,
    /// Balls that entered the trigger zone
    pub zone_visits: u32,
}

/// World plus the collision system driving it
pub struct Scenario {
    world: World,
    collisions: EcsCollisionSystem,
    zone_visits: Arc<AtomicU32>,
    timestep: f32,
    report_interval: u32,
}

impl Scenario {
    /// Build the arena described by `config`
    pub fn new(config: &SandboxConfig) -> Result<Self, ConfigError> {
        let mut collisions = EcsCollisionSystem::from_config(config.collision.clone())?;
        let mut world = World::new();

        spawn_walls(&mut world, config.scenario.arena_half_size);
        spawn_balls(&mut world, &config.scenario);

        let zone_visits = Arc::new(AtomicU32::new(0));
        let zone = spawn_zone(&mut world, config.scenario.zone_radius);
        collisions.register_listener(
            zone,
            Box::new(ZoneListener {
                visits: Arc::clone(&zone_visits),
            }),
        );

        log::info!(
            "Arena ready: {} entities, {} balls",
            world.entity_count(),
            config.scenario.ball_count
        );

        Ok(Self {
            world,
            collisions,
            zone_visits,
            timestep: config.timestep,
            report_interval: config.report_interval,
        })
    }

    /// Run `ticks` simulation steps
    pub fn run(&mut self, ticks: u32) -> RunSummary {
        let mut summary = RunSummary::default();

        for tick in 1..=ticks {
            self.integrate();
            self.collisions.update(&mut self.world);

            for event in self.collisions.drain_events() {
                match event.kind {
                    CollisionEventKind::Enter => summary.enters += 1,
                    CollisionEventKind::Exit => summary.exits += 1,
                    CollisionEventKind::Stay => {}
                }
                log::trace!("Tick {tick}: {event}");
            }

            if self.report_interval > 0 && tick % self.report_interval == 0 {
                log::info!("Tick {tick}: {}", self.collisions.stats());
            }
            summary.ticks = tick;
        }

        summary.zone_visits = self.zone_visits.load(Ordering::Relaxed);
        summary
    }

    /// Advance every moving entity by its velocity
    ///
    /// Static colliders stay put and have any bounce impulse they received
    /// cleared, so walls act as fixed boundaries.
    fn integrate(&mut self) {
        let movers: Vec<(Entity, Vec3)> = self
            .world
            .query::<MovementComponent>()
            .into_iter()
            .map(|(entity, movement)| (entity, movement.velocity))
            .collect();

        for (entity, velocity) in movers {
            let is_static = self
                .world
                .get_component::<ColliderComponent>(entity)
                .is_some_and(|collider| collider.is_static);
            if is_static {
                if let Some(movement) = self.world.get_component_mut::<MovementComponent>(entity) {
                    movement.velocity = Vec3::zeros();
                }
                continue;
            }

            let delta = velocity * self.timestep;
            if let Some(transform) = self.world.get_component_mut::<TransformComponent>(entity) {
                transform.translate(delta);
            }
        }
    }
}

fn spawn_walls(world: &mut World, half_size: f32) {
    let offset = half_size + WALL_THICKNESS;
    let segments = (offset / WALL_SEGMENT_HALF_LENGTH).ceil() as i32;

    for k in 0..segments {
        // Segment centers run from one corner to the other along each side
        let along = -offset + WALL_SEGMENT_HALF_LENGTH * (2 * k + 1) as f32;
        let sides = [
            (Vector3::new(offset, 0.0, along), Vector3::new(WALL_THICKNESS, 2.0, WALL_SEGMENT_HALF_LENGTH)),
            (Vector3::new(-offset, 0.0, along), Vector3::new(WALL_THICKNESS, 2.0, WALL_SEGMENT_HALF_LENGTH)),
            (Vector3::new(along, 0.0, offset), Vector3::new(WALL_SEGMENT_HALF_LENGTH, 2.0, WALL_THICKNESS)),
            (Vector3::new(along, 0.0, -offset), Vector3::new(WALL_SEGMENT_HALF_LENGTH, 2.0, WALL_THICKNESS)),
        ];

        for (position, half_extents) in sides {
            let entity = world.create_entity();
            world.add_component(entity, TransformComponent::from_position(position));
            // Walls carry a velocity so that balls bounce off them; `integrate`
            // keeps it at zero
            world.add_component(entity, MovementComponent::new());
            world.add_component(
                entity,
                ColliderComponent::cuboid(half_extents)
                    .as_static()
                    .with_bounciness(1.0)
                    .with_layer(WALL_LAYER)
                    .with_collides_with([BALL_LAYER]),
            );
        }
    }
}

fn spawn_balls(world: &mut World, scenario: &ScenarioConfig) {
    let mut rng = StdRng::seed_from_u64(scenario.seed);
    let extent = scenario.arena_half_size - scenario.ball_radius;

    for _ in 0..scenario.ball_count {
        let position = Vector3::new(rng.gen_range(-extent..extent), 0.0, rng.gen_range(-extent..extent));
        let heading = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(0.0..=scenario.max_speed);
        let velocity = Vector3::new(heading.cos(), 0.0, heading.sin()) * speed;

        let entity = world.create_entity();
        world.add_component(entity, TransformComponent::from_position(position));
        world.add_component(entity, MovementComponent::with_velocity(velocity));
        world.add_component(
            entity,
            ColliderComponent::sphere(scenario.ball_radius)
                .with_bounciness(scenario.bounciness)
                .with_layer(BALL_LAYER)
                .with_collides_with([BALL_LAYER, WALL_LAYER]),
        );
    }
}

fn spawn_zone(world: &mut World, radius: f32) -> Entity {
    let entity = world.create_entity();
    world.add_component(entity, TransformComponent::default());
    world.add_component(
        entity,
        ColliderComponent::sphere(radius)
            .as_trigger()
            .with_layer(ZONE_LAYER)
            .with_collides_with([BALL_LAYER]),
    );
    entity
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SandboxConfig {
        let mut config = SandboxConfig::default();
        config.scenario.ball_count = 10;
        config
    }

    #[test]
    fn test_arena_layout() {
        let scenario = Scenario::new(&small_config()).unwrap();
        let colliders = scenario.world.query::<ColliderComponent>();
        let on_layer = |layer: &str| colliders.iter().filter(|(_, c)| c.layer == layer).count();

        assert_eq!(on_layer(BALL_LAYER), 10);
        assert_eq!(on_layer(ZONE_LAYER), 1);
        // Each side spans 42 units in 4-unit segments
        assert_eq!(on_layer(WALL_LAYER), 4 * 11);
        assert_eq!(colliders.len(), scenario.world.entity_count());
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = small_config();
        let mut first = Scenario::new(&config).unwrap();
        let mut second = Scenario::new(&config).unwrap();

        let a = first.run(30);
        let b = second.run(30);
        assert_eq!(a.ticks, 30);
        assert_eq!((a.enters, a.exits, a.zone_visits), (b.enters, b.exits, b.zone_visits));

        let positions = |scenario: &Scenario| -> Vec<Vec3> {
            scenario
                .world
                .query::<TransformComponent>()
                .into_iter()
                .map(|(_, transform)| transform.position)
                .collect()
        };
        assert_eq!(positions(&first), positions(&second));
    }

    #[test]
    fn test_walls_never_move() {
        let mut scenario = Scenario::new(&small_config()).unwrap();
        let walls: Vec<(Entity, Vec3)> = scenario
            .world
            .query::<ColliderComponent>()
            .into_iter()
            .filter(|(_, collider)| collider.layer == WALL_LAYER)
            .map(|(entity, _)| (entity, scenario.world.get_component::<TransformComponent>(entity).unwrap().position))
            .collect();
        assert!(!walls.is_empty());

        scenario.run(120);

        for (entity, start) in walls {
            let now = scenario.world.get_component::<TransformComponent>(entity).unwrap().position;
            assert_eq!(now, start);
        }
    }

    #[test]
    fn test_walls_shed_bounce_velocity() {
        let mut scenario = Scenario::new(&small_config()).unwrap();
        scenario.run(240);

        let walls: Vec<Entity> = scenario
            .world
            .query::<ColliderComponent>()
            .into_iter()
            .filter(|(_, collider)| collider.layer == WALL_LAYER)
            .map(|(entity, _)| entity)
            .collect();

        scenario.integrate();
        for entity in walls {
            let movement = scenario.world.get_component::<MovementComponent>(entity).unwrap();
            assert_eq!(movement.velocity, Vec3::zeros());
        }
    }

    #[test]
    fn test_invalid_collision_config_is_rejected() {
        let mut config = small_config();
        config.collision.default_radius = 0.0;
        assert!(Scenario::new(&config).is_err());
    }
}
