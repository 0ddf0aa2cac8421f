//! ECS World implementation
//!
//! A deliberately small entity/component store: one `HashMap<Entity, T>` per
//! component type, erased behind [`ComponentStore`]. Queries return entities
//! in ascending id order so that systems iterating them are deterministic.

use super::{Component, Entity};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// Type-erased access to one component storage
trait ComponentStore: Send + Sync {
    /// Drop the component owned by `entity`, if any
    fn remove_entity(&mut self, entity: Entity);

    /// Downcast to Any for typed access
    fn as_any(&self) -> &dyn Any;

    /// Downcast to Any for mutable typed access
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ComponentStore for HashMap<Entity, T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.remove(&entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// ECS World containing all entities and components
pub struct World {
    next_entity_id: u32,
    entities: Vec<Entity>,
    component_storages: HashMap<TypeId, Box<dyn ComponentStore>>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            next_entity_id: 0,
            entities: Vec::new(),
            component_storages: HashMap::new(),
        }
    }

    /// Create a new entity
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.entities.push(entity);
        entity
    }

    /// Remove an entity and every component attached to it
    pub fn despawn(&mut self, entity: Entity) -> bool {
        let Some(index) = self.entities.iter().position(|&e| e == entity) else {
            return false;
        };
        self.entities.swap_remove(index);
        for storage in self.component_storages.values_mut() {
            storage.remove_entity(entity);
        }
        true
    }

    /// Check whether an entity is alive
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Add a component to an entity, replacing any previous one of the same type
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        if !self.contains(entity) {
            log::warn!("Ignoring component for unknown {entity}");
            return;
        }
        if let Some(storage) = self.storage_mut::<T>() {
            storage.insert(entity, component);
        }
    }

    /// Remove a component from an entity
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.storage_mut::<T>()?.remove(&entity)
    }

    /// Get a component from an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.storage::<T>()?.get(&entity)
    }

    /// Get a mutable component from an entity
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.storage_mut::<T>()?.get_mut(&entity)
    }

    /// Check whether an entity has a component of type `T`
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// All `(entity, component)` pairs of type `T`, ordered by entity id
    pub fn query<T: Component>(&self) -> Vec<(Entity, &T)> {
        let mut results: Vec<(Entity, &T)> = self
            .storage::<T>()
            .map(|storage| storage.iter().map(|(&entity, component)| (entity, component)).collect())
            .unwrap_or_default();
        results.sort_unstable_by_key(|(entity, _)| *entity);
        results
    }

    /// Mutable variant of [`World::query`]
    pub fn query_mut<T: Component>(&mut self) -> Vec<(Entity, &mut T)> {
        let mut results: Vec<(Entity, &mut T)> = self
            .storage_mut::<T>()
            .map(|storage| storage.iter_mut().map(|(&entity, component)| (entity, component)).collect())
            .unwrap_or_default();
        results.sort_unstable_by_key(|(entity, _)| *entity);
        results
    }

    /// Get an iterator over all entities
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn storage<T: Component>(&self) -> Option<&HashMap<Entity, T>> {
        self.component_storages
            .get(&TypeId::of::<T>())
            .and_then(|storage| storage.as_any().downcast_ref())
    }

    fn storage_mut<T: Component>(&mut self) -> Option<&mut HashMap<Entity, T>> {
        self.component_storages
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(HashMap::<Entity, T>::new()) as Box<dyn ComponentStore>)
            .as_any_mut()
            .downcast_mut()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
