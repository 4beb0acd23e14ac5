//! Ordered entity collection
//!
//! The store is owned by exactly one data source. It is mutated in place on
//! merge ingestion and emptied with [`EntityStore::clear`] on replace.

use crate::entity::Entity;
use indexmap::IndexMap;
use scene_time::TimeInterval;

/// Entities keyed by id, iterated in first-insertion order
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    entities: IndexMap<String, Entity>,
}

impl EntityStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entities
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Check if store holds no entities
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Check if an entity with `id` exists
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    /// Get entity by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Get mutable entity by id
    #[inline]
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    /// Get entity by id, inserting an empty one if absent
    pub fn get_or_create(&mut self, id: &str) -> &mut Entity {
        self.entities
            .entry(id.to_string())
            .or_insert_with(|| Entity::new(id))
    }

    /// Merge an entity definition into the store
    ///
    /// A new id is appended; an existing one is updated in place and keeps
    /// its position.
    pub fn merge(&mut self, entity: Entity) {
        match self.entities.get_mut(entity.id()) {
            Some(existing) => existing.merge(entity),
            None => {
                self.entities.insert(entity.id().to_string(), entity);
            }
        }
    }

    /// Remove entity by id, preserving the order of the rest
    pub fn remove(&mut self, id: &str) -> Option<Entity> {
        self.entities.shift_remove(id)
    }

    /// Remove all entities
    pub fn clear(&mut self) {
        self.entities.clear();
    }

    /// Iterate entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterate entity ids in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// Tightest interval covering every entity's availability
    ///
    /// An empty store, or one holding any entity without a finite lower
    /// bound, reports a start of [`scene_time::MINIMUM_TIME`].
    #[must_use]
    pub fn compute_availability(&self) -> TimeInterval {
        self.entities
            .values()
            .map(Entity::interval)
            .reduce(|acc, interval| acc.union_bounds(&interval))
            .unwrap_or(TimeInterval::UNBOUNDED)
    }
}

impl<'a> IntoIterator for &'a EntityStore {
    type Item = &'a Entity;
    type IntoIter = indexmap::map::Values<'a, String, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.values()
    }
}
