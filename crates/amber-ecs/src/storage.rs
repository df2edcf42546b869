//! Typed component stores and their type-erased face.
//!
//! Each component type gets one [`ComponentStore<T>`]: a dense map from
//! entity to component value. The registry holds stores behind the
//! non-generic [`ErasedStore`] trait so it can enumerate and purge
//! entities without knowing any value types.

use std::any::Any;

use amber_storage::DenseMap;

use crate::entity::Entity;

/// A store of components of a single type, keyed by entity.
///
/// Backed by a [`DenseMap`], so insert, lookup and removal are O(1) and
/// the entity keys stay contiguous for cheap iteration.
pub struct ComponentStore<T> {
    data: DenseMap<Entity, T>,
}

impl<T> ComponentStore<T> {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: DenseMap::new(),
        }
    }

    /// Get the number of entities with this component.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if an entity has this component.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.data.contains_key(entity)
    }

    /// Insert a component for an entity.
    ///
    /// If the entity already has one, it is replaced in place and the old
    /// value is returned.
    pub fn insert(&mut self, entity: Entity, component: T) -> Option<T> {
        self.data.insert(entity, component)
    }

    /// Get a reference to an entity's component.
    #[must_use]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.data.get(entity)
    }

    /// Get a mutable reference to an entity's component.
    #[must_use]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        self.data.get_mut(entity)
    }

    /// Remove and return an entity's component.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        self.data.remove(entity)
    }

    /// Remove every component in the store.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// The dense array of entities that have this component.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        self.data.keys()
    }
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Type-erased view of a component store.
///
/// The closed contract the registry needs to purge an entity from every
/// store regardless of component type: size, membership, removal, and
/// the dense entity sequence.
pub(crate) trait ErasedStore: Send + Sync {
    fn len(&self) -> usize;
    fn contains(&self, entity: Entity) -> bool;
    /// Remove the entity's component, if present. Returns whether it was.
    fn remove(&mut self, entity: Entity) -> bool;
    fn clear(&mut self);
    fn entities(&self) -> &[Entity];
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Send + Sync + 'static> ErasedStore for ComponentStore<T> {
    fn len(&self) -> usize {
        self.len()
    }

    fn contains(&self, entity: Entity) -> bool {
        self.contains(entity)
    }

    fn remove(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn clear(&mut self) {
        self.clear();
    }

    fn entities(&self) -> &[Entity] {
        self.entities()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
