//! Type-keyed registry of component stores.
//!
//! One store per distinct component type ever requested, created lazily
//! on first use and held behind the erased trait so callers that only
//! need membership or removal never see the value type.

use std::any::{TypeId, type_name};

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{
    component::Component,
    storage::{ComponentStore, ErasedStore},
};

/// Registry mapping component type identity to its type-erased store.
#[derive(Default)]
pub(crate) struct StoreRegistry {
    stores: FxHashMap<TypeId, Box<dyn ErasedStore>>,
}

impl StoreRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check if a store exists for a component type.
    pub(crate) fn has_store<T: Component>(&self) -> bool {
        self.stores.contains_key(&TypeId::of::<T>())
    }

    /// Get the store for a component type, if it was ever created.
    pub(crate) fn get<T: Component>(&self) -> Option<&ComponentStore<T>> {
        let store = self.stores.get(&TypeId::of::<T>())?;
        Some(
            store
                .as_any()
                .downcast_ref()
                .expect("store registered under its own TypeId"),
        )
    }

    /// Get the store for a component type mutably, if it was ever created.
    pub(crate) fn get_mut<T: Component>(&mut self) -> Option<&mut ComponentStore<T>> {
        let store = self.stores.get_mut(&TypeId::of::<T>())?;
        Some(
            store
                .as_any_mut()
                .downcast_mut()
                .expect("store registered under its own TypeId"),
        )
    }

    /// Get the store for a component type, creating it on first use.
    pub(crate) fn get_or_create<T: Component>(&mut self) -> &mut ComponentStore<T> {
        self.stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| {
                trace!("created component store for {}", type_name::<T>());
                Box::new(ComponentStore::<T>::new())
            })
            .as_any_mut()
            .downcast_mut()
            .expect("store registered under its own TypeId")
    }

    /// Get the erased store for a type identity, if it exists.
    pub(crate) fn erased(&self, type_id: TypeId) -> Option<&dyn ErasedStore> {
        self.stores.get(&type_id).map(|store| &**store)
    }

    /// Iterate over every store, regardless of component type.
    pub(crate) fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = &mut (dyn ErasedStore + 'static)> + '_ {
        self.stores.values_mut().map(|store| &mut **store)
    }

    /// Get the number of distinct component types ever requested.
    pub(crate) fn store_count(&self) -> usize {
        self.stores.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, Generation};

    fn entity(id: u32) -> Entity {
        Entity::new(id, Generation::new().bump())
    }

    struct A(i32);
    struct B(i32);

    #[test]
    fn test_lazy_creation() {
        let mut registry = StoreRegistry::new();

        assert!(!registry.has_store::<A>());
        assert!(registry.get::<A>().is_none());
        assert_eq!(registry.store_count(), 0);

        registry.get_or_create::<A>();
        assert!(registry.has_store::<A>());
        assert!(!registry.has_store::<B>());
        assert_eq!(registry.store_count(), 1);
    }

    #[test]
    fn test_get_or_create_idempotent() {
        let mut registry = StoreRegistry::new();
        let e0 = entity(0);

        registry.get_or_create::<A>().insert(e0, A(7));
        // Second request must return the same store, not a fresh one.
        assert_eq!(registry.get_or_create::<A>().get(e0).map(|a| a.0), Some(7));
        assert_eq!(registry.store_count(), 1);
    }

    #[test]
    fn test_stores_are_per_type() {
        let mut registry = StoreRegistry::new();
        let e0 = entity(0);

        registry.get_or_create::<A>().insert(e0, A(1));
        registry.get_or_create::<B>().insert(e0, B(2));

        assert_eq!(registry.get::<A>().unwrap().get(e0).map(|a| a.0), Some(1));
        assert_eq!(registry.get::<B>().unwrap().get(e0).map(|b| b.0), Some(2));
        assert_eq!(registry.store_count(), 2);
    }

    #[test]
    fn test_erased_lookup() {
        let mut registry = StoreRegistry::new();
        let e0 = entity(0);
        registry.get_or_create::<A>().insert(e0, A(1));

        let erased = registry.erased(TypeId::of::<A>()).unwrap();
        assert!(erased.contains(e0));
        assert!(registry.erased(TypeId::of::<B>()).is_none());
    }

    #[test]
    fn test_iter_mut_covers_all_stores() {
        let mut registry = StoreRegistry::new();
        let e0 = entity(0);

        registry.get_or_create::<A>().insert(e0, A(1));
        registry.get_or_create::<B>().insert(e0, B(2));

        for store in registry.iter_mut() {
            store.remove(e0);
        }

        assert!(registry.get::<A>().unwrap().is_empty());
        assert!(registry.get::<B>().unwrap().is_empty());
    }
}
