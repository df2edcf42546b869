//! Component trait and the component manager facade.
//!
//! Components are plain values attached to exactly one entity at a time.
//! The [`Components`] facade owns the store registry and exposes the
//! per-type operations plus [`clean`](Components::clean), the
//! all-types purge used at entity destruction.

use tracing::trace;

use crate::{entity::Entity, registry::StoreRegistry, view::View};

/// Marker trait for types that can be used as components.
///
/// Blanket-implemented: any `Send + Sync + 'static` type qualifies.
pub trait Component: Send + Sync + 'static {}

impl<T: Send + Sync + 'static> Component for T {}

/// Manager for all component stores.
///
/// Stores are created lazily on first insert of a type and live for the
/// lifetime of the manager (or until explicitly cleared).
#[derive(Default)]
pub struct Components {
    stores: StoreRegistry,
}

impl Components {
    /// Create a new empty component manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stores: StoreRegistry::new(),
        }
    }

    /// Check if an entity has a component of type `T`.
    ///
    /// False when no store for `T` exists yet.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.stores
            .get::<T>()
            .is_some_and(|store| store.contains(entity))
    }

    /// Attach a component to an entity, creating the store on first use.
    ///
    /// Re-inserting for the same entity silently overwrites and returns
    /// the previous value; call sites rely on this for idempotent
    /// reattachment.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        self.stores.get_or_create::<T>().insert(entity, component)
    }

    /// Get a reference to an entity's component of type `T`.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.stores.get::<T>()?.get(entity)
    }

    /// Get a mutable reference to an entity's component of type `T`.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.stores.get_mut::<T>()?.get_mut(entity)
    }

    /// Detach and return an entity's component of type `T`.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.stores.get_mut::<T>()?.remove(entity)
    }

    /// Empty the store for `T`. No-op if the type was never used.
    pub fn remove_all<T: Component>(&mut self) {
        if let Some(store) = self.stores.get_mut::<T>() {
            store.clear();
        }
    }

    /// Remove the entity from every store that contains it.
    ///
    /// Called exactly once per entity, at destruction, so no component of
    /// any type outlives its owner.
    pub fn clean(&mut self, entity: Entity) {
        trace!("cleaning components of {entity}");
        for store in self.stores.iter_mut() {
            store.remove(entity);
        }
    }

    /// Empty every store of every type.
    pub fn clear_all(&mut self) {
        for store in self.stores.iter_mut() {
            store.clear();
        }
    }

    /// Get the number of entities holding a component of type `T`.
    #[must_use]
    pub fn count<T: Component>(&self) -> usize {
        self.stores.get::<T>().map_or(0, |store| store.len())
    }

    /// Get the number of distinct component types ever used.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.stores.store_count()
    }

    /// Build a view driven by the store of `M`.
    ///
    /// Extend it with [`View::include`] and [`View::exclude`].
    #[must_use]
    pub fn view<M: Component>(&self) -> View<'_> {
        View::of::<M>(&self.stores)
    }
}
