//! World - the entity-component manager.
//!
//! The `World` composes the entity allocator with the component manager:
//! entities are created here, components attach to them by key, and
//! destruction purges an entity's footprint from every store before its
//! index is released. It is single-threaded by design; the surrounding
//! run loop is expected to serialize all mutation and iteration.

use std::any::type_name;

use tracing::trace;

use crate::{
    component::{Component, Components},
    entity::{Entity, EntityAllocator},
    error::EcsError,
    view::View,
};

/// Default entity capacity hint for [`World::new`].
const DEFAULT_CAPACITY: usize = 1024;

/// The entity-component manager.
pub struct World {
    /// Entity allocator: index pool plus generation table.
    entities: EntityAllocator,
    /// Component manager: one dense store per component type.
    components: Components,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new world with the default capacity hint.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a world with an entity capacity hint.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: EntityAllocator::with_capacity(capacity),
            components: Components::new(),
        }
    }

    // ==================== Entity Operations ====================

    /// Create a new entity. It initially owns no components.
    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.create();
        trace!("created {entity}");
        entity
    }

    /// Destroy an entity, dropping its components of every type first.
    ///
    /// The caller must pass a currently-valid entity (checked in debug
    /// builds). Cleaning precedes index release so a recycled index can
    /// never appear to own stale data.
    pub fn destroy_entity(&mut self, entity: Entity) {
        debug_assert!(
            self.is_valid(entity),
            "destroy of an invalid entity: {entity}"
        );
        trace!("destroying {entity}");
        self.components.clean(entity);
        self.entities.destroy(entity);
    }

    /// Check if an entity handle is currently valid.
    #[must_use]
    pub fn is_valid(&self, entity: Entity) -> bool {
        self.entities.is_valid(entity)
    }

    /// Get the number of currently live entities.
    #[must_use]
    pub fn entity_count(&self) -> u32 {
        self.entities.alive_count()
    }

    // ==================== Component Operations ====================

    /// Check if an entity has a component of type `T`.
    #[must_use]
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.components.has::<T>(entity)
    }

    /// Get a reference to an entity's component of type `T`.
    #[must_use]
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.components.get::<T>(entity)
    }

    /// Get a mutable reference to an entity's component of type `T`.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.components.get_mut::<T>(entity)
    }

    /// Attach a component to an entity.
    ///
    /// Re-inserting the same type silently overwrites and returns the
    /// previous value.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) -> Option<T> {
        self.components.insert(entity, component)
    }

    /// Detach and return an entity's component of type `T`.
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.components.remove::<T>(entity)
    }

    /// Drop every component of type `T`, for all entities.
    pub fn remove_all<T: Component>(&mut self) {
        self.components.remove_all::<T>();
    }

    /// Drop every component of every type. Entities stay alive.
    pub fn clear_components(&mut self) {
        self.components.clear_all();
    }

    // ==================== Views ====================

    /// Build a view driven by the store of `M`.
    ///
    /// ```
    /// # use amber_ecs::World;
    /// # struct Position(f32);
    /// # struct Velocity(f32);
    /// # struct Frozen;
    /// # let mut world = World::new();
    /// # let e = world.create_entity();
    /// # world.insert(e, Position(0.0));
    /// # world.insert(e, Velocity(1.0));
    /// for entity in world.view::<Position>().include::<Velocity>().exclude::<Frozen>().iter() {
    ///     // integrate motion
    /// }
    /// ```
    #[must_use]
    pub fn view<M: Component>(&self) -> View<'_> {
        self.components.view::<M>()
    }

    // ==================== Bound Entities ====================

    /// Bind a live entity to the world for read access.
    pub fn entity(&self, entity: Entity) -> Result<EntityRef<'_>, EcsError> {
        if !self.is_valid(entity) {
            return Err(EcsError::NotAlive(entity));
        }
        Ok(EntityRef {
            world: self,
            entity,
        })
    }

    /// Bind a live entity to the world for read-write access.
    pub fn entity_mut(&mut self, entity: Entity) -> Result<EntityMut<'_>, EcsError> {
        if !self.is_valid(entity) {
            return Err(EcsError::NotAlive(entity));
        }
        Ok(EntityMut {
            world: self,
            entity,
        })
    }
}

/// A live entity bound to a shared borrow of its world.
#[derive(Clone, Copy)]
pub struct EntityRef<'w> {
    world: &'w World,
    entity: Entity,
}

impl<'w> EntityRef<'w> {
    /// The bound entity handle.
    #[must_use]
    pub const fn id(&self) -> Entity {
        self.entity
    }

    /// Check if the bound entity has a component of type `T`.
    #[must_use]
    pub fn has<T: Component>(&self) -> bool {
        self.world.has::<T>(self.entity)
    }

    /// Get a reference to a component of the bound entity.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<&'w T> {
        self.world.get::<T>(self.entity)
    }
}

/// A live entity bound to an exclusive borrow of its world.
pub struct EntityMut<'w> {
    world: &'w mut World,
    entity: Entity,
}

impl EntityMut<'_> {
    /// The bound entity handle.
    #[must_use]
    pub const fn id(&self) -> Entity {
        self.entity
    }

    /// Check if the bound entity has a component of type `T`.
    #[must_use]
    pub fn has<T: Component>(&self) -> bool {
        self.world.has::<T>(self.entity)
    }

    /// Get a reference to a component of the bound entity.
    #[must_use]
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.world.get::<T>(self.entity)
    }

    /// Get a mutable reference to a component of the bound entity.
    #[must_use]
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.world.get_mut::<T>(self.entity)
    }

    /// Attach a component to the bound entity, overwriting any previous
    /// value of the same type.
    pub fn insert<T: Component>(&mut self, component: T) -> &mut Self {
        self.world.insert(self.entity, component);
        self
    }

    /// Detach and return a component of the bound entity.
    pub fn remove<T: Component>(&mut self) -> Result<T, EcsError> {
        self.world
            .remove::<T>(self.entity)
            .ok_or(EcsError::MissingComponent {
                entity: self.entity,
                component: type_name::<T>(),
            })
    }

    /// Destroy the bound entity, consuming the binding.
    pub fn destroy(self) {
        self.world.destroy_entity(self.entity);
    }
}
