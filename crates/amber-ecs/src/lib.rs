//! Amber ECS - entity-component storage with generational handles.
//!
//! An in-memory store associating typed component values with
//! lightweight, recyclable entity identifiers, plus fast multi-criteria
//! membership queries (views). It is the substrate a simulation or
//! UI-state run loop iterates each frame.
//!
//! # Key Concepts
//!
//! - **Entity**: a generation-stamped identifier with no intrinsic data;
//!   stale handles fail validation forever, even after index reuse
//! - **Component**: a plain value attached to exactly one entity at a
//!   time, stored densely per type
//! - **View**: a lazy, filtered iteration over entities that have all
//!   required component types and none of the excluded ones
//!
//! # Example
//!
//! ```
//! use amber_ecs::World;
//!
//! struct Position { x: f32, y: f32 }
//! struct Velocity { dx: f32, dy: f32 }
//!
//! let mut world = World::new();
//! let e = world.create_entity();
//! world.insert(e, Position { x: 0.0, y: 0.0 });
//! world.insert(e, Velocity { dx: 1.0, dy: 0.0 });
//!
//! // A view borrows the stores it reads, so gather matches before mutating.
//! let moving: Vec<_> = world.view::<Position>().include::<Velocity>().iter().collect();
//! for entity in moving {
//!     let &Velocity { dx, dy } = world.get::<Velocity>(entity).unwrap();
//!     let position = world.get_mut::<Position>(entity).unwrap();
//!     position.x += dx;
//!     position.y += dy;
//! }
//!
//! world.destroy_entity(e);
//! assert!(!world.is_valid(e));
//! ```

mod component;
mod entity;
mod error;
mod registry;
mod storage;
mod view;
mod world;

pub use component::{Component, Components};
pub use entity::{Entity, EntityAllocator, EntityId, Generation};
pub use error::EcsError;
pub use storage::ComponentStore;
pub use view::{View, ViewIter};
pub use world::{EntityMut, EntityRef, World};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Component, Entity, View, World};
}
