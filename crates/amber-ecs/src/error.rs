//! ECS error types.

use thiserror::Error;

use crate::entity::Entity;

/// Errors from the fallible parts of the world API.
///
/// Most operations in this engine are preconditioned rather than
/// fallible; this type covers the bound-entity surface, where a caller
/// hands in a handle the engine can actually check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EcsError {
    /// The entity handle is stale or was never created.
    #[error("entity is not alive: {0}")]
    NotAlive(Entity),

    /// The entity has no component of the requested type.
    #[error("missing component {component} on {entity}")]
    MissingComponent {
        /// The entity that was queried.
        entity: Entity,
        /// Type name of the missing component.
        component: &'static str,
    },
}
