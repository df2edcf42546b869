//! Lazy filtered iteration over entities by component signature.
//!
//! A view takes one *driving* store's dense entity sequence as its
//! candidate stream and filters it by presence in the positive stores
//! and absence in the negative (excluded) stores. Filtering is pull
//! based: the predicate runs as each candidate is visited, so per-query
//! cost is proportional to the driving set, never the full entity count.

use std::{any::TypeId, slice};

use smallvec::SmallVec;

use crate::{
    component::Component,
    entity::Entity,
    registry::StoreRegistry,
    storage::ErasedStore,
};

/// Inline capacity for filter-term lists; most views name a few types.
type Terms<'w> = SmallVec<[&'w dyn ErasedStore; 4]>;

/// A filtered view over entities.
///
/// Built from the component manager with a driving type `M`
/// (`components.view::<M>()`), then narrowed with [`include`](Self::include)
/// and [`exclude`](Self::exclude). Each view is an independent, immutable
/// specification over shared store borrows: extending one yields a new
/// view and leaves the base view usable.
///
/// A named type whose store was never created behaves as an empty store:
/// as the driving or a positive type it yields zero matches, as a
/// negative type it excludes nothing.
#[derive(Clone)]
pub struct View<'w> {
    stores: &'w StoreRegistry,
    /// Candidate stream: the driving store's dense entity array.
    driving: &'w [Entity],
    include: Terms<'w>,
    exclude: Terms<'w>,
}

impl<'w> View<'w> {
    /// Build a view driven by the store of `M`.
    pub(crate) fn of<M: Component>(stores: &'w StoreRegistry) -> Self {
        let driving = stores
            .erased(TypeId::of::<M>())
            .map_or(&[][..], ErasedStore::entities);
        Self {
            stores,
            driving,
            include: Terms::new(),
            exclude: Terms::new(),
        }
    }

    /// Require candidates to also have a component of type `P`.
    #[must_use]
    pub fn include<P: Component>(&self) -> Self {
        let mut view = self.clone();
        match self.stores.erased(TypeId::of::<P>()) {
            Some(store) => view.include.push(store),
            // No store for P: nothing can satisfy the requirement.
            None => view.driving = &[],
        }
        view
    }

    /// Reject candidates that have a component of type `Q`.
    ///
    /// Excluding the driving type (or any included type) is a
    /// contradiction that yields zero matches, not an error.
    #[must_use]
    pub fn exclude<Q: Component>(&self) -> Self {
        let mut view = self.clone();
        if let Some(store) = self.stores.erased(TypeId::of::<Q>()) {
            view.exclude.push(store);
        }
        view
    }

    /// Check whether a single entity satisfies this view's signature.
    ///
    /// The entity must also be in the driving store to appear in
    /// iteration; this checks only the filter terms.
    #[must_use]
    pub fn matches(&self, entity: Entity) -> bool {
        self.include.iter().all(|store| store.contains(entity))
            && self.exclude.iter().all(|store| !store.contains(entity))
    }

    /// Iterate over matching entities.
    ///
    /// A single forward pass over the driving store that advances past
    /// failing candidates. Restartable: each call starts over on the
    /// live contents.
    #[must_use]
    pub fn iter(&self) -> ViewIter<'w> {
        ViewIter {
            candidates: self.driving.iter(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

impl<'w> IntoIterator for &View<'w> {
    type Item = Entity;
    type IntoIter = ViewIter<'w>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'w> IntoIterator for View<'w> {
    type Item = Entity;
    type IntoIter = ViewIter<'w>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entities matching a [`View`].
pub struct ViewIter<'w> {
    candidates: slice::Iter<'w, Entity>,
    include: Terms<'w>,
    exclude: Terms<'w>,
}

impl Iterator for ViewIter<'_> {
    type Item = Entity;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let &entity = self.candidates.next()?;
            if self.include.iter().all(|store| store.contains(entity))
                && self.exclude.iter().all(|store| !store.contains(entity))
            {
                return Some(entity);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // Every remaining candidate may pass or fail the predicate.
        (0, Some(self.candidates.len()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::component::Components;
    use crate::entity::Generation;

    fn entity(id: u32) -> Entity {
        Entity::new(id, Generation::new().bump())
    }

    fn collect(view: &View<'_>) -> HashSet<Entity> {
        view.iter().collect()
    }

    #[derive(Debug, Clone, PartialEq)]
    struct A(i32);

    #[derive(Debug, Clone, PartialEq)]
    struct B(i32);

    #[derive(Debug, Clone, PartialEq)]
    struct C(i32);

    /// The worked example: a has A, b has B, c has both.
    fn abc() -> (Components, Entity, Entity, Entity) {
        let mut components = Components::new();
        let a = entity(0);
        let b = entity(1);
        let c = entity(2);
        components.insert(a, A(0));
        components.insert(b, B(1));
        components.insert(c, A(2));
        components.insert(c, B(3));
        (components, a, b, c)
    }

    #[test]
    fn test_single_type_view() {
        let (components, a, b, c) = abc();

        assert_eq!(collect(&components.view::<A>()), HashSet::from([a, c]));
        assert_eq!(collect(&components.view::<B>()), HashSet::from([b, c]));
    }

    #[test]
    fn test_intersection() {
        let (components, _a, _b, c) = abc();

        let view = components.view::<A>().include::<B>();
        assert_eq!(collect(&view), HashSet::from([c]));

        // Symmetric in either driving order.
        let view = components.view::<B>().include::<A>();
        assert_eq!(collect(&view), HashSet::from([c]));
    }

    #[test]
    fn test_exclusion() {
        let (components, a, b, _c) = abc();

        let view = components.view::<A>().exclude::<B>();
        assert_eq!(collect(&view), HashSet::from([a]));

        let view = components.view::<B>().exclude::<A>();
        assert_eq!(collect(&view), HashSet::from([b]));
    }

    #[test]
    fn test_exclude_leaves_base_view_intact() {
        let (components, a, _b, c) = abc();

        let base = components.view::<A>();
        let narrowed = base.exclude::<B>();

        assert_eq!(collect(&narrowed), HashSet::from([a]));
        // The base view is an independent specification.
        assert_eq!(collect(&base), HashSet::from([a, c]));
    }

    #[test]
    fn test_contradiction_yields_nothing() {
        let (components, _a, _b, _c) = abc();

        let view = components.view::<A>().exclude::<A>();
        assert_eq!(view.iter().count(), 0);

        let view = components.view::<A>().include::<B>().exclude::<B>();
        assert_eq!(view.iter().count(), 0);
    }

    #[test]
    fn test_empty_driving_store() {
        let mut components = Components::new();
        components.insert(entity(0), A(0));
        components.remove::<A>(entity(0));

        assert_eq!(components.view::<A>().iter().count(), 0);
    }

    #[test]
    fn test_never_used_types() {
        let (components, a, _b, c) = abc();

        // Driving type never used: nothing to iterate.
        assert_eq!(components.view::<C>().iter().count(), 0);
        // Positive type never used: nothing can match.
        assert_eq!(components.view::<A>().include::<C>().iter().count(), 0);
        // Negative type never used: excludes nothing.
        assert_eq!(
            collect(&components.view::<A>().exclude::<C>()),
            HashSet::from([a, c])
        );
    }

    #[test]
    fn test_view_is_restartable() {
        let (components, ..) = abc();

        let view = components.view::<A>();
        assert_eq!(view.iter().count(), 2);
        assert_eq!(view.iter().count(), 2);
    }

    #[test]
    fn test_matches() {
        let (components, a, b, c) = abc();

        let view = components.view::<A>().include::<B>();
        assert!(view.matches(c));
        assert!(!view.matches(a));
        assert!(!view.matches(b));
    }

    #[test]
    fn test_size_hint_upper_bound() {
        let (components, ..) = abc();

        let view = components.view::<A>().exclude::<B>();
        let iter = view.iter();
        let (lower, upper) = iter.size_hint();
        assert_eq!(lower, 0);
        assert_eq!(upper, Some(2));
    }
}
