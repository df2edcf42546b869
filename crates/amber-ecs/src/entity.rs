//! Entity identifiers with generational indices.
//!
//! Entities pack a recyclable index and a generation counter into one
//! comparable, hashable value. Generation *parity* encodes liveness: a
//! slot's counter is bumped once on create (odd = live) and once on
//! destroy (even = dead), so a handle captured before a destroy/recreate
//! cycle carries a stale generation and fails validation.

use std::{collections::VecDeque, fmt};

/// Generation counter to detect stale entity references.
///
/// Starts at 0 (never issued) and is incremented exactly once per create
/// and once per destroy of its slot, so odd means live.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Generation(u32);

impl Generation {
    /// Create a new generation (starts at 0, dead).
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Increment the generation counter.
    #[must_use]
    pub const fn bump(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Whether this generation marks a live slot (odd parity).
    #[must_use]
    pub const fn is_live(self) -> bool {
        self.0 & 1 == 1
    }

    /// Get the raw generation value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

/// Raw entity index into the slot table.
pub type EntityId = u32;

/// A unique identifier for an entity.
///
/// Entities are free-floating handles with no intrinsic data, compared by
/// value: an index into the slot table plus the generation the slot had
/// when the handle was issued.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    /// Index into the slot table.
    id: EntityId,
    /// Generation the slot had when this handle was issued.
    generation: Generation,
}

impl Entity {
    /// Create an entity handle from an index and generation.
    #[must_use]
    pub const fn new(id: EntityId, generation: Generation) -> Self {
        Self { id, generation }
    }

    /// Get the entity's index.
    #[must_use]
    pub const fn id(self) -> EntityId {
        self.id
    }

    /// Get the entity's generation.
    #[must_use]
    pub const fn generation(self) -> Generation {
        self.generation
    }

    /// Pack the entity into a single u64 for storage or transmission.
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        ((self.generation.0 as u64) << 32) | (self.id as u64)
    }

    /// Unpack an entity from a u64.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            id: bits as u32,
            generation: Generation((bits >> 32) as u32),
        }
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}v{})", self.id, self.generation.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.id, self.generation.0)
    }
}

/// Allocator for entity handles with generation tracking.
///
/// Owns the index pool (a FIFO free list plus a monotonically-growing
/// issue counter bounded by a doubling capacity sentinel) and the
/// per-slot generation table. An index is always in exactly one state:
/// never issued, free, or live.
pub struct EntityAllocator {
    /// Generation for each issued slot.
    generations: Vec<Generation>,
    /// Released indices awaiting reuse, recycled oldest-first.
    free: VecDeque<EntityId>,
    /// Growth sentinel: indices below this may be issued without growing.
    capacity: u32,
    /// Number of currently live entities.
    alive_count: u32,
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityAllocator {
    /// Create a new entity allocator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            generations: Vec::new(),
            free: VecDeque::new(),
            capacity: 0,
            alive_count: 0,
        }
    }

    /// Create an allocator with a capacity hint.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: Vec::with_capacity(capacity),
            free: VecDeque::new(),
            capacity: capacity as u32,
            alive_count: 0,
        }
    }

    /// Create a new entity. Never fails: an exhausted pool grows instead.
    pub fn create(&mut self) -> Entity {
        self.alive_count += 1;

        if let Some(id) = self.free.pop_front() {
            // Recycle the oldest released slot; the bump makes it odd again.
            let generation = self.generations[id as usize].bump();
            self.generations[id as usize] = generation;
            debug_assert!(generation.is_live());
            return Entity::new(id, generation);
        }

        if self.generations.len() as u32 == self.capacity {
            self.grow();
        }

        let id = self.generations.len() as EntityId;
        let generation = Generation::new().bump();
        self.generations.push(generation);
        Entity::new(id, generation)
    }

    /// Destroy an entity, releasing its index for reuse.
    ///
    /// The caller must pass a currently-valid entity; destroying a stale
    /// or dead handle is a contract violation (checked in debug builds).
    pub fn destroy(&mut self, entity: Entity) {
        debug_assert!(
            self.is_valid(entity),
            "destroy of an invalid entity: {entity}"
        );

        let slot = &mut self.generations[entity.id() as usize];
        *slot = slot.bump();
        debug_assert!(!slot.is_live());

        self.free.push_back(entity.id());
        self.alive_count -= 1;
    }

    /// Check if an entity handle is currently valid.
    ///
    /// True iff the slot exists, its generation matches the handle, and
    /// that generation is odd (live).
    #[must_use]
    pub fn is_valid(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.id() as usize)
            .is_some_and(|&generation| generation == entity.generation() && generation.is_live())
    }

    /// Get the number of currently live entities.
    #[must_use]
    pub const fn alive_count(&self) -> u32 {
        self.alive_count
    }

    /// Get the current capacity sentinel (issued + issuable slots).
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Double the capacity sentinel, keeping amortized create O(1).
    fn grow(&mut self) {
        self.capacity = self.capacity.saturating_mul(2).max(4);
        self.generations
            .reserve(self.capacity as usize - self.generations.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_bits_roundtrip() {
        let entity = Entity::new(12345, Generation(67890));
        let bits = entity.to_bits();
        let recovered = Entity::from_bits(bits);
        assert_eq!(entity, recovered);
        assert_eq!(recovered.id(), 12345);
        assert_eq!(recovered.generation().get(), 67890);
    }

    #[test]
    fn test_generation_parity() {
        let generation = Generation::new();
        assert!(!generation.is_live());
        assert!(generation.bump().is_live());
        assert!(!generation.bump().bump().is_live());
    }

    #[test]
    fn test_create_is_valid() {
        let mut allocator = EntityAllocator::new();

        let e1 = allocator.create();
        let e2 = allocator.create();

        assert_eq!(e1.id(), 0);
        assert_eq!(e2.id(), 1);
        assert_ne!(e1, e2);
        assert!(allocator.is_valid(e1));
        assert!(allocator.is_valid(e2));
        assert_eq!(allocator.alive_count(), 2);
        // First issue bumps the slot to its first odd generation.
        assert!(e1.generation().is_live());
    }

    #[test]
    fn test_destroy_invalidates() {
        let mut allocator = EntityAllocator::new();

        let e1 = allocator.create();
        allocator.destroy(e1);

        assert!(!allocator.is_valid(e1));
        assert_eq!(allocator.alive_count(), 0);
    }

    #[test]
    fn test_recycled_slot_gets_new_generation() {
        let mut allocator = EntityAllocator::new();

        let e1 = allocator.create();
        allocator.destroy(e1);

        let e2 = allocator.create();
        assert_eq!(e2.id(), e1.id());
        assert_ne!(e2.generation(), e1.generation());
        assert!(allocator.is_valid(e2));
        // The old handle stays invalid even though the index is live again.
        assert!(!allocator.is_valid(e1));
    }

    #[test]
    fn test_fifo_recycling() {
        let mut allocator = EntityAllocator::new();

        let e0 = allocator.create();
        let e1 = allocator.create();
        let e2 = allocator.create();
        allocator.destroy(e1);
        allocator.destroy(e0);
        allocator.destroy(e2);

        // Released indices come back oldest-first.
        assert_eq!(allocator.create().id(), e1.id());
        assert_eq!(allocator.create().id(), e0.id());
        assert_eq!(allocator.create().id(), e2.id());
    }

    #[test]
    fn test_no_aliasing_across_recycling() {
        let mut allocator = EntityAllocator::new();
        let mut retired = Vec::new();
        let mut live = Vec::new();

        for round in 0..8 {
            for _ in 0..4 {
                live.push(allocator.create());
            }
            if round % 2 == 0 {
                for entity in live.drain(..2) {
                    allocator.destroy(entity);
                    retired.push(entity);
                }
            }
        }

        for &entity in &live {
            assert!(allocator.is_valid(entity));
        }
        for &entity in &retired {
            assert!(!allocator.is_valid(entity));
        }
        // Distinct live handles, by value.
        for (i, &a) in live.iter().enumerate() {
            for &b in &live[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_capacity_doubles() {
        let mut allocator = EntityAllocator::with_capacity(2);
        assert_eq!(allocator.capacity(), 2);

        allocator.create();
        allocator.create();
        assert_eq!(allocator.capacity(), 2);

        allocator.create();
        assert_eq!(allocator.capacity(), 4);

        allocator.create();
        allocator.create();
        assert_eq!(allocator.capacity(), 8);
    }

    #[test]
    fn test_growth_from_empty() {
        let mut allocator = EntityAllocator::new();

        for _ in 0..1000 {
            allocator.create();
        }
        assert_eq!(allocator.alive_count(), 1000);
        assert!(allocator.capacity() >= 1000);
    }
}
