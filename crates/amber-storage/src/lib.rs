//! Dense key-value storage primitives for the Amber entity-component engine.
//!
//! The central type is [`DenseMap`]: a map whose keys and values live in
//! paired, gap-free arrays, with a side hash index from key to array
//! position. Lookups are O(1) through the index; iteration walks the dense
//! arrays directly, which is what makes per-frame scans cheap.
//!
//! Removal uses *swap-erase*: the last element is moved into the vacated
//! slot and the moved key's recorded position is fixed up. Storage stays
//! contiguous with no tombstones, at the cost of not preserving insertion
//! order across removals.

mod dense;

pub use dense::DenseMap;
