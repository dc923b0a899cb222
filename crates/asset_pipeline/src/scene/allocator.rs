//! Hash-keyed identifier allocation
//!
//! Producers keep one allocator per entity kind while they populate a store.
//! The caller decides what the hash means: a spatial hash of a vertex
//! position deduplicates coincident vertices, a path hash reuses a texture
//! that several materials reference.

use crate::foundation::math::Vec3;
use crate::scene::ids::ObjectId;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Allocation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    /// The sequential counter left the configured `[min, max]` range
    #[error("{kind} id {next} is outside the allocatable range [{min}, {max}]")]
    RangeExhausted {
        /// Identifier type name
        kind: &'static str,
        /// The value the counter would have produced
        next: u64,
        /// Configured lower bound
        min: u32,
        /// Configured upper bound
        max: u32,
    },
}

/// Sequential, deduplicating identifier allocator for one entity kind
///
/// Not thread-safe by construction (`&mut self`); callers populating several
/// kinds in parallel shard by kind.
#[derive(Debug)]
pub struct IdAllocator<I: ObjectId> {
    min: u32,
    max: u32,
    next: u64,
    lookup: HashMap<u64, I>,
}

impl<I: ObjectId> Default for IdAllocator<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ObjectId> IdAllocator<I> {
    /// Allocator covering the full range of the identifier type
    pub fn new() -> Self {
        Self::with_range(I::MIN, I::MAX)
    }

    /// Allocator handing out identifiers in `[min, max]`, starting at `min`
    ///
    /// `max` is clamped below the invalid sentinel.
    pub fn with_range(min: u32, max: u32) -> Self {
        Self {
            min,
            max: max.min(I::MAX),
            next: u64::from(min),
            lookup: HashMap::new(),
        }
    }

    /// Change the range; existing mappings are kept
    ///
    /// The counter moves up to `min` if it is below it and never moves back,
    /// so an identifier already handed out is never issued again.
    pub fn set_range(&mut self, min: u32, max: u32) {
        self.min = min;
        self.max = max.min(I::MAX);
        self.next = self.next.max(u64::from(min));
    }

    /// Return the identifier for `hash`, allocating a new one on first sight
    ///
    /// The boolean is `true` when the identifier was already mapped to this
    /// hash, in which case the caller must not add a second entity.
    pub fn allocate(&mut self, hash: u64) -> Result<(I, bool), IdError> {
        if let Some(&id) = self.lookup.get(&hash) {
            return Ok((id, true));
        }

        let next = self.next;
        if next < u64::from(self.min) || next > u64::from(self.max) {
            return Err(IdError::RangeExhausted {
                kind: I::NAME,
                next,
                min: self.min,
                max: self.max,
            });
        }

        // `next <= max <= u32::MAX - 1` here
        let id = I::from_raw(next as u32);
        self.next += 1;
        self.lookup.insert(hash, id);
        Ok((id, false))
    }

    /// Number of distinct hashes seen so far
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// True if nothing has been allocated yet
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }
}

/// Spatial hash of a position
///
/// Bit-exact: `0.0` and `-0.0` hash differently, which is acceptable for
/// deduplicating vertices that come from the same source buffer.
pub fn hash_position(position: &Vec3) -> u64 {
    let mut hasher = DefaultHasher::new();
    position.x.to_bits().hash(&mut hasher);
    position.y.to_bits().hash(&mut hasher);
    position.z.to_bits().hash(&mut hasher);
    hasher.finish()
}

/// Hash of a name or file path
pub fn hash_name(name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}
