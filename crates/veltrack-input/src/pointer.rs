//! Pointer identifiers and the 32-bit pointer id set.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

/// Identifies one concurrently tracked contact point.
pub type PointerId = u32;

/// Maximum number of pointers tracked in a single sample.
pub const MAX_POINTERS: usize = 16;

/// Largest valid pointer id.
pub const MAX_POINTER_ID: PointerId = 31;

/// Set of pointer ids, one bit per id.
///
/// Per-pointer values that accompany a set are stored densely in increasing
/// id order, so the slot of an id is its rank within the set (see
/// [`PointerIdBits::index_of`]).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PointerIdBits(u32);

impl PointerIdBits {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Returns an empty set.
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Creates a set from its raw bit representation.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Creates a set holding a single id.
    pub fn with_id(id: PointerId) -> Self {
        Self(Self::bit(id))
    }

    /// Creates a set from a list of ids.
    pub fn from_ids(ids: impl IntoIterator<Item = PointerId>) -> Self {
        let mut bits = Self::empty();
        for id in ids {
            bits.insert(id);
        }
        bits
    }

    /// Returns the raw bit representation.
    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of ids in the set.
    pub const fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn contains(self, id: PointerId) -> bool {
        id <= MAX_POINTER_ID && self.0 & (1 << id) != 0
    }

    /// Returns whether the two sets share at least one id.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub fn insert(&mut self, id: PointerId) {
        self.0 |= Self::bit(id);
    }

    pub fn remove(&mut self, id: PointerId) {
        self.0 &= !Self::bit(id);
    }

    /// Ids of `self` that are not in `other`.
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Lowest id in the set.
    pub const fn first(self) -> Option<PointerId> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros())
        }
    }

    /// Highest id in the set.
    pub const fn last(self) -> Option<PointerId> {
        if self.0 == 0 {
            None
        } else {
            Some(31 - self.0.leading_zeros())
        }
    }

    /// Removes and returns the highest id.
    pub fn clear_last(&mut self) -> Option<PointerId> {
        let id = self.last()?;
        self.remove(id);
        Some(id)
    }

    /// Dense storage slot of `id`: the number of ids below it in the set.
    pub fn index_of(self, id: PointerId) -> usize {
        assert!(id <= MAX_POINTER_ID, "Invalid pointer id {}", id);
        (self.0 & !(u32::MAX << id)).count_ones() as usize
    }

    /// Iterates ids in increasing order.
    pub fn iter(self) -> PointerIdIter {
        PointerIdIter { remaining: self }
    }

    fn bit(id: PointerId) -> u32 {
        assert!(
            id <= MAX_POINTER_ID,
            "Invalid pointer id {} (max {})",
            id,
            MAX_POINTER_ID
        );
        1 << id
    }
}

impl fmt::Debug for PointerIdBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PointerIdBits(0x{:08x})", self.0)
    }
}

impl BitOr for PointerIdBits {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for PointerIdBits {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for PointerIdBits {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl IntoIterator for PointerIdBits {
    type Item = PointerId;
    type IntoIter = PointerIdIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<PointerId> for PointerIdBits {
    fn from_iter<T: IntoIterator<Item = PointerId>>(iter: T) -> Self {
        Self::from_ids(iter)
    }
}

/// Iterator over the ids of a [`PointerIdBits`], lowest first.
#[derive(Clone, Debug)]
pub struct PointerIdIter {
    remaining: PointerIdBits,
}

impl Iterator for PointerIdIter {
    type Item = PointerId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.remaining.first()?;
        self.remaining.remove(id);
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.remaining.count();
        (count, Some(count))
    }
}

impl ExactSizeIterator for PointerIdIter {}

#[cfg(test)]
#[path = "tests/pointer_tests.rs"]
mod tests;
