//! Fixed-capacity ring of recent movements shared by the windowed strategies.

use veltrack_input::{PointerId, PointerIdBits, MAX_POINTERS};

/// Number of movements retained per axis.
pub const HISTORY_SIZE: usize = 20;

/// One sample: the pointers present at `event_time` and their positions,
/// packed in increasing id order.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Movement {
    pub event_time: i64,
    pub id_bits: PointerIdBits,
    positions: [f32; MAX_POINTERS],
}

impl Movement {
    /// Position of `id`. The id must be present.
    pub fn position(&self, id: PointerId) -> f32 {
        self.positions[self.id_bits.index_of(id)]
    }
}

#[derive(Clone, Debug)]
pub(crate) struct MovementHistory {
    movements: [Movement; HISTORY_SIZE],
    /// Slot of the newest movement.
    index: usize,
    len: usize,
}

impl Default for MovementHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MovementHistory {
    pub fn new() -> Self {
        Self {
            movements: [Movement::default(); HISTORY_SIZE],
            index: 0,
            len: 0,
        }
    }

    /// Records a movement, overwriting the oldest slot once full.
    ///
    /// With `coalesce`, a movement carrying the newest slot's timestamp
    /// replaces that slot instead of taking a new one.
    pub fn push(
        &mut self,
        event_time: i64,
        id_bits: PointerIdBits,
        positions: &[f32],
        coalesce: bool,
    ) {
        assert_eq!(
            positions.len(),
            id_bits.count(),
            "Mismatching number of positions for {:?}",
            id_bits
        );
        assert!(
            positions.len() <= MAX_POINTERS,
            "Too many pointers: {} (max {})",
            positions.len(),
            MAX_POINTERS
        );

        if self.len == 0 {
            self.index = 0;
            self.len = 1;
        } else if !(coalesce && self.movements[self.index].event_time == event_time) {
            self.index = Self::next(self.index);
            self.len = (self.len + 1).min(HISTORY_SIZE);
        }

        let movement = &mut self.movements[self.index];
        movement.event_time = event_time;
        movement.id_bits = id_bits;
        movement.positions[..positions.len()].copy_from_slice(positions);
    }

    /// Drops `id_bits` from the newest movement so estimates for them stop.
    pub fn clear_pointers(&mut self, id_bits: PointerIdBits) {
        if self.len > 0 {
            let newest = &mut self.movements[self.index];
            let remaining = newest.id_bits.difference(id_bits);
            // Positions are packed by rank, so the survivors move down.
            let mut packed = [0.0f32; MAX_POINTERS];
            for (slot, id) in remaining.iter().enumerate() {
                packed[slot] = newest.positions[newest.id_bits.index_of(id)];
            }
            newest.positions = packed;
            newest.id_bits = remaining;
        }
    }

    pub fn newest(&self) -> Option<&Movement> {
        (self.len > 0).then(|| &self.movements[self.index])
    }

    pub fn newest_index(&self) -> usize {
        self.index
    }

    pub fn get(&self, index: usize) -> &Movement {
        &self.movements[index]
    }

    /// Slot after `index` in ring order.
    pub fn next(index: usize) -> usize {
        (index + 1) % HISTORY_SIZE
    }

    fn previous(index: usize) -> usize {
        (index + HISTORY_SIZE - 1) % HISTORY_SIZE
    }

    /// Walks backwards from the newest movement, yielding `(slot, movement)`
    /// while `id` is present and the movement is at most `horizon`
    /// nanoseconds older than the newest.
    pub fn recent(&self, id: PointerId, horizon: i64) -> RecentMovements<'_> {
        RecentMovements {
            history: self,
            id,
            horizon,
            newest_time: self.newest().map_or(0, |movement| movement.event_time),
            cursor: self.index,
            remaining: self.len,
        }
    }
}

pub(crate) struct RecentMovements<'a> {
    history: &'a MovementHistory,
    id: PointerId,
    horizon: i64,
    newest_time: i64,
    cursor: usize,
    remaining: usize,
}

impl<'a> Iterator for RecentMovements<'a> {
    type Item = (usize, &'a Movement);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.cursor;
        let movement = &self.history.movements[index];
        if !movement.id_bits.contains(self.id) || self.newest_time - movement.event_time > self.horizon
        {
            self.remaining = 0;
            return None;
        }
        self.cursor = MovementHistory::previous(index);
        self.remaining -= 1;
        Some((index, movement))
    }
}

#[cfg(test)]
#[path = "tests/history_tests.rs"]
mod tests;
