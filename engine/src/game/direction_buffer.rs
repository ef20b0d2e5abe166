use ringbuffer::{ConstGenericRingBuffer, RingBuffer};

use super::types::Direction;
use crate::defaults::DIRECTION_BUFFER_CAPACITY;

/// Turns accepted from input but not yet applied by a tick, oldest first.
///
/// A turn is accepted only while there is room and only if it neither repeats
/// nor reverses the turn before it (the last buffered one, or the active
/// direction when nothing is buffered). Anything else is dropped.
pub struct DirectionBuffer {
    pending: ConstGenericRingBuffer<Direction, DIRECTION_BUFFER_CAPACITY>,
}

impl DirectionBuffer {
    pub fn new() -> Self {
        Self {
            pending: ConstGenericRingBuffer::default(),
        }
    }

    fn last_direction(&self, active: Direction) -> Direction {
        self.pending.back().copied().unwrap_or(active)
    }

    pub fn can_accept(&self, direction: Direction, active: Direction) -> bool {
        if self.pending.is_full() {
            return false;
        }
        let last = self.last_direction(active);
        direction != last && !direction.is_opposite(&last)
    }

    /// Returns whether the turn was buffered.
    pub fn push(&mut self, direction: Direction, active: Direction) -> bool {
        if !self.can_accept(direction, active) {
            return false;
        }
        self.pending.push(direction);
        true
    }

    pub fn pop(&mut self) -> Option<Direction> {
        self.pending.dequeue()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn to_vec(&self) -> Vec<Direction> {
        self.pending.iter().copied().collect()
    }
}

impl Default for DirectionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DirectionBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.pending.iter()).finish()
    }
}
