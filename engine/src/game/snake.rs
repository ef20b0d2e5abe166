use std::collections::VecDeque;

use super::types::Position;

/// Ordered snake segments, head first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SnakeBody {
    body: VecDeque<Position>,
}

impl SnakeBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> Position {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn tail(&self) -> Position {
        *self.body.back().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: &Position) -> bool {
        self.body.contains(pos)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    pub(crate) fn add_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    pub(crate) fn remove_tail(&mut self) -> Option<Position> {
        self.body.pop_back()
    }
}
