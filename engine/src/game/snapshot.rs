use super::grid::Grid;
use super::types::{DeathReason, Direction, Position};

/// Owned copy of everything a collaborator reads after a tick, taken under
/// the session lock so it is never torn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSnapshot {
    pub grid: Grid,
    /// Head first.
    pub snake: Vec<Position>,
    pub obstacles: Vec<Position>,
    pub food: Option<Position>,
    pub direction: Direction,
    pub buffered_directions: Vec<Direction>,
    pub score: u32,
    pub game_over: bool,
    pub death_reason: Option<DeathReason>,
    pub tick: u64,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    pub fn tail(&self) -> Option<Position> {
        self.snake.last().copied()
    }
}
