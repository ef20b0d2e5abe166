use super::grid::Grid;
use super::session_rng::SessionRng;
use super::types::{CellValue, Position};
use crate::defaults::MAX_PLACEMENT_ATTEMPTS;

/// A blocked cell. Obstacles are interchangeable; only the position matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Obstacle {
    position: Position,
}

impl Obstacle {
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn positions(&self) -> Vec<Position> {
        self.obstacles.iter().map(Obstacle::position).collect()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.obstacles.iter().any(|obstacle| obstacle.position == pos)
    }

    /// Drops every obstacle and empties its cell. Returns the vacated cells.
    pub(crate) fn clear(&mut self, grid: &mut Grid) -> Vec<Position> {
        let vacated = self.positions();
        for &pos in &vacated {
            grid.set(pos, CellValue::Empty);
        }
        self.obstacles.clear();
        vacated
    }

    /// Places up to `count` obstacles on empty cells that are not in
    /// `excluded`, returning how many were placed.
    ///
    /// Each obstacle gets a bounded number of random draws. Past that the free
    /// cells are enumerated; `excluded` cells are used only when nothing else
    /// is free. A full board yields fewer obstacles than requested.
    pub(crate) fn place(
        &mut self,
        count: usize,
        grid: &mut Grid,
        rng: &mut SessionRng,
        excluded: &[Position],
    ) -> usize {
        let mut placed = 0;
        for _ in 0..count {
            let Some(pos) = find_free_cell(grid, rng, excluded) else {
                break;
            };
            self.obstacles.push(Obstacle::new(pos));
            grid.set(pos, CellValue::Obstacle);
            placed += 1;
        }
        placed
    }
}

fn find_free_cell(grid: &Grid, rng: &mut SessionRng, excluded: &[Position]) -> Option<Position> {
    if grid.rows() == 0 || grid.cols() == 0 {
        return None;
    }

    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let row = rng.random_range(0..grid.rows());
        let col = rng.random_range(0..grid.cols());
        let pos = Position::new(row as i32, col as i32);
        if grid.get(pos) == CellValue::Empty && !excluded.contains(&pos) {
            return Some(pos);
        }
    }

    let empty = grid.empty_positions();
    let preferred: Vec<Position> = empty
        .iter()
        .copied()
        .filter(|pos| !excluded.contains(pos))
        .collect();
    if preferred.is_empty() {
        rng.choose(&empty).copied()
    } else {
        rng.choose(&preferred).copied()
    }
}
