use super::types::{CellValue, Position};

/// Row-major board of cell values.
///
/// The grid is an index over the snake, the obstacles and the food; the
/// owning [`super::GameState`] keeps it in step with those entities.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<CellValue>,
    rows: usize,
    cols: usize,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cells: vec![CellValue::Empty; rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn outside_grid(&self, pos: Position) -> bool {
        self.index(pos).is_none()
    }

    fn index(&self, pos: Position) -> Option<usize> {
        let row = usize::try_from(pos.row).ok()?;
        let col = usize::try_from(pos.col).ok()?;
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }

    /// Stored value at `pos`, or `Outside` when `pos` is off the board.
    pub fn get(&self, pos: Position) -> CellValue {
        self.index(pos).map_or(CellValue::Outside, |idx| self.cells[idx])
    }

    /// Off-board positions are ignored.
    pub fn set(&mut self, pos: Position, value: CellValue) {
        debug_assert_ne!(value, CellValue::Outside, "Outside is never stored in the grid");
        if let Some(idx) = self.index(pos) {
            self.cells[idx] = value;
        }
    }

    pub fn row(&self, row: usize) -> &[CellValue] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| Position::new(row as i32, col as i32))
        })
    }

    pub fn positions_of(&self, value: CellValue) -> Vec<Position> {
        self.positions().filter(|&pos| self.get(pos) == value).collect()
    }

    pub fn empty_positions(&self) -> Vec<Position> {
        self.positions_of(CellValue::Empty)
    }

    pub fn count(&self, value: CellValue) -> usize {
        self.cells.iter().filter(|&&cell| cell == value).count()
    }
}
