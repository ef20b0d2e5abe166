/// A cell coordinate. Rows grow downwards, columns grow to the right.
///
/// Coordinates are signed so that a translated head can step off the board
/// and still be represented; the grid decides whether it is outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn translate(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self::new(self.row + d_row, self.col + d_col)
    }

    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(&self, other: &Direction) -> bool {
        self.opposite() == *other
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// What occupies a cell. `Outside` is what classification reports for
/// coordinates off the board; it is never stored in a [`super::Grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Snake,
    Food,
    Obstacle,
    Outside,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeathReason {
    WallCollision,
    SelfCollision,
    ObstacleCollision,
}
