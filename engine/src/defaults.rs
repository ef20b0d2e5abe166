use std::time::Duration;

pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 20;
pub const DEFAULT_OBSTACLE_COUNT: usize = 5;
pub const DEFAULT_OBSTACLE_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Largest accepted side length; keeps every cell addressable with `i32` coordinates.
pub const MAX_DIMENSION: usize = 1000;

pub const INITIAL_SNAKE_LENGTH: usize = 3;

/// Random draws per obstacle before falling back to scanning the free cells.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

pub const DIRECTION_BUFFER_CAPACITY: usize = 2;
