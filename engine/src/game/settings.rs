use std::time::Duration;

use crate::GameError;
use crate::defaults::{
    DEFAULT_COLS, DEFAULT_OBSTACLE_COUNT, DEFAULT_OBSTACLE_REFRESH_INTERVAL, DEFAULT_ROWS,
    INITIAL_SNAKE_LENGTH, MAX_DIMENSION,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSettings {
    pub rows: usize,
    pub cols: usize,
    pub obstacle_count: usize,
    /// Period of the obstacle refresh, in whole seconds.
    pub obstacle_refresh_interval: Duration,
}

impl GameSettings {
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.rows == 0
            || self.cols < INITIAL_SNAKE_LENGTH
            || self.rows > MAX_DIMENSION
            || self.cols > MAX_DIMENSION
        {
            return Err(GameError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.obstacle_refresh_interval.as_secs() == 0 {
            return Err(GameError::InvalidSettings(
                "obstacle refresh interval must be at least one second".to_string(),
            ));
        }
        if self.obstacle_refresh_interval.subsec_nanos() != 0 {
            return Err(GameError::InvalidSettings(
                "obstacle refresh interval must be a whole number of seconds".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            obstacle_refresh_interval: DEFAULT_OBSTACLE_REFRESH_INTERVAL,
        }
    }
}
