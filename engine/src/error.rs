#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    InvalidDimensions { rows: usize, cols: usize },
    InvalidSettings(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameError::InvalidDimensions { rows, cols } => write!(
                f,
                "Invalid grid size {}x{}: need at least 1 row and {} columns, at most {} per side",
                rows,
                cols,
                crate::defaults::INITIAL_SNAKE_LENGTH,
                crate::defaults::MAX_DIMENSION
            ),
            GameError::InvalidSettings(reason) => write!(f, "Invalid game settings: {}", reason),
        }
    }
}

impl std::error::Error for GameError {}
