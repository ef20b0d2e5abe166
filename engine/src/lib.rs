pub mod config;
pub mod defaults;
pub mod game;
pub mod logger;
mod error;

pub use error::GameError;
pub use game::{
    CellValue, DeathReason, Direction, DirectionBuffer, GameSession, GameSettings, GameSnapshot,
    GameState, Grid, Obstacle, ObstacleRefreshTask, ObstacleRegistry, Position, SessionRng,
    SnakeBody,
};
