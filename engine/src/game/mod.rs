mod direction_buffer;
mod game_state;
mod grid;
mod obstacles;
mod refresh_task;
mod session;
mod session_rng;
mod settings;
mod snake;
mod snapshot;
mod types;

pub use direction_buffer::DirectionBuffer;
pub use game_state::GameState;
pub use grid::Grid;
pub use obstacles::{Obstacle, ObstacleRegistry};
pub use refresh_task::ObstacleRefreshTask;
pub use session::GameSession;
pub use session_rng::SessionRng;
pub use settings::GameSettings;
pub use snake::SnakeBody;
pub use snapshot::GameSnapshot;
pub use types::{CellValue, DeathReason, Direction, Position};
