use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::{log, GameError};
use super::game_state::GameState;
use super::refresh_task::ObstacleRefreshTask;
use super::session_rng::SessionRng;
use super::settings::GameSettings;
use super::snapshot::GameSnapshot;
use super::types::Direction;

/// A running game shared between the caller's tick loop and the obstacle
/// refresh task.
///
/// Both paths lock the whole [`GameState`]. The refresh task is aborted
/// exactly once: on the tick that ends the game, or when the session is
/// dropped. Must be created inside a tokio runtime.
pub struct GameSession {
    state: Arc<Mutex<GameState>>,
    refresh_handle: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl GameSession {
    pub fn start(settings: GameSettings, seed: u64) -> Result<Self, GameError> {
        let state = GameState::new(settings, SessionRng::new(seed))?;
        Ok(Self::from_state(state))
    }

    pub fn from_state(state: GameState) -> Self {
        let period = state.settings().obstacle_refresh_interval;
        let state = Arc::new(Mutex::new(state));

        let task = ObstacleRefreshTask::new(state.clone(), period);
        let handle = tokio::spawn(async move { task.run().await });
        log!("Obstacle refresh every {}s", period.as_secs());

        Self {
            state,
            refresh_handle: std::sync::Mutex::new(Some(handle)),
        }
    }

    pub fn state(&self) -> Arc<Mutex<GameState>> {
        self.state.clone()
    }

    pub async fn change_direction(&self, direction: Direction) {
        self.state.lock().await.change_direction(direction);
    }

    pub async fn move_snake(&self) {
        let game_over = {
            let mut state = self.state.lock().await;
            state.move_snake();
            state.is_game_over()
        };

        if game_over {
            self.stop_refresh();
        }
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.state.lock().await.snapshot()
    }

    pub async fn is_game_over(&self) -> bool {
        self.state.lock().await.is_game_over()
    }

    pub fn is_refresh_running(&self) -> bool {
        match self.refresh_handle.lock() {
            Ok(handle) => handle.as_ref().is_some_and(|h| !h.is_finished()),
            Err(_) => false,
        }
    }

    fn stop_refresh(&self) {
        let handle = match self.refresh_handle.lock() {
            Ok(mut handle) => handle.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(handle) = handle {
            handle.abort();
            log!("Obstacle refresh cancelled");
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.stop_refresh();
    }
}
