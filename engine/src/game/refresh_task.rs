use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::log;
use super::game_state::GameState;

/// Background job that swaps out the obstacles every `period`.
///
/// Every refresh runs under the same lock as a tick, so a tick never sees a
/// half-regenerated board. The loop ends by itself the first time it finds
/// the game over; the owning session also aborts it.
pub struct ObstacleRefreshTask {
    state: Arc<Mutex<GameState>>,
    period: Duration,
}

impl ObstacleRefreshTask {
    pub fn new(state: Arc<Mutex<GameState>>, period: Duration) -> Self {
        Self { state, period }
    }

    pub async fn run(&self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            if !self.refresh_once().await {
                break;
            }
        }

        log!("Obstacle refresh stopped");
    }

    /// Returns `false` once the game is over.
    async fn refresh_once(&self) -> bool {
        let mut state = self.state.lock().await;
        if state.is_game_over() {
            return false;
        }
        state.regenerate_obstacles();
        true
    }
}
