use snake_engine::{log, DeathReason, GameError, GameSession, SessionRng};
use tokio::time::{interval, MissedTickBehavior};

use crate::bot_controller::BotController;
use crate::config::RunnerConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub seed: u64,
    pub score: u32,
    pub ticks: u64,
    pub snake_len: usize,
    pub death_reason: Option<DeathReason>,
}

/// Plays one game to the end (or to `max_ticks`) with the configured bot,
/// ticking on a fixed cadence while the engine refreshes obstacles on its own.
pub async fn run_game(config: &RunnerConfig, seed: u64) -> Result<GameSummary, GameError> {
    let session = GameSession::start(config.game_settings(), seed)?;
    let mut bot_rng = SessionRng::new(seed.wrapping_add(1));
    let mut tick_timer = interval(config.tick_interval());
    tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tick_timer.tick().await;

        let snapshot = session.snapshot().await;
        if snapshot.game_over || snapshot.tick >= config.max_ticks {
            break;
        }

        if let Some(direction) = BotController::calculate_move(config.bot, &snapshot, &mut bot_rng) {
            session.change_direction(direction).await;
        }
        session.move_snake().await;

        if snapshot.tick % 100 == 99 {
            log!("Tick {}: score {}", snapshot.tick + 1, snapshot.score);
        }
    }

    let snapshot = session.snapshot().await;
    Ok(GameSummary {
        seed,
        score: snapshot.score,
        ticks: snapshot.tick,
        snake_len: snapshot.snake.len(),
        death_reason: snapshot.death_reason,
    })
}
