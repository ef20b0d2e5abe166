use serde::{Deserialize, Serialize};
use snake_engine::GameSettings;
use snake_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use snake_engine::defaults::{
    DEFAULT_COLS, DEFAULT_OBSTACLE_COUNT, DEFAULT_OBSTACLE_REFRESH_INTERVAL, DEFAULT_ROWS,
};
use std::path::Path;
use std::time::Duration;

use crate::bot_controller::BotKind;

pub const DEFAULT_CONFIG_FILE: &str = "snake_runner_config.yaml";

pub fn get_config_manager(
    path: &Path,
) -> ConfigManager<FileContentConfigProvider, RunnerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct RunnerConfig {
    pub rows: usize,
    pub cols: usize,
    pub obstacle_count: usize,
    pub obstacle_refresh_secs: u64,
    pub tick_interval_ms: u64,
    pub max_ticks: u64,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub bot: BotKind,
}

impl RunnerConfig {
    pub fn game_settings(&self) -> GameSettings {
        GameSettings {
            rows: self.rows,
            cols: self.cols,
            obstacle_count: self.obstacle_count,
            obstacle_refresh_interval: Duration::from_secs(self.obstacle_refresh_secs),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        self.game_settings().validate().map_err(|e| e.to_string())?;
        if self.obstacle_count >= self.rows * self.cols {
            return Err("obstacle_count must leave room on the board".to_string());
        }
        if self.tick_interval_ms < 10 {
            return Err("tick_interval_ms must be at least 10".to_string());
        }
        if self.tick_interval_ms > 5000 {
            return Err("tick_interval_ms must not exceed 5000".to_string());
        }
        if self.max_ticks == 0 {
            return Err("max_ticks must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            obstacle_count: DEFAULT_OBSTACLE_COUNT,
            obstacle_refresh_secs: DEFAULT_OBSTACLE_REFRESH_INTERVAL.as_secs(),
            tick_interval_ms: 150,
            max_ticks: 2000,
            seed: None,
            bot: BotKind::Efficient,
        }
    }
}
