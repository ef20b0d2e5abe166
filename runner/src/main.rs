mod bot_controller;
mod config;
mod game_loop;

use clap::Parser;
use snake_engine::config::Validate;
use snake_engine::{log, logger};
use std::path::PathBuf;

use bot_controller::BotKind;

#[derive(Parser)]
#[command(name = "snake_runner", about = "Plays snake games headlessly with a bot")]
struct Args {
    #[arg(long, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    cols: Option<usize>,

    #[arg(long, value_enum)]
    bot: Option<BotKind>,

    #[arg(long)]
    max_ticks: Option<u64>,

    /// Save the effective configuration back to the config file.
    #[arg(long)]
    write_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = config::get_config_manager(&args.config);
    let mut runner_config = config_manager.get_config()?;
    if let Some(seed) = args.seed {
        runner_config.seed = Some(seed);
    }
    if let Some(rows) = args.rows {
        runner_config.rows = rows;
    }
    if let Some(cols) = args.cols {
        runner_config.cols = cols;
    }
    if let Some(bot) = args.bot {
        runner_config.bot = bot;
    }
    if let Some(max_ticks) = args.max_ticks {
        runner_config.max_ticks = max_ticks;
    }
    runner_config.validate()?;

    if args.write_config {
        config_manager.set_config(&runner_config)?;
        log!("Configuration written to {}", args.config.display());
    }

    let seed = runner_config.seed.unwrap_or_else(rand::random);
    log!(
        "Starting {}x{} game with {:?} bot, seed {}",
        runner_config.rows,
        runner_config.cols,
        runner_config.bot,
        seed
    );

    let summary = game_loop::run_game(&runner_config, seed).await?;

    match summary.death_reason {
        Some(reason) => log!(
            "Game over after {} ticks ({:?}). Score: {}, length: {}",
            summary.ticks,
            reason,
            summary.score,
            summary.snake_len
        ),
        None => log!(
            "Stopped after {} ticks. Score: {}, length: {}",
            summary.ticks,
            summary.score,
            summary.snake_len
        ),
    }

    Ok(())
}
