mod broadcaster;
mod config;
mod game_runner;
mod input;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use common::config::ConfigManager;
use common::games::tictactoe::TicTacToeSessionSettings;
use common::version::VERSION;
use common::{log, logger};

use config::get_config_manager;

#[derive(Parser)]
#[command(name = "tictactoe_client", version, about = "Play tic-tac-toe against the computer")]
struct Args {
    /// YAML config file; defaults to tictactoe_client_config.yaml next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the computer's random corner and side picks
    #[arg(long)]
    seed: Option<u64>,

    /// Computer "thinking" delay in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Write the default config file if none exists
    #[arg(long)]
    write_default_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = match args.config {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => get_config_manager(),
    };
    let config = if args.write_default_config {
        config_manager.get_or_create_config()?
    } else {
        config_manager.get_config()?
    };
    let config = config.with_overrides(args.seed, args.delay_ms)?;

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, config.log.to_output())?;

    let seed = config.game.seed.unwrap_or_else(rand::random);
    let delay_ms = config.game.bot_delay_ms;
    let settings = TicTacToeSessionSettings::new(delay_ms, seed);

    log!("Tic Tac Toe v{} starting, seed {}, delay {} ms", VERSION, seed, delay_ms);

    let scoreboard = game_runner::run_game(settings, &config.ui).await?;

    println!();
    println!(
        "Games: {}  You: {}  Computer: {}  Draws: {}",
        scoreboard.games_played(),
        scoreboard.human_wins,
        scoreboard.bot_wins,
        scoreboard.draws
    );
    log!("Client shut down");

    Ok(())
}
