//! Strictly Memory - memory-matching card game CLI.

use anyhow::Result;
use clap::Parser;
use strictly_memory_tui::{AppConfig, Cli, Command, init_stderr, run_autoplay, run_tui};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (RUST_LOG and friends)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { difficulty, seed } => {
            let config = AppConfig::load_or_default(&cli.config)?;
            run_tui(&config, config.difficulty_or(difficulty), seed).await
        }
        Command::Autoplay {
            difficulty,
            seed,
            json,
        } => {
            init_stderr();
            let config = AppConfig::load_or_default(&cli.config)?;
            let difficulty = config.difficulty_or(difficulty);
            info!(%difficulty, ?seed, "Starting autoplay");

            let summary = run_autoplay(&config, difficulty, seed)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "{} game won in {} moves and {}s. {} Final score: {}",
                    summary.difficulty,
                    summary.moves,
                    summary.elapsed_seconds,
                    summary.tier,
                    summary.score
                );
            }
            Ok(())
        }
    }
}
