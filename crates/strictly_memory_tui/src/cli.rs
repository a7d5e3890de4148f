//! Command-line interface for strictly_memory.

use clap::{Parser, Subcommand};
use strictly_memory::Difficulty;

/// Strictly Memory - a memory-matching card game for the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_memory")]
#[command(about = "Memory-matching card game for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (missing file means defaults)
    #[arg(short, long, global = true, default_value = "strictly_memory.toml")]
    pub config: std::path::PathBuf,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Difficulty (easy, medium, hard); overrides the config file
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Let a perfect-memory bot play one game headlessly and report the result
    Autoplay {
        /// Difficulty (easy, medium, hard); overrides the config file
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}
