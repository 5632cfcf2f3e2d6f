//! LOOKAHEAD CLI - Command-line interface
//!
//! Commands:
//! - play: Play Forager episodes with one planner
//! - benchmark: Compare planners over the same episodes
//! - show-config: Print the effective planner settings

mod benchmark;
mod play;
mod random;
mod report;
mod settings;
mod show_config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lookahead")]
#[command(about = "Decision-time planners (hill climbing, genetic, MCTS) on a grid world")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play episodes with one planner
    Play(play::PlayArgs),
    /// Compare planners over the same episodes
    Benchmark(benchmark::BenchmarkArgs),
    /// Print the effective planner settings as JSON
    ShowConfig(show_config::ShowConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base_seed = create_rng(cli.seed).gen::<u64>();

    match cli.command {
        Commands::Play(args) => play::run(args, base_seed),
        Commands::Benchmark(args) => benchmark::run(args, base_seed),
        Commands::ShowConfig(args) => show_config::run(args),
    }
}

/// `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}
