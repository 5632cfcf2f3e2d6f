//! Play command - run episodes with one planner
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_episodes(), report_results()
//! - Level 3: run_episode() (report module)
//! - Level 4: formatting utilities

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use lookahead_core::runner::{DEFAULT_MAX_STEPS, DEFAULT_STEP_ALLOWANCE};
use lookahead_core::{EpisodeRunner, Forager};

use crate::report::{print_table, run_episode, EpisodeRecord, PlannerSummary};
use crate::settings::{load_world, PlannerKind, PlannerSettings};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Planner to play with
    #[arg(long, value_enum, default_value = "mcts")]
    pub planner: PlannerKind,

    /// Built-in layout name (small, medium, open) or a layout file
    #[arg(long, default_value = "small")]
    pub layout: String,

    /// Number of episodes to play
    #[arg(long, default_value = "1")]
    pub episodes: usize,

    /// Successor calls allowed per decision
    #[arg(long, default_value_t = DEFAULT_STEP_ALLOWANCE)]
    pub budget: u64,

    /// Tick limit per episode
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: u32,

    /// Planner settings JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct PlayReport<'a> {
    layout: &'a str,
    summary: PlannerSummary,
    episodes: Vec<EpisodeRecord>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
///
/// 1. Load settings and the world
/// 2. Play the episodes
/// 3. Report results
pub fn run(args: PlayArgs, base_seed: u64) -> Result<()> {
    let settings = PlannerSettings::load_or_default(args.config.as_deref())?;
    let world = load_world(&args.layout)?;

    tracing::info!(
        "Playing {} episode(s) with {} on '{}' (budget={}, seed={})",
        args.episodes,
        args.planner.name(),
        args.layout,
        args.budget,
        base_seed
    );

    let records = play_episodes(&settings, &world, &args, base_seed)?;

    report_results(&args, records)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play `args.episodes` episodes; episode `i` uses seed `base_seed + i`
fn play_episodes(
    settings: &PlannerSettings,
    world: &Forager,
    args: &PlayArgs,
    base_seed: u64,
) -> Result<Vec<EpisodeRecord>> {
    let runner = EpisodeRunner::new(args.budget, args.max_steps);
    let mut records = Vec::with_capacity(args.episodes);

    for i in 0..args.episodes {
        let seed = base_seed.wrapping_add(i as u64);
        let mut planner = settings
            .build(args.planner, seed)
            .with_context(|| format!("Failed to build {} planner", args.planner.name()))?;

        let record = run_episode(&runner, &mut planner, world, seed);
        tracing::info!(
            "Episode {}: {:?}, score {:.0} in {} steps",
            i + 1,
            record.outcome.result,
            record.outcome.score,
            record.outcome.steps
        );
        records.push(record);
    }

    Ok(records)
}

fn report_results(args: &PlayArgs, records: Vec<EpisodeRecord>) -> Result<()> {
    let summary = PlannerSummary::from_records(args.planner.name(), &records);

    if args.json {
        let report = PlayReport {
            layout: &args.layout,
            summary,
            episodes: records,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (i, record) in records.iter().enumerate() {
        println!(
            "Episode {:>3} (seed {}): {:<7} score {:>7.1}  steps {:>4}",
            i + 1,
            record.seed,
            format!("{:?}", record.outcome.result),
            record.outcome.score,
            record.outcome.steps
        );
    }
    println!();
    print_table(std::slice::from_ref(&summary));

    Ok(())
}
