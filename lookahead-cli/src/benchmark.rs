//! Benchmark command - compare planners on the same episodes
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: check_planners(), run_episodes(), report_results()
//! - Level 3: run_episode() (report module)
//! - Level 4: progress bar, output utilities

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use lookahead_core::runner::{DEFAULT_MAX_STEPS, DEFAULT_STEP_ALLOWANCE};
use lookahead_core::{EpisodeRunner, Forager};

use crate::report::{print_table, run_episode, EpisodeRecord, PlannerSummary};
use crate::settings::{load_world, PlannerKind, PlannerSettings};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BenchmarkArgs {
    /// Episodes per planner
    #[arg(long, default_value = "10")]
    pub episodes: usize,

    /// Planners to compare (default: all)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub planners: Vec<PlannerKind>,

    /// Built-in layout name (small, medium, open) or a layout file
    #[arg(long, default_value = "small")]
    pub layout: String,

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

    /// Also write the JSON report to this file
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Full benchmark report
#[derive(Debug, Serialize)]
struct BenchmarkReport {
    generated_at: DateTime<Utc>,
    layout: String,
    episodes: usize,
    step_allowance: u64,
    max_steps: u32,
    base_seed: u64,
    planners: Vec<PlannerSummary>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run benchmark command
///
/// 1. Load settings and the world, check every planner builds
/// 2. Play all (planner, episode) pairs in parallel
/// 3. Summarize per planner and report
pub fn run(args: BenchmarkArgs, base_seed: u64) -> Result<()> {
    let settings = PlannerSettings::load_or_default(args.config.as_deref())?;
    let world = load_world(&args.layout)?;
    let planners = selected_planners(&args);

    check_planners(&settings, &planners)?;

    tracing::info!(
        "Benchmarking {} planner(s) x {} episodes on '{}' (budget={}, seed={})",
        planners.len(),
        args.episodes,
        args.layout,
        args.budget,
        base_seed
    );

    let records = run_episodes(&settings, &world, &planners, &args, base_seed)?;

    let summaries = planners
        .iter()
        .map(|&kind| {
            let mine: Vec<EpisodeRecord> = records
                .iter()
                .filter(|(k, _)| *k == kind)
                .map(|(_, record)| record.clone())
                .collect();
            PlannerSummary::from_records(kind.name(), &mine)
        })
        .collect();

    let report = BenchmarkReport {
        generated_at: Utc::now(),
        layout: args.layout.clone(),
        episodes: args.episodes,
        step_allowance: args.budget,
        max_steps: args.max_steps,
        base_seed,
        planners: summaries,
    };

    report_results(&report, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn selected_planners(args: &BenchmarkArgs) -> Vec<PlannerKind> {
    if args.planners.is_empty() {
        PlannerKind::ALL.to_vec()
    } else {
        args.planners.clone()
    }
}

/// Surface configuration errors before spawning any work
fn check_planners(settings: &PlannerSettings, planners: &[PlannerKind]) -> Result<()> {
    for &kind in planners {
        settings
            .build(kind, 0)
            .with_context(|| format!("Failed to build {} planner", kind.name()))?;
    }
    Ok(())
}

/// Every planner plays the same seeds; each job owns its planner and
/// simulator.
fn run_episodes(
    settings: &PlannerSettings,
    world: &Forager,
    planners: &[PlannerKind],
    args: &BenchmarkArgs,
    base_seed: u64,
) -> Result<Vec<(PlannerKind, EpisodeRecord)>> {
    let runner = EpisodeRunner::new(args.budget, args.max_steps);
    let jobs: Vec<(PlannerKind, u64)> = planners
        .iter()
        .flat_map(|&kind| (0..args.episodes as u64).map(move |i| (kind, base_seed.wrapping_add(i))))
        .collect();

    let progress = create_progress_bar(jobs.len() as u64, args.json)?;

    let records = jobs
        .par_iter()
        .map(|&(kind, seed)| -> Result<(PlannerKind, EpisodeRecord)> {
            let mut planner = settings.build(kind, seed)?;
            let record = run_episode(&runner, &mut planner, world, seed);
            progress.inc(1);
            Ok((kind, record))
        })
        .collect::<Result<Vec<_>>>()?;

    progress.finish_and_clear();
    Ok(records)
}

fn report_results(report: &BenchmarkReport, args: &BenchmarkArgs) -> Result<()> {
    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(report)?;
        fs::write(path, json).with_context(|| format!("Failed to write report: {}", path.display()))?;
        tracing::info!("Report written to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "\nLayout '{}', {} episodes per planner, {} successor calls per decision ({})",
        report.layout,
        report.episodes,
        report.step_allowance,
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    print_table(&report.planners);

    if let Some(best) = report
        .planners
        .iter()
        .max_by(|a, b| a.mean_score.total_cmp(&b.mean_score))
    {
        println!("\nBest mean score: {} ({:.1})", best.planner, best.mean_score);
    }

    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_progress_bar(len: u64, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }

    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({eta})")
            .context("Invalid progress bar template")?
            .progress_chars("=>-"),
    );
    Ok(progress)
}
