//! Episode records and per-planner summaries
//!
//! ## Architecture
//! - Level 3: `run_episode`, `PlannerSummary::from_records`
//! - Level 4: table formatting

use std::time::Instant;

use serde::Serialize;

use lookahead_core::{EpisodeOutcome, EpisodeRunner, Forager};

use crate::settings::EpisodePlanner;

/// One played episode
#[derive(Clone, Debug, Serialize)]
pub struct EpisodeRecord {
    pub seed: u64,
    pub outcome: EpisodeOutcome,
    pub elapsed_ms: f64,
}

/// Play one episode and time it
pub fn run_episode(
    runner: &EpisodeRunner,
    planner: &mut EpisodePlanner,
    world: &Forager,
    seed: u64,
) -> EpisodeRecord {
    let start = Instant::now();
    let outcome = runner.play(planner.as_mut(), world, seed);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    EpisodeRecord {
        seed,
        outcome,
        elapsed_ms,
    }
}

/// Aggregated results for one planner
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlannerSummary {
    pub planner: String,
    pub episodes: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub mean_score: f64,
    pub mean_steps: f64,
    /// Wall-clock time per decision
    pub mean_decision_ms: f64,
}

impl PlannerSummary {
    pub fn from_records(planner: &str, records: &[EpisodeRecord]) -> Self {
        let episodes = records.len();
        let wins = records.iter().filter(|r| r.outcome.won()).count();
        let losses = records.iter().filter(|r| r.outcome.lost()).count();
        let total_steps: u64 = records.iter().map(|r| r.outcome.steps as u64).sum();
        let total_ms: f64 = records.iter().map(|r| r.elapsed_ms).sum();

        Self {
            planner: planner.to_string(),
            episodes,
            wins,
            losses,
            win_rate: ratio(wins as f64, episodes as f64),
            mean_score: ratio(records.iter().map(|r| r.outcome.score).sum(), episodes as f64),
            mean_steps: ratio(total_steps as f64, episodes as f64),
            mean_decision_ms: ratio(total_ms, total_steps as f64),
        }
    }

    pub fn to_table_row(&self) -> String {
        format!(
            "| {:<10} | {:>8} | {:>5.1}% | {:>6} | {:>10.1} | {:>8.1} | {:>10.3}ms |",
            self.planner,
            self.episodes,
            self.win_rate * 100.0,
            self.losses,
            self.mean_score,
            self.mean_steps,
            self.mean_decision_ms
        )
    }
}

/// Column widths shared by the header and `to_table_row`
const COLUMNS: [(&str, usize); 7] = [
    ("Planner", 10),
    ("Episodes", 8),
    ("Wins", 6),
    ("Losses", 6),
    ("Mean Score", 10),
    ("Mean Len", 8),
    ("Per Decision", 12),
];

fn table_header() -> String {
    let cells: Vec<String> = COLUMNS
        .iter()
        .map(|(name, width)| format!(" {:<width$} ", name, width = width))
        .collect();
    format!("|{}|", cells.join("|"))
}

fn table_separator() -> String {
    let cells: Vec<String> = COLUMNS.iter().map(|(_, width)| "-".repeat(width + 2)).collect();
    format!("|{}|", cells.join("|"))
}

pub fn print_table(summaries: &[PlannerSummary]) {
    println!("{}", table_header());
    println!("{}", table_separator());
    for summary in summaries {
        println!("{}", summary.to_table_row());
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookahead_core::GameResult;

    fn record(result: GameResult, score: f64, steps: u32) -> EpisodeRecord {
        EpisodeRecord {
            seed: 0,
            outcome: EpisodeOutcome {
                result,
                score,
                steps,
                actions: Vec::new(),
            },
            elapsed_ms: steps as f64 * 2.0,
        }
    }

    #[test]
    fn test_summary_statistics() {
        let records = vec![
            record(GameResult::Won, 600.0, 40),
            record(GameResult::Lost, -520.0, 20),
            record(GameResult::Ongoing, 10.0, 300),
            record(GameResult::Won, 590.0, 60),
        ];

        let summary = PlannerSummary::from_records("mcts", &records);

        assert_eq!(summary.episodes, 4);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);
        assert_eq!(summary.win_rate, 0.5);
        assert_eq!(summary.mean_score, 170.0);
        assert_eq!(summary.mean_steps, 105.0);
        assert!((summary.mean_decision_ms - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_table_columns_line_up() {
        let summary = PlannerSummary::from_records("hill", &[record(GameResult::Won, 600.0, 40)]);
        let pipes = |line: &str| -> Vec<usize> {
            line.char_indices().filter(|&(_, c)| c == '|').map(|(i, _)| i).collect()
        };

        let header = pipes(&table_header());
        assert_eq!(header, pipes(&table_separator()));
        assert_eq!(header, pipes(&summary.to_table_row()));
    }

    #[test]
    fn test_empty_summary_is_zero() {
        let summary = PlannerSummary::from_records("genetic", &[]);
        assert_eq!(summary.episodes, 0);
        assert_eq!(summary.win_rate, 0.0);
        assert_eq!(summary.mean_decision_ms, 0.0);
    }
}
