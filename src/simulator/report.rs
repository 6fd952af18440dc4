//! Simulation report generation.

use super::autopilot::RunStats;
use crate::core::STAGE_COUNT;
use crate::stage::SessionEnd;
use serde::Serialize;

/// Aggregated results from multiple simulated games.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub strategy: String,
    pub champions: u32,
    pub stalemates: u32,

    /// Runs lost on stage 1, 2 and 3
    pub defeats_by_stage: Vec<u32>,

    pub win_rate: f64,
    pub avg_stage_reached: f64,
    pub avg_rounds: f64,
    pub avg_shots: f64,
    pub avg_items_used: f64,
    pub avg_lives_lost: f64,
    pub avg_winnings: f64,

    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

impl SimReport {
    pub fn from_runs(runs: Vec<RunStats>, strategy: &str) -> Self {
        let num_runs = runs.len() as u32;
        let denom = num_runs.max(1) as f64;
        let avg = |f: fn(&RunStats) -> f64| runs.iter().map(f).sum::<f64>() / denom;

        let champions = runs.iter().filter(|r| r.champion).count() as u32;
        let stalemates = runs
            .iter()
            .filter(|r| matches!(r.end, Some(SessionEnd::Stalemate { .. })))
            .count() as u32;

        let mut defeats_by_stage = vec![0; STAGE_COUNT as usize];
        for run in &runs {
            if let Some(SessionEnd::Defeated { stage }) = run.end {
                if (1..=STAGE_COUNT).contains(&stage) {
                    defeats_by_stage[stage as usize - 1] += 1;
                }
            }
        }

        Self {
            num_runs,
            strategy: strategy.to_string(),
            champions,
            stalemates,
            defeats_by_stage,
            win_rate: champions as f64 / denom,
            avg_stage_reached: avg(|r| r.final_stage as f64),
            avg_rounds: avg(|r| r.rounds as f64),
            avg_shots: avg(|r| r.shots as f64),
            avg_items_used: avg(|r| r.items_used as f64),
            avg_lives_lost: avg(|r| r.lives_lost as f64),
            avg_winnings: avg(|r| r.winnings as f64),
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                    SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} ({} player)\n\n",
            self.num_runs, self.strategy
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!(
            "  Cleared stage 3:     {} ({:.1}%)\n",
            self.champions,
            self.win_rate * 100.0
        ));
        for (i, defeats) in self.defeats_by_stage.iter().enumerate() {
            let pct = *defeats as f64 / self.num_runs.max(1) as f64 * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!(
                "  Lost on stage {}:     {:>5.1}% {}\n",
                i + 1,
                pct,
                bar
            ));
        }
        if self.stalemates > 0 {
            report.push_str(&format!("  Stalemates:          {}\n", self.stalemates));
        }
        report.push('\n');

        report.push_str("── PER GAME ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Stage Reached:   {:.2}\n", self.avg_stage_reached));
        report.push_str(&format!("  Avg Rounds:          {:.1}\n", self.avg_rounds));
        report.push_str(&format!("  Avg Shots Fired:     {:.1}\n", self.avg_shots));
        report.push_str(&format!("  Avg Items Used:      {:.1}\n", self.avg_items_used));
        report.push_str(&format!("  Avg Lives Lost:      {:.1}\n", self.avg_lives_lost));
        if self.avg_winnings > 0.0 {
            report.push_str(&format!("  Avg Winnings:        ${:.0}\n", self.avg_winnings));
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
