//! Main simulation runner. Every run plays a full `Session` with an
//! `AutoPilot` in the player's seat, so results follow real game rules.

use super::autopilot::{AutoPilot, RunStats};
use super::config::SimConfig;
use super::report::SimReport;
use crate::save_manager::MemoryStore;
use crate::stage::Session;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let stats = simulate_single_run(config, rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - {:?}, stage {}, {} rounds, {} shots, {} items",
                run_idx + 1,
                config.num_runs,
                stats.end,
                stats.final_stage,
                stats.rounds,
                stats.shots,
                stats.items_used
            );
        }
        all_runs.push(stats);
    }

    SimReport::from_runs(all_runs, &config.strategy.to_string())
}

/// Play one complete game. The autopilot gets its own stream split off the
/// game's so strategy changes don't reshuffle the shells.
pub fn simulate_single_run(config: &SimConfig, mut rng: ChaCha8Rng) -> RunStats {
    let pilot_rng = ChaCha8Rng::seed_from_u64(rng.gen());
    let pilot = AutoPilot::new(
        config.strategy,
        pilot_rng,
        config.play_infinite,
        config.double_down,
    );

    let mut session = Session::new(config.rules.clone(), pilot, MemoryStore::new(), rng);
    if let Err(e) = session.run() {
        tracing::warn!(error = %e, "simulated game aborted");
    }
    session.presenter().stats().clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::config::PlayerStrategy;

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SimConfig {
            num_runs: 5,
            seed: Some(42),
            verbosity: 0,
            ..Default::default()
        };
        let a = run_simulation(&config);
        let b = run_simulation(&config);
        assert_eq!(a.champions, b.champions);
        assert_eq!(a.avg_rounds, b.avg_rounds);
        assert_eq!(a.avg_shots, b.avg_shots);
    }

    #[test]
    fn test_every_run_finishes() {
        let config = SimConfig {
            num_runs: 20,
            seed: Some(7),
            strategy: PlayerStrategy::Random,
            verbosity: 0,
            ..Default::default()
        };
        let report = run_simulation(&config);
        assert_eq!(report.num_runs, 20);
        assert!(report.run_stats.iter().all(|r| r.end.is_some()));
        assert!(report.run_stats.iter().all(|r| r.final_stage >= 1));
    }
}
