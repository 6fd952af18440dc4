//! Game balance simulator for Monte Carlo analysis.
//!
//! Plays thousands of complete games with an automated player to see:
//! - How often a player clears stage 3
//! - Which stage ends most runs
//! - How long rounds and stages last
//!
//! Runs go through `Session`, the same controller the console game uses.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::{AutoPilot, RunStats};
pub use config::{PlayerStrategy, SimConfig};
pub use report::SimReport;
pub use runner::{run_simulation, simulate_single_run};
