//! Simulation configuration.

use crate::core::Rules;
use serde::Serialize;
use std::fmt;

/// How the automated player decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerStrategy {
    /// Coin flips for everything.
    Random,
    /// Uses the public live/blank counts and anything its items reveal.
    Counting,
}

impl PlayerStrategy {
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_lowercase().as_str() {
            "random" => Some(Self::Random),
            "counting" | "count" => Some(Self::Counting),
            _ => None,
        }
    }
}

impl fmt::Display for PlayerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => f.write_str("random"),
            Self::Counting => f.write_str("counting"),
        }
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of complete games to play
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    pub strategy: PlayerStrategy,

    pub rules: Rules,

    /// Accept infinite mode after winning stage 3
    pub play_infinite: bool,

    /// Always take double-or-quit offers
    pub double_down: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 1000,
            seed: None,
            strategy: PlayerStrategy::Counting,
            rules: Rules::default(),
            play_infinite: false,
            double_down: false,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small run for a quick look
    pub fn quick() -> Self {
        Self {
            num_runs: 100,
            ..Default::default()
        }
    }

    /// Baseline: a player with no plan at all
    pub fn random_baseline(num_runs: u32) -> Self {
        Self {
            num_runs,
            strategy: PlayerStrategy::Random,
            ..Default::default()
        }
    }

    /// Follow every game into infinite mode and keep doubling
    pub fn high_roller(num_runs: u32) -> Self {
        Self {
            num_runs,
            play_infinite: true,
            double_down: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!(PlayerStrategy::parse("Random"), Some(PlayerStrategy::Random));
        assert_eq!(PlayerStrategy::parse("count"), Some(PlayerStrategy::Counting));
        assert_eq!(PlayerStrategy::parse("psychic"), None);
    }

    #[test]
    fn test_presets() {
        assert_eq!(SimConfig::quick().num_runs, 100);
        assert_eq!(
            SimConfig::random_baseline(10).strategy,
            PlayerStrategy::Random
        );
        assert!(SimConfig::high_roller(5).double_down);
    }
}
