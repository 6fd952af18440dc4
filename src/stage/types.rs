//! Stage progression state and results.

use crate::core::STAGE_COUNT;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageOutcome {
    Win,
    Loss,
    /// The round cap was hit with both contestants standing.
    Draw,
}

/// How a session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEnd {
    /// Lost a stage in the main game.
    Defeated { stage: u8 },
    /// A main-game stage was halted without a winner.
    Stalemate { stage: u8 },
    /// Won stage 3 and walked away.
    Champion,
    /// Declined a double-or-quit offer.
    CashedOut { winnings: u64 },
    /// Lost in infinite mode; everything is gone.
    Bust { forfeited: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageState {
    /// 1..=3
    pub stage: u8,
    pub round: u32,
    pub infinite_mode: bool,
    pub winnings: u64,
    pub stages_completed: u32,
}

impl Default for StageState {
    fn default() -> Self {
        Self {
            stage: 1,
            round: 0,
            infinite_mode: false,
            winnings: 0,
            stages_completed: 0,
        }
    }
}

impl StageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stage after this one. Wraps 3 → 1.
    pub fn next_stage(&self) -> u8 {
        self.stage % STAGE_COUNT + 1
    }

    pub fn is_final_stage(&self) -> bool {
        self.stage >= STAGE_COUNT
    }
}
