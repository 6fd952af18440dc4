//! Tunable game rules.

use super::constants::*;

/// How a primed saw affects the next shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DamageRule {
    /// The saw only ends the user's turn; shots always cost one life.
    #[default]
    Legacy,
    /// The saw keeps the user's turn going and their next hit costs two lives.
    Doubled,
}

/// Rule set for a session.
#[derive(Debug, Clone)]
pub struct Rules {
    /// Starting lives for stages 1, 2 and 3
    pub stage_lives: [u32; 3],

    /// Items offered in the box at the start of each round, per stage
    pub box_sizes: [usize; 3],

    /// Maximum items a contestant can hold
    pub inventory_capacity: usize,

    pub damage_rule: DamageRule,

    /// Stage 3 warns once a contestant is at or below this many lives
    pub life_support_threshold: u32,

    /// Rounds after which a stage is halted as a draw
    pub max_rounds_per_stage: u32,

    /// Winnings granted on entering infinite mode
    pub infinite_seed_winnings: u64,

    /// Stage wins between double-or-quit offers
    pub wager_interval: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            stage_lives: STAGE_STARTING_LIVES,
            box_sizes: STAGE_BOX_SIZES,
            inventory_capacity: INVENTORY_CAPACITY,
            damage_rule: DamageRule::Legacy,
            life_support_threshold: LIFE_SUPPORT_THRESHOLD,
            max_rounds_per_stage: MAX_ROUNDS_PER_STAGE,
            infinite_seed_winnings: INFINITE_MODE_SEED_WINNINGS,
            wager_interval: WAGER_INTERVAL,
        }
    }
}

impl Rules {
    /// The classic rules, saw included.
    pub fn legacy() -> Self {
        Self::default()
    }

    /// Classic rules with a saw that really doubles the next hit.
    pub fn doubled_saw() -> Self {
        Self {
            damage_rule: DamageRule::Doubled,
            ..Default::default()
        }
    }

    /// Starting lives for a 1-based stage number. Out-of-range stages clamp.
    pub fn lives_for_stage(&self, stage: u8) -> u32 {
        self.stage_lives[stage_index(stage)]
    }

    /// Number of items offered per round on a 1-based stage.
    pub fn box_size_for_stage(&self, stage: u8) -> usize {
        self.box_sizes[stage_index(stage)]
    }
}

fn stage_index(stage: u8) -> usize {
    (stage.clamp(1, STAGE_COUNT) - 1) as usize
}
