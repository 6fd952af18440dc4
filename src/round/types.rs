//! Turn-level outcomes and the bookkeeping carried between turns.

use crate::core::{DamageRule, Rules};
use crate::table::Seat;

/// Outcome of a single turn-level action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnResult {
    /// A live shell hit `target`. The turn passes to `shooter`'s opponent.
    Hit {
        shooter: Seat,
        target: Seat,
        damage: u32,
    },
    /// A blank. The shooter keeps the turn.
    Miss { shooter: Seat },
    /// Nothing left to fire; the caller reloads and the same contestant goes again.
    MagazineEmptyReload,
    /// Handcuffs: the other contestant's next turn is skipped.
    SkipOpponentTurn,
    /// Saw: the user's next hit this turn is doubled.
    DoubleDamageNextShot,
    /// Beer ejected the last shell.
    RoundEndedByBeer,
    /// A contestant dropped to zero lives without being shot (expired medicine).
    Collapsed { seat: Seat },
}

/// Mutable turn bookkeeping for the current stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    /// Who acts next
    pub next: Seat,
    /// One-shot: this contestant's next turn is skipped
    pub skip: Option<Seat>,
    /// Contestant whose next hit is doubled (doubled-saw rule only)
    pub double_damage: Option<Seat>,
    /// Stage 3 life support warning already given
    pub life_support_warned: bool,
    /// A dealer turn cut short by an empty magazine, holding what the dealer
    /// knew before the reload. The next dealer turn resumes firing with it.
    pub dealer_resume: Option<bool>,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            next: Seat::Player,
            skip: None,
            double_damage: None,
            life_support_warned: false,
            dealer_resume: None,
        }
    }
}

impl TurnState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume a pending skip for `seat`. Returns true if the turn is skipped.
    pub fn take_skip(&mut self, seat: Seat) -> bool {
        if self.skip == Some(seat) {
            self.skip = None;
            true
        } else {
            false
        }
    }

    /// Damage dealt by `shooter`'s next live shell.
    pub fn damage_for(&self, shooter: Seat, rules: &Rules) -> u32 {
        if rules.damage_rule == DamageRule::Doubled && self.double_damage == Some(shooter) {
            2
        } else {
            1
        }
    }

    /// Record an item's signal. Returns the signal when it ends the user's turn.
    pub fn settle_item_signal(
        &mut self,
        user: Seat,
        signal: Option<TurnResult>,
        rules: &Rules,
    ) -> Option<TurnResult> {
        match signal? {
            TurnResult::DoubleDamageNextShot if rules.damage_rule == DamageRule::Doubled => {
                self.double_damage = Some(user);
                None
            }
            end @ (TurnResult::SkipOpponentTurn
            | TurnResult::DoubleDamageNextShot
            | TurnResult::RoundEndedByBeer) => Some(end),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_skip_is_one_shot() {
        let mut turn = TurnState::new();
        turn.skip = Some(Seat::Opponent);
        assert!(!turn.take_skip(Seat::Player));
        assert!(turn.take_skip(Seat::Opponent));
        assert!(!turn.take_skip(Seat::Opponent));
    }

    #[test]
    fn test_damage_legacy_never_doubles() {
        let mut turn = TurnState::new();
        turn.double_damage = Some(Seat::Player);
        assert_eq!(turn.damage_for(Seat::Player, &Rules::legacy()), 1);
    }

    #[test]
    fn test_damage_doubled_only_for_primed_shooter() {
        let mut turn = TurnState::new();
        turn.double_damage = Some(Seat::Player);
        let rules = Rules::doubled_saw();
        assert_eq!(turn.damage_for(Seat::Player, &rules), 2);
        assert_eq!(turn.damage_for(Seat::Opponent, &rules), 1);
    }

    #[test]
    fn test_saw_signal_legacy_ends_turn() {
        let mut turn = TurnState::new();
        let end = turn.settle_item_signal(
            Seat::Player,
            Some(TurnResult::DoubleDamageNextShot),
            &Rules::legacy(),
        );
        assert_eq!(end, Some(TurnResult::DoubleDamageNextShot));
        assert_eq!(turn.double_damage, None);
    }

    #[test]
    fn test_saw_signal_doubled_primes_and_continues() {
        let mut turn = TurnState::new();
        let end = turn.settle_item_signal(
            Seat::Opponent,
            Some(TurnResult::DoubleDamageNextShot),
            &Rules::doubled_saw(),
        );
        assert_eq!(end, None);
        assert_eq!(turn.double_damage, Some(Seat::Opponent));
    }

    #[test]
    fn test_no_signal_continues() {
        let mut turn = TurnState::new();
        assert_eq!(turn.settle_item_signal(Seat::Player, None, &Rules::legacy()), None);
        assert_eq!(
            turn.settle_item_signal(
                Seat::Player,
                Some(TurnResult::SkipOpponentTurn),
                &Rules::legacy()
            ),
            Some(TurnResult::SkipOpponentTurn)
        );
    }
}
