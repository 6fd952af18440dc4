//! The dealer's decision policy.
//!
//! The dealer "knows" the next shell when it matches the tail of the last
//! load, or when it holds a Magnifier. The tail snapshot is never updated as
//! shells are fired, so the knowledge is only sometimes real. That is how the
//! dealer has always played and it is kept as is.

use super::turn::fire_at;
use super::types::{TurnResult, TurnState};
use crate::core::Rules;
use crate::events::GameEvent;
use crate::items::{resolve_item, ItemKind};
use crate::magazine::ShellKind;
use crate::table::{Seat, Table};
use rand::Rng;

/// Whether the dealer believes it knows the front shell.
pub fn knows_next_shell(table: &Table) -> bool {
    match table.magazine.peek_front() {
        Some(front) => {
            Some(front) == table.magazine.last_loaded()
                || table.opponent.items.contains(ItemKind::Magnifier)
        }
        None => false,
    }
}

/// Pick a target for the dealer's next shot.
pub fn choose_target<R: Rng>(knows: bool, front: ShellKind, rng: &mut R) -> Seat {
    if knows {
        match front {
            ShellKind::Blank => Seat::Opponent,
            ShellKind::Live => Seat::Player,
        }
    } else if rng.gen_bool(0.5) {
        Seat::Player
    } else {
        Seat::Opponent
    }
}

/// Play one dealer turn.
///
/// Uses at most one random item, sizes up the shotgun once, then keeps firing
/// until a shot hits or the magazine runs dry. A turn that runs dry is parked
/// on `turn`; after the reload the next call picks the firing loop back up
/// with the same knowledge instead of starting over.
pub fn take_opponent_turn<R: Rng>(
    table: &mut Table,
    turn: &mut TurnState,
    rules: &Rules,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> TurnResult {
    let knows = match turn.dealer_resume.take() {
        Some(knows) => knows,
        None => {
            if let Some(end) = use_random_item(table, turn, rules, rng, events) {
                return end;
            }
            knows_next_shell(table)
        }
    };
    tracing::debug!(knows, "dealer sizing up the shotgun");

    loop {
        let Some(front) = table.magazine.peek_front() else {
            events.push(GameEvent::MagazineEmpty);
            turn.dealer_resume = Some(knows);
            return TurnResult::MagazineEmptyReload;
        };
        let target = choose_target(knows, front, rng);
        match fire_at(table, turn, Seat::Opponent, target, rules, events) {
            TurnResult::Miss { .. } => continue,
            other => return other,
        }
    }
}

fn use_random_item<R: Rng>(
    table: &mut Table,
    turn: &mut TurnState,
    rules: &Rules,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<TurnResult> {
    let item = table.opponent.items.take_random(rng).ok()?;
    let signal = resolve_item(table, Seat::Opponent, item, rng, events);
    if table.opponent.is_down() {
        return Some(TurnResult::Collapsed {
            seat: Seat::Opponent,
        });
    }
    turn.settle_item_signal(Seat::Opponent, signal, rules)
}
