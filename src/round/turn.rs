//! Firing the shotgun.

use super::types::{TurnResult, TurnState};
use crate::core::Rules;
use crate::events::GameEvent;
use crate::magazine::ShellKind;
use crate::table::{Seat, Table};

/// Fire the front shell from `shooter` at `target`.
///
/// An empty magazine pops nothing and asks the caller to reload. A live shell
/// costs the target lives and passes the turn; a blank costs nothing and the
/// shooter goes again.
pub fn fire_at(
    table: &mut Table,
    turn: &mut TurnState,
    shooter: Seat,
    target: Seat,
    rules: &Rules,
    events: &mut Vec<GameEvent>,
) -> TurnResult {
    let shell = match table.magazine.pop_front() {
        Ok(shell) => shell,
        Err(_) => {
            events.push(GameEvent::MagazineEmpty);
            return TurnResult::MagazineEmptyReload;
        }
    };

    events.push(GameEvent::ShotFired {
        shooter,
        target,
        shell,
        remaining: table.magazine.status(),
    });
    tracing::debug!(%shooter, %target, %shell, "shot fired");

    match shell {
        ShellKind::Live => {
            let damage = turn.damage_for(shooter, rules);
            let remaining = table.contestant_mut(target).lose_lives(damage);
            events.push(GameEvent::LifeLost {
                seat: target,
                amount: damage,
                remaining,
            });
            turn.double_damage = None;
            turn.next = shooter.other();
            TurnResult::Hit {
                shooter,
                target,
                damage,
            }
        }
        ShellKind::Blank => {
            events.push(GameEvent::ShooterKeepsTurn { shooter });
            turn.next = shooter;
            TurnResult::Miss { shooter }
        }
    }
}
