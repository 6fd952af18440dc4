//! Turning engine events into the lines a player reads.

use crate::events::{FizzleReason, GameEvent};
use crate::magazine::MagazineStatus;
use crate::stage::{SessionEnd, StageOutcome};
use crate::table::Seat;

/// Rough mood of a line, used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Good,
    Bad,
    Warning,
    Reveal,
    Heading,
}

fn lives(n: u32) -> &'static str {
    if n == 1 {
        "life"
    } else {
        "lives"
    }
}

fn shells_left(status: &MagazineStatus) -> String {
    format!(
        "{} shells left ({} live, {} blank)",
        status.total, status.live, status.blank
    )
}

/// One line of narration for an event.
pub fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::StageStarted {
            stage,
            lives: n,
            infinite_mode,
        } => {
            let mode = if *infinite_mode { " (infinite mode)" } else { "" };
            format!("=== Stage {}{} === Both sides start with {} {}.", stage, mode, n, lives(*n))
        }
        GameEvent::RoundStarted { round, .. } => format!("--- Round {} ---", round),
        GameEvent::MagazineLoaded(status) => format!(
            "The dealer loads {} shells: {} live, {} blank.",
            status.total, status.live, status.blank
        ),
        GameEvent::ShotFired {
            shooter,
            target,
            shell,
            remaining,
        } => {
            let at = if shooter == target {
                "themselves".to_string()
            } else {
                target.name().to_string()
            };
            format!("{} shoots {}... {}! {}.", shooter, at, shell, shells_left(remaining))
        }
        GameEvent::LifeLost {
            seat,
            amount,
            remaining,
        } => format!(
            "{} loses {} {}, {} left.",
            seat,
            amount,
            lives(*amount),
            remaining
        ),
        GameEvent::ShooterKeepsTurn { shooter } => format!("{} keeps the shotgun.", shooter),
        GameEvent::MagazineEmpty => "The shotgun is empty. Reloading.".to_string(),
        GameEvent::TurnSkipped { seat } => format!("{} is cuffed and sits this turn out.", seat),
        GameEvent::ItemUsed { seat, item } => format!("{} uses {}.", seat, item),
        GameEvent::ItemFizzled { item, reason, .. } => match reason {
            FizzleReason::EmptyMagazine => format!("{} does nothing, the shotgun is empty.", item),
            FizzleReason::NothingToSteal => format!("{} does nothing, there is nothing to steal.", item),
            FizzleReason::ChainedAdrenaline => "Stolen adrenaline has no kick left.".to_string(),
        },
        GameEvent::ShellRevealed {
            seat: Seat::Player,
            chamber,
            shell,
        } => format!("Shell #{} is {}.", chamber, shell),
        GameEvent::ShellRevealed { chamber, .. } => {
            format!("The dealer takes a look at shell #{}.", chamber)
        }
        GameEvent::ShellEjected { seat, shell } => {
            format!("{} racks the shotgun. A {} shell drops out.", seat, shell)
        }
        GameEvent::ShellInverted { seat } => format!("{} flips the next shell.", seat),
        GameEvent::LifeGained {
            seat,
            amount,
            total,
        } => format!(
            "{} gains {} {}, now at {}.",
            seat,
            amount,
            lives(*amount),
            total
        ),
        GameEvent::HandcuffsApplied { target } => format!("{} is handcuffed.", target),
        GameEvent::SawPrimed { seat } => format!("{} saws off the barrel.", seat),
        GameEvent::ItemReturned { item, .. } => format!("{} goes back into storage.", item),
        GameEvent::ItemStolen {
            thief,
            victim,
            item,
        } => format!("{} grabs {} from {}.", thief, item, victim),
        GameEvent::RoundEndedByBeer => "That was the last shell. The round is over.".to_string(),
        GameEvent::BoxOpened { offered } => {
            format!("A box with {} items slides across the table.", offered)
        }
        GameEvent::ItemAccepted { item } => format!("You take {}.", item),
        GameEvent::ItemDeclined { item } => format!("You leave {}.", item),
        GameEvent::BoxClosed { early: true } => "You push the box away.".to_string(),
        GameEvent::BoxClosed { early: false } => "The box is empty.".to_string(),
        GameEvent::LifeSupportCut => {
            "The defibrillator wires are cut. No more second chances.".to_string()
        }
        GameEvent::StageFinished { stage, outcome } => match outcome {
            StageOutcome::Win => format!("You survive stage {}.", stage),
            StageOutcome::Loss => format!("You fall on stage {}.", stage),
            StageOutcome::Draw => format!("Stage {} ends in a draw.", stage),
        },
        GameEvent::InfiniteModeEntered { winnings } => format!(
            "You swallow the pills. Infinite mode begins with ${}.",
            winnings
        ),
        GameEvent::WinningsDoubled { winnings } => {
            format!("Double it is. You now stand to win ${}.", winnings)
        }
        GameEvent::SessionEnded(end) => match end {
            SessionEnd::Defeated { stage } => format!("Game over. You lost on stage {}.", stage),
            SessionEnd::Stalemate { stage } => {
                format!("Nobody walks away from stage {}. Game over.", stage)
            }
            SessionEnd::Champion => {
                "You win a briefcase of cash and a shotgun to remember it by!".to_string()
            }
            SessionEnd::CashedOut { winnings } => format!("You walk away with ${}.", winnings),
            SessionEnd::Bust { forfeited } => format!(
                "You lost in infinite mode and leave with nothing. ${} gone.",
                forfeited
            ),
        },
        GameEvent::InputRejected { reason } => format!("{}. Try again.", reason),
        GameEvent::GameSaved => "Progress saved.".to_string(),
        GameEvent::SaveFailed { reason } => format!("Could not save progress: {}", reason),
    }
}

pub fn tone(event: &GameEvent) -> Tone {
    match event {
        GameEvent::StageStarted { .. } | GameEvent::RoundStarted { .. } => Tone::Heading,
        GameEvent::LifeLost {
            seat: Seat::Player, ..
        } => Tone::Bad,
        GameEvent::LifeLost { .. } => Tone::Good,
        GameEvent::LifeGained {
            seat: Seat::Player, ..
        } => Tone::Good,
        GameEvent::ShellRevealed {
            seat: Seat::Player, ..
        } => Tone::Reveal,
        GameEvent::StageFinished {
            outcome: StageOutcome::Win,
            ..
        }
        | GameEvent::WinningsDoubled { .. }
        | GameEvent::SessionEnded(SessionEnd::Champion | SessionEnd::CashedOut { .. }) => {
            Tone::Good
        }
        GameEvent::StageFinished { .. } | GameEvent::SessionEnded(_) => Tone::Bad,
        GameEvent::LifeSupportCut
        | GameEvent::InputRejected { .. }
        | GameEvent::SaveFailed { .. } => Tone::Warning,
        _ => Tone::Plain,
    }
}
