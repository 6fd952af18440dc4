//! Narration records produced by the engine and consumed by a presenter.

use crate::items::ItemKind;
use crate::magazine::{MagazineStatus, ShellKind};
use crate::stage::{SessionEnd, StageOutcome};
use crate::table::Seat;

/// Why an item had no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FizzleReason {
    EmptyMagazine,
    NothingToSteal,
    /// A stolen Adrenaline cannot steal again.
    ChainedAdrenaline,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    StageStarted {
        stage: u8,
        lives: u32,
        infinite_mode: bool,
    },
    RoundStarted {
        stage: u8,
        round: u32,
    },
    MagazineLoaded(MagazineStatus),
    ShotFired {
        shooter: Seat,
        target: Seat,
        shell: ShellKind,
        remaining: MagazineStatus,
    },
    LifeLost {
        seat: Seat,
        amount: u32,
        remaining: u32,
    },
    /// A blank kept the shooter's turn alive.
    ShooterKeepsTurn {
        shooter: Seat,
    },
    MagazineEmpty,
    TurnSkipped {
        seat: Seat,
    },
    ItemUsed {
        seat: Seat,
        item: ItemKind,
    },
    ItemFizzled {
        seat: Seat,
        item: ItemKind,
        reason: FizzleReason,
    },
    /// Phone, Burner Phone and Magnifier. `chamber` is 1-based.
    ShellRevealed {
        seat: Seat,
        chamber: usize,
        shell: ShellKind,
    },
    ShellEjected {
        seat: Seat,
        shell: ShellKind,
    },
    ShellInverted {
        seat: Seat,
    },
    LifeGained {
        seat: Seat,
        amount: u32,
        total: u32,
    },
    HandcuffsApplied {
        target: Seat,
    },
    SawPrimed {
        seat: Seat,
    },
    ItemReturned {
        seat: Seat,
        item: ItemKind,
    },
    ItemStolen {
        thief: Seat,
        victim: Seat,
        item: ItemKind,
    },
    RoundEndedByBeer,
    BoxOpened {
        offered: usize,
    },
    ItemAccepted {
        item: ItemKind,
    },
    ItemDeclined {
        item: ItemKind,
    },
    BoxClosed {
        early: bool,
    },
    /// Stage 3 only, once a contestant is close to death.
    LifeSupportCut,
    StageFinished {
        stage: u8,
        outcome: StageOutcome,
    },
    InfiniteModeEntered {
        winnings: u64,
    },
    WinningsDoubled {
        winnings: u64,
    },
    SessionEnded(SessionEnd),
    /// Rejected input; the same prompt is asked again.
    InputRejected {
        reason: String,
    },
    GameSaved,
    SaveFailed {
        reason: String,
    },
}
