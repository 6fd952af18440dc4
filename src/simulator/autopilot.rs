//! An automated player, plus the per-run statistics it collects.

use super::config::PlayerStrategy;
use crate::core::Result;
use crate::events::GameEvent;
use crate::items::ItemKind;
use crate::magazine::ShellKind;
use crate::stage::{SessionEnd, StageOutcome};
use crate::table::Seat;
use crate::ui::{OfferChoice, PlayerAction, Presenter, TableView};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

/// Statistics for a single simulated game.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub end: Option<SessionEnd>,
    /// Cleared stage 3, whatever happened afterwards.
    pub champion: bool,
    pub final_stage: u8,
    pub stages_won: u32,
    pub rounds: u32,
    pub shots: u32,
    pub items_used: u32,
    pub lives_lost: u32,
    pub winnings: u64,
}

pub struct AutoPilot<R: Rng> {
    strategy: PlayerStrategy,
    rng: R,
    play_infinite: bool,
    double_down: bool,
    /// Front shell as far as the player knows.
    known_front: Option<ShellKind>,
    planned_target: Seat,
    planned_item: Option<ItemKind>,
    stats: RunStats,
}

impl<R: Rng> AutoPilot<R> {
    pub fn new(strategy: PlayerStrategy, rng: R, play_infinite: bool, double_down: bool) -> Self {
        Self {
            strategy,
            rng,
            play_infinite,
            double_down,
            known_front: None,
            planned_target: Seat::Opponent,
            planned_item: None,
            stats: RunStats::default(),
        }
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::StageStarted { stage, .. } => self.stats.final_stage = *stage,
            GameEvent::RoundStarted { .. } => self.stats.rounds += 1,
            GameEvent::ShotFired {
                shooter: Seat::Player,
                ..
            } => self.stats.shots += 1,
            GameEvent::ItemUsed {
                seat: Seat::Player, ..
            } => self.stats.items_used += 1,
            GameEvent::LifeLost {
                seat: Seat::Player,
                amount,
                ..
            } => self.stats.lives_lost += amount,
            GameEvent::StageFinished {
                outcome: StageOutcome::Win,
                ..
            } => self.stats.stages_won += 1,
            GameEvent::InfiniteModeEntered { winnings }
            | GameEvent::WinningsDoubled { winnings } => self.stats.winnings = *winnings,
            GameEvent::SessionEnded(end) => {
                self.stats.end = Some(*end);
                match end {
                    SessionEnd::Champion => self.stats.champion = true,
                    SessionEnd::CashedOut { winnings } => {
                        self.stats.champion = true;
                        self.stats.winnings = *winnings;
                    }
                    SessionEnd::Bust { .. } => {
                        self.stats.champion = true;
                        self.stats.winnings = 0;
                    }
                    SessionEnd::Defeated { .. } | SessionEnd::Stalemate { .. } => {}
                }
            }
            _ => {}
        }
    }

    fn track_front(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ShellRevealed {
                seat: Seat::Player,
                chamber: 1,
                shell,
            } => self.known_front = Some(*shell),
            GameEvent::ShellInverted { .. } => {
                self.known_front = self.known_front.map(ShellKind::inverted);
            }
            GameEvent::MagazineLoaded(_)
            | GameEvent::ShotFired { .. }
            | GameEvent::ShellEjected { .. } => self.known_front = None,
            _ => {}
        }
    }

    fn plan_counting(&mut self, view: &TableView) -> PlayerAction {
        let held = |item: ItemKind| view.player_items.contains(&item);

        let wanted = if held(ItemKind::Cigarettes) {
            Some(ItemKind::Cigarettes)
        } else if self.known_front.is_none() && held(ItemKind::Magnifier) {
            Some(ItemKind::Magnifier)
        } else if self.known_front == Some(ShellKind::Blank) && held(ItemKind::Inverter) {
            Some(ItemKind::Inverter)
        } else if self.known_front.is_none()
            && held(ItemKind::BeerCan)
            && view.magazine.total > 1
            && view.magazine.live > view.magazine.blank
        {
            Some(ItemKind::BeerCan)
        } else {
            None
        };
        if let Some(item) = wanted {
            self.planned_item = Some(item);
            return PlayerAction::UseItem;
        }

        self.planned_target = match self.known_front {
            Some(ShellKind::Live) => Seat::Opponent,
            Some(ShellKind::Blank) => Seat::Player,
            None if view.magazine.blank > view.magazine.live => Seat::Player,
            None => Seat::Opponent,
        };
        PlayerAction::Fire
    }

    fn plan_random(&mut self, view: &TableView) -> PlayerAction {
        if !view.player_items.is_empty() && self.rng.gen_bool(0.3) {
            self.planned_item = view.player_items.choose(&mut self.rng).copied();
            return PlayerAction::UseItem;
        }
        self.planned_target = if self.rng.gen_bool(0.5) {
            Seat::Player
        } else {
            Seat::Opponent
        };
        PlayerAction::Fire
    }
}

impl<R: Rng> Presenter for AutoPilot<R> {
    fn narrate(&mut self, event: &GameEvent) {
        self.record(event);
        self.track_front(event);
    }

    fn choose_action(&mut self, view: &TableView) -> Result<PlayerAction> {
        Ok(match self.strategy {
            PlayerStrategy::Counting => self.plan_counting(view),
            PlayerStrategy::Random => self.plan_random(view),
        })
    }

    fn choose_target(&mut self) -> Result<Seat> {
        Ok(self.planned_target)
    }

    fn choose_item(&mut self, held: &[ItemKind]) -> Result<ItemKind> {
        match self.planned_item.take() {
            Some(item) => Ok(item),
            None => Ok(held.first().copied().unwrap_or(ItemKind::DivineWaiver)),
        }
    }

    fn offer_item(&mut self, _item: ItemKind) -> Result<OfferChoice> {
        Ok(match self.strategy {
            PlayerStrategy::Counting => OfferChoice::Accept,
            PlayerStrategy::Random if self.rng.gen_bool(0.5) => OfferChoice::Accept,
            PlayerStrategy::Random => OfferChoice::Decline,
        })
    }

    fn confirm_infinite_mode(&mut self) -> Result<bool> {
        Ok(self.play_infinite)
    }

    fn confirm_double_or_quit(&mut self, _winnings: u64) -> Result<bool> {
        Ok(self.double_down)
    }
}
