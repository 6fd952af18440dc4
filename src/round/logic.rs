//! One round: load the shotgun, open the box, alternate turns until the
//! magazine runs dry or someone is down.

use super::opponent::take_opponent_turn;
use super::turn::fire_at;
use super::types::{TurnResult, TurnState};
use crate::core::{GameError, Result, Rules};
use crate::events::GameEvent;
use crate::items::{resolve_item, ItemKind};
use crate::table::{Seat, Table};
use crate::ui::{OfferChoice, PlayerAction, Presenter, TableView};
use rand::seq::SliceRandom;
use rand::Rng;

/// Why a round stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEnd {
    /// `loser` is at zero lives.
    Decided { loser: Seat },
    /// Nothing left in the shotgun. `turn.next` says who opens the next round.
    MagazineSpent,
}

/// Drives a single round over borrowed session state.
pub struct RoundController<'a, P: Presenter, R: Rng> {
    pub table: &'a mut Table,
    pub turn: &'a mut TurnState,
    pub rules: &'a Rules,
    pub presenter: &'a mut P,
    pub rng: &'a mut R,
    pub stage: u8,
    pub round: u32,
}

impl<'a, P: Presenter, R: Rng> RoundController<'a, P, R> {
    /// Load, offer the box, then play turns until the round ends.
    pub fn play(&mut self) -> Result<RoundEnd> {
        self.load()?;

        loop {
            if let Some(loser) = self.table.loser() {
                return Ok(RoundEnd::Decided { loser });
            }

            let seat = self.turn.next;
            if self.turn.take_skip(seat) {
                self.narrate(vec![GameEvent::TurnSkipped { seat }]);
                self.turn.next = seat.other();
                continue;
            }

            let result = match seat {
                Seat::Player => self.player_turn()?,
                Seat::Opponent => self.opponent_turn(),
            };
            tracing::debug!(%seat, ?result, "turn over");

            // A primed saw does not outlive its user's turn.
            if self.turn.double_damage == Some(seat) {
                self.turn.double_damage = None;
            }

            match result {
                TurnResult::Hit { .. } | TurnResult::Collapsed { .. } => {}
                TurnResult::Miss { shooter } => self.turn.next = shooter,
                TurnResult::SkipOpponentTurn => {
                    self.turn.skip = Some(seat.other());
                    self.turn.next = seat.other();
                }
                TurnResult::DoubleDamageNextShot => self.turn.next = seat.other(),
                TurnResult::RoundEndedByBeer => {
                    self.turn.next = seat.other();
                    return Ok(RoundEnd::MagazineSpent);
                }
                TurnResult::MagazineEmptyReload => {
                    self.turn.next = seat;
                    return Ok(RoundEnd::MagazineSpent);
                }
            }

            self.check_life_support();
        }
    }

    fn load(&mut self) -> Result<()> {
        self.table.magazine.reload(self.rng);
        self.narrate(vec![
            GameEvent::RoundStarted {
                stage: self.stage,
                round: self.round,
            },
            GameEvent::MagazineLoaded(self.table.magazine.status()),
        ]);
        self.offer_box()
    }

    /// Offer the player a box of distinct items, one at a time.
    pub fn offer_box(&mut self) -> Result<()> {
        let size = self.rules.box_size_for_stage(self.stage);
        if size == 0 {
            return Ok(());
        }

        let offered: Vec<ItemKind> = ItemKind::OFFERABLE
            .choose_multiple(self.rng, size)
            .copied()
            .collect();
        self.narrate(vec![GameEvent::BoxOpened {
            offered: offered.len(),
        }]);

        for item in offered {
            match self.prompt(|p| p.offer_item(item))? {
                OfferChoice::Accept => match self.table.player.items.add(item) {
                    Ok(()) => self.narrate(vec![GameEvent::ItemAccepted { item }]),
                    Err(e) => self.reject(&e),
                },
                OfferChoice::Decline => self.narrate(vec![GameEvent::ItemDeclined { item }]),
                OfferChoice::Stop => {
                    self.narrate(vec![GameEvent::BoxClosed { early: true }]);
                    return Ok(());
                }
            }
        }

        self.narrate(vec![GameEvent::BoxClosed { early: false }]);
        Ok(())
    }

    /// The human's turn: use items freely, fire until something hits.
    fn player_turn(&mut self) -> Result<TurnResult> {
        loop {
            if self.table.magazine.is_empty() {
                self.narrate(vec![GameEvent::MagazineEmpty]);
                return Ok(TurnResult::MagazineEmptyReload);
            }

            let view = TableView::capture(self.table, self.stage, self.round);
            match self.prompt(|p| p.choose_action(&view))? {
                PlayerAction::Fire => {
                    let target = self.prompt(|p| p.choose_target())?;
                    let mut events = Vec::new();
                    let result = fire_at(
                        self.table,
                        self.turn,
                        Seat::Player,
                        target,
                        self.rules,
                        &mut events,
                    );
                    self.narrate(events);
                    if !matches!(result, TurnResult::Miss { .. }) {
                        return Ok(result);
                    }
                }
                PlayerAction::UseItem => {
                    if self.table.player.items.is_empty() {
                        self.reject(&GameError::InventoryEmpty);
                        continue;
                    }
                    let held = self.table.player.items.items().to_vec();
                    let item = self.prompt(|p| p.choose_item(&held))?;
                    if let Err(e) = self.table.player.items.remove(item) {
                        self.reject(&e);
                        continue;
                    }

                    let mut events = Vec::new();
                    let signal = resolve_item(self.table, Seat::Player, item, self.rng, &mut events);
                    self.narrate(events);

                    if self.table.player.is_down() {
                        return Ok(TurnResult::Collapsed { seat: Seat::Player });
                    }
                    if let Some(end) = self.turn.settle_item_signal(Seat::Player, signal, self.rules) {
                        return Ok(end);
                    }
                }
            }
        }
    }

    fn opponent_turn(&mut self) -> TurnResult {
        let mut events = Vec::new();
        let result = take_opponent_turn(self.table, self.turn, self.rules, self.rng, &mut events);
        self.narrate(events);
        result
    }

    fn check_life_support(&mut self) {
        if self.stage != 3 || self.turn.life_support_warned {
            return;
        }
        let threshold = self.rules.life_support_threshold;
        if self.table.player.lives <= threshold || self.table.opponent.lives <= threshold {
            self.turn.life_support_warned = true;
            self.narrate(vec![GameEvent::LifeSupportCut]);
        }
    }

    /// Ask until the answer parses. Rejected input is reported, not fatal.
    fn prompt<T>(&mut self, mut ask: impl FnMut(&mut P) -> Result<T>) -> Result<T> {
        loop {
            match ask(&mut *self.presenter) {
                Ok(answer) => return Ok(answer),
                Err(e) if e.is_rejected_input() => self.reject(&e),
                Err(e) => return Err(e),
            }
        }
    }

    fn reject(&mut self, error: &GameError) {
        self.presenter.narrate(&GameEvent::InputRejected {
            reason: error.to_string(),
        });
    }

    fn narrate(&mut self, events: Vec<GameEvent>) {
        for event in &events {
            self.presenter.narrate(event);
        }
    }
}
