//! A presenter that plays from a script. Used by tests.

use super::presenter::{OfferChoice, PlayerAction, Presenter, TableView};
use crate::core::{GameError, Result};
use crate::events::GameEvent;
use crate::items::ItemKind;
use crate::table::Seat;
use std::collections::VecDeque;
use std::io;

/// Answers prompts from queued responses and records every narrated event.
///
/// Once the action or target queue runs out the presenter falls back to
/// firing at `default_target`, if set. Running out of answers with no
/// fallback ends the session with an end-of-input error.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    actions: VecDeque<PlayerAction>,
    targets: VecDeque<Seat>,
    items: VecDeque<ItemKind>,
    offers: VecDeque<OfferChoice>,
    confirms: VecDeque<bool>,
    default_target: Option<Seat>,
    events: Vec<GameEvent>,
    views: Vec<TableView>,
}

impl ScriptedPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(mut self, actions: Vec<PlayerAction>) -> Self {
        self.actions.extend(actions);
        self
    }

    pub fn targets(mut self, targets: Vec<Seat>) -> Self {
        self.targets.extend(targets);
        self
    }

    pub fn items(mut self, items: Vec<ItemKind>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn offers(mut self, offers: Vec<OfferChoice>) -> Self {
        self.offers.extend(offers);
        self
    }

    /// Answers for infinite-mode entry and double-or-quit, in order.
    pub fn confirms(mut self, confirms: Vec<bool>) -> Self {
        self.confirms.extend(confirms);
        self
    }

    pub fn always_fire_at(mut self, target: Seat) -> Self {
        self.default_target = Some(target);
        self
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn views(&self) -> &[TableView] {
        &self.views
    }

    fn out_of_script(prompt: &str) -> GameError {
        GameError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("script has no answer for {}", prompt),
        ))
    }
}

impl Presenter for ScriptedPresenter {
    fn narrate(&mut self, event: &GameEvent) {
        self.events.push(event.clone());
    }

    fn choose_action(&mut self, view: &TableView) -> Result<PlayerAction> {
        self.views.push(view.clone());
        match self.actions.pop_front() {
            Some(action) => Ok(action),
            None if self.default_target.is_some() => Ok(PlayerAction::Fire),
            None => Err(Self::out_of_script("action")),
        }
    }

    fn choose_target(&mut self) -> Result<Seat> {
        self.targets
            .pop_front()
            .or(self.default_target)
            .ok_or_else(|| Self::out_of_script("target"))
    }

    fn choose_item(&mut self, _held: &[ItemKind]) -> Result<ItemKind> {
        self.items
            .pop_front()
            .ok_or_else(|| Self::out_of_script("item"))
    }

    fn offer_item(&mut self, _item: ItemKind) -> Result<OfferChoice> {
        Ok(self.offers.pop_front().unwrap_or(OfferChoice::Decline))
    }

    fn confirm_infinite_mode(&mut self) -> Result<bool> {
        Ok(self.confirms.pop_front().unwrap_or(false))
    }

    fn confirm_double_or_quit(&mut self, _winnings: u64) -> Result<bool> {
        Ok(self.confirms.pop_front().unwrap_or(false))
    }
}
