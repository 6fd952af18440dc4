//! The boundary between the engine and whoever is sitting at the table.

use crate::core::{GameError, Result};
use crate::events::GameEvent;
use crate::items::ItemKind;
use crate::magazine::MagazineStatus;
use crate::table::{Seat, Table};

/// Input actions on the player's turn (UI-agnostic).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Fire,
    UseItem,
}

impl PlayerAction {
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_lowercase().as_str() {
            "f" | "fire" | "shoot" => Ok(Self::Fire),
            "i" | "item" | "use" | "use item" => Ok(Self::UseItem),
            other => Err(GameError::InvalidUserSelection(other.to_string())),
        }
    }
}

/// Answer to a single box offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferChoice {
    Accept,
    Decline,
    /// Close the box, skipping every remaining offer.
    Stop,
}

impl OfferChoice {
    pub fn parse(text: &str) -> Result<Self> {
        match text.trim().to_lowercase().as_str() {
            "y" | "yes" | "take" => Ok(Self::Accept),
            "n" | "no" | "skip" => Ok(Self::Decline),
            "q" | "quit" | "stop" | "done" => Ok(Self::Stop),
            other => Err(GameError::InvalidUserSelection(other.to_string())),
        }
    }
}

/// Parse a shot target as typed by the player.
pub fn parse_target(text: &str) -> Result<Seat> {
    match text.trim().to_lowercase().as_str() {
        "s" | "self" | "me" => Ok(Seat::Player),
        "d" | "o" | "dealer" | "opponent" => Ok(Seat::Opponent),
        other => Err(GameError::InvalidUserSelection(other.to_string())),
    }
}

/// Parse an item by name or by 1-based position in `held`.
pub fn parse_item(text: &str, held: &[ItemKind]) -> Result<ItemKind> {
    let trimmed = text.trim();
    if let Ok(position) = trimmed.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|i| held.get(i))
            .copied()
            .ok_or_else(|| GameError::InvalidUserSelection(trimmed.to_string()));
    }
    ItemKind::from_name(trimmed).ok_or_else(|| GameError::InvalidUserSelection(trimmed.to_string()))
}

pub fn parse_yes_no(text: &str) -> Result<bool> {
    match text.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        other => Err(GameError::InvalidUserSelection(other.to_string())),
    }
}

/// What the player can see when deciding.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    pub stage: u8,
    pub round: u32,
    pub player_lives: u32,
    pub opponent_lives: u32,
    pub player_items: Vec<ItemKind>,
    pub opponent_items: Vec<ItemKind>,
    pub magazine: MagazineStatus,
}

impl TableView {
    pub fn capture(table: &Table, stage: u8, round: u32) -> Self {
        Self {
            stage,
            round,
            player_lives: table.player.lives,
            opponent_lives: table.opponent.lives,
            player_items: table.player.items.items().to_vec(),
            opponent_items: table.opponent.items.items().to_vec(),
            magazine: table.magazine.status(),
        }
    }
}

/// Presentation and input for one human player.
///
/// Prompts return `InvalidUserSelection` for input they cannot parse; the
/// engine reports it and asks again. Any other error ends the session.
pub trait Presenter {
    fn narrate(&mut self, event: &GameEvent);

    /// Fire or use an item.
    fn choose_action(&mut self, view: &TableView) -> Result<PlayerAction>;

    /// Shoot yourself or the dealer.
    fn choose_target(&mut self) -> Result<Seat>;

    fn choose_item(&mut self, held: &[ItemKind]) -> Result<ItemKind>;

    fn offer_item(&mut self, item: ItemKind) -> Result<OfferChoice>;

    fn confirm_infinite_mode(&mut self) -> Result<bool>;

    fn confirm_double_or_quit(&mut self, winnings: u64) -> Result<bool>;
}
