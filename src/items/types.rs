//! Item kinds and the per-contestant inventory.

use crate::core::{GameError, Result, INVENTORY_CAPACITY};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Phone,
    BeerCan,
    Magnifier,
    Handcuffs,
    Cigarettes,
    Saw,
    DivineWaiver,
    Adrenaline,
    Inverter,
    BurnerPhone,
    ExpiredMedicine,
}

impl ItemKind {
    pub const ALL: [ItemKind; 11] = [
        ItemKind::Phone,
        ItemKind::BeerCan,
        ItemKind::Magnifier,
        ItemKind::Handcuffs,
        ItemKind::Cigarettes,
        ItemKind::Saw,
        ItemKind::DivineWaiver,
        ItemKind::Adrenaline,
        ItemKind::Inverter,
        ItemKind::BurnerPhone,
        ItemKind::ExpiredMedicine,
    ];

    /// The only items the box ever hands out, in offer-list order.
    pub const OFFERABLE: [ItemKind; 7] = [
        ItemKind::BeerCan,
        ItemKind::Magnifier,
        ItemKind::Handcuffs,
        ItemKind::Cigarettes,
        ItemKind::Saw,
        ItemKind::DivineWaiver,
        ItemKind::Phone,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Phone => "Phone",
            Self::BeerCan => "Beer Can",
            Self::Magnifier => "Magnifier",
            Self::Handcuffs => "Handcuffs",
            Self::Cigarettes => "Cigarettes",
            Self::Saw => "Saw",
            Self::DivineWaiver => "Divine Waiver",
            Self::Adrenaline => "Adrenaline",
            Self::Inverter => "Inverter",
            Self::BurnerPhone => "Burner Phone",
            Self::ExpiredMedicine => "Expired Medicine",
        }
    }

    /// Stable identifier used in saves and typed input.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Phone => "phone",
            Self::BeerCan => "beer_can",
            Self::Magnifier => "magnifier",
            Self::Handcuffs => "handcuffs",
            Self::Cigarettes => "cigarettes",
            Self::Saw => "saw",
            Self::DivineWaiver => "divine_waiver",
            Self::Adrenaline => "adrenaline",
            Self::Inverter => "inverter",
            Self::BurnerPhone => "burner_phone",
            Self::ExpiredMedicine => "expired_medicine",
        }
    }

    /// Parse a display name or identifier, ignoring case and spacing.
    pub fn from_name(text: &str) -> Option<Self> {
        let wanted = normalize(text);
        Self::ALL
            .iter()
            .copied()
            .find(|item| normalize(item.name()) == wanted || item.id() == wanted)
    }

    pub fn is_offerable(&self) -> bool {
        Self::OFFERABLE.contains(self)
    }
}

fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered multiset of items. Order is acquisition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    items: Vec<ItemKind>,
    capacity: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(INVENTORY_CAPACITY)
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Restore a saved hand. Items past capacity are dropped.
    pub fn from_items(items: Vec<ItemKind>, capacity: usize) -> Self {
        let mut items = items;
        items.truncate(capacity);
        Self { items, capacity }
    }

    pub fn add(&mut self, item: ItemKind) -> Result<()> {
        if self.items.len() >= self.capacity {
            return Err(GameError::InventoryFull {
                capacity: self.capacity,
            });
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove the first matching item.
    pub fn remove(&mut self, item: ItemKind) -> Result<()> {
        let index = self
            .items
            .iter()
            .position(|&held| held == item)
            .ok_or(GameError::ItemNotHeld(item))?;
        self.items.remove(index);
        Ok(())
    }

    /// Pick an item uniformly at random without removing it.
    pub fn random_pick<R: Rng>(&self, rng: &mut R) -> Result<ItemKind> {
        self.items
            .choose(rng)
            .copied()
            .ok_or(GameError::InventoryEmpty)
    }

    /// Pick an item uniformly at random and remove it.
    pub fn take_random<R: Rng>(&mut self, rng: &mut R) -> Result<ItemKind> {
        let item = self.random_pick(rng)?;
        self.remove(item)?;
        Ok(item)
    }

    pub fn contains(&self, item: ItemKind) -> bool {
        self.items.contains(&item)
    }

    pub fn items(&self) -> &[ItemKind] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_offerable_subset() {
        assert_eq!(ItemKind::OFFERABLE.len(), 7);
        for item in ItemKind::OFFERABLE {
            assert!(ItemKind::ALL.contains(&item));
        }
        for dead in [
            ItemKind::Adrenaline,
            ItemKind::Inverter,
            ItemKind::BurnerPhone,
            ItemKind::ExpiredMedicine,
        ] {
            assert!(!dead.is_offerable());
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(ItemKind::from_name("beer can"), Some(ItemKind::BeerCan));
        assert_eq!(ItemKind::from_name("  BEER_CAN "), Some(ItemKind::BeerCan));
        assert_eq!(ItemKind::from_name("Divine Waiver"), Some(ItemKind::DivineWaiver));
        assert_eq!(ItemKind::from_name("saw"), Some(ItemKind::Saw));
        assert_eq!(ItemKind::from_name("banana"), None);
    }

    #[test]
    fn test_every_item_round_trips_by_name() {
        for item in ItemKind::ALL {
            assert_eq!(ItemKind::from_name(item.name()), Some(item));
            assert_eq!(ItemKind::from_name(item.id()), Some(item));
        }
    }

    #[test]
    fn test_add_until_full() {
        let mut inv = Inventory::new();
        for _ in 0..INVENTORY_CAPACITY {
            inv.add(ItemKind::Saw).unwrap();
        }
        assert!(inv.is_full());
        let err = inv.add(ItemKind::Phone).unwrap_err();
        assert!(matches!(err, GameError::InventoryFull { capacity: 8 }));
        assert_eq!(inv.len(), INVENTORY_CAPACITY);
        assert!(!inv.contains(ItemKind::Phone));
    }

    #[test]
    fn test_remove_first_occurrence_keeps_order() {
        let mut inv = Inventory::new();
        inv.add(ItemKind::Saw).unwrap();
        inv.add(ItemKind::Phone).unwrap();
        inv.add(ItemKind::Saw).unwrap();
        inv.remove(ItemKind::Saw).unwrap();
        assert_eq!(inv.items(), &[ItemKind::Phone, ItemKind::Saw]);
    }

    #[test]
    fn test_remove_missing() {
        let mut inv = Inventory::new();
        assert!(matches!(
            inv.remove(ItemKind::Magnifier),
            Err(GameError::ItemNotHeld(ItemKind::Magnifier))
        ));
    }

    #[test]
    fn test_random_pick_empty() {
        let mut rng = StdRng::seed_from_u64(3);
        let inv = Inventory::new();
        assert!(matches!(
            inv.random_pick(&mut rng),
            Err(GameError::InventoryEmpty)
        ));
    }

    #[test]
    fn test_take_random_removes_one() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut inv = Inventory::new();
        inv.add(ItemKind::Saw).unwrap();
        inv.add(ItemKind::Phone).unwrap();
        let taken = inv.take_random(&mut rng).unwrap();
        assert_eq!(inv.len(), 1);
        assert!(!inv.contains(taken));
    }

    #[test]
    fn test_from_items_truncates() {
        let inv = Inventory::from_items(vec![ItemKind::Saw; 10], 8);
        assert_eq!(inv.len(), 8);
    }
}
