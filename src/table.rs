//! The two contestants and the shotgun between them.

use crate::core::Rules;
use crate::items::Inventory;
use crate::magazine::ShellMagazine;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the table a contestant sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    Player,
    Opponent,
}

impl Seat {
    pub fn other(&self) -> Self {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Seat::Player => "Player",
            Seat::Opponent => "Dealer",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Contestant {
    pub seat: Seat,
    pub lives: u32,
    pub items: Inventory,
}

impl Contestant {
    pub fn new(seat: Seat, lives: u32, inventory_capacity: usize) -> Self {
        Self {
            seat,
            lives,
            items: Inventory::with_capacity(inventory_capacity),
        }
    }

    /// Lose lives, never dropping below zero. Returns the remaining total.
    pub fn lose_lives(&mut self, amount: u32) -> u32 {
        self.lives = self.lives.saturating_sub(amount);
        self.lives
    }

    pub fn gain_lives(&mut self, amount: u32) -> u32 {
        self.lives = self.lives.saturating_add(amount);
        self.lives
    }

    pub fn is_down(&self) -> bool {
        self.lives == 0
    }
}

/// Everything a round mutates: both contestants and the magazine.
#[derive(Debug, Clone)]
pub struct Table {
    pub player: Contestant,
    pub opponent: Contestant,
    pub magazine: ShellMagazine,
}

impl Table {
    pub fn new(rules: &Rules) -> Self {
        let lives = rules.lives_for_stage(1);
        Self {
            player: Contestant::new(Seat::Player, lives, rules.inventory_capacity),
            opponent: Contestant::new(Seat::Opponent, lives, rules.inventory_capacity),
            magazine: ShellMagazine::new(),
        }
    }

    pub fn contestant(&self, seat: Seat) -> &Contestant {
        match seat {
            Seat::Player => &self.player,
            Seat::Opponent => &self.opponent,
        }
    }

    pub fn contestant_mut(&mut self, seat: Seat) -> &mut Contestant {
        match seat {
            Seat::Player => &mut self.player,
            Seat::Opponent => &mut self.opponent,
        }
    }

    /// The first contestant found at zero lives, player checked first.
    pub fn loser(&self) -> Option<Seat> {
        if self.player.is_down() {
            Some(Seat::Player)
        } else if self.opponent.is_down() {
            Some(Seat::Opponent)
        } else {
            None
        }
    }
}
