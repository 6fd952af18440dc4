//! The shotgun's magazine: an ordered queue of shells, front fires first.

use crate::core::{GameError, Result, MAGAZINE_SIZE};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellKind {
    Live,
    Blank,
}

impl ShellKind {
    pub fn inverted(self) -> Self {
        match self {
            ShellKind::Live => ShellKind::Blank,
            ShellKind::Blank => ShellKind::Live,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellKind::Live => "live",
            ShellKind::Blank => "blank",
        }
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Public shell counts, shown after every load and shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MagazineStatus {
    pub total: usize,
    pub live: usize,
    pub blank: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ShellMagazine {
    shells: VecDeque<ShellKind>,
    /// Tail shell of the most recent load. Not touched when shells are consumed.
    last_loaded: Option<ShellKind>,
}

impl ShellMagazine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an exact sequence, front first. Used by tests and replays.
    pub fn from_shells(shells: Vec<ShellKind>) -> Self {
        let last_loaded = shells.last().copied();
        Self {
            shells: shells.into(),
            last_loaded,
        }
    }

    /// Replace the contents with a fresh load of independently random shells.
    pub fn reload<R: Rng>(&mut self, rng: &mut R) {
        self.shells = (0..MAGAZINE_SIZE)
            .map(|_| {
                if rng.gen_bool(0.5) {
                    ShellKind::Live
                } else {
                    ShellKind::Blank
                }
            })
            .collect();
        self.last_loaded = self.shells.back().copied();
        tracing::debug!(status = ?self.status(), "magazine reloaded");
    }

    pub fn pop_front(&mut self) -> Result<ShellKind> {
        self.shells.pop_front().ok_or(GameError::EmptyMagazine)
    }

    pub fn peek_front(&self) -> Option<ShellKind> {
        self.shells.front().copied()
    }

    pub fn peek_at(&self, index: usize) -> Option<ShellKind> {
        self.shells.get(index).copied()
    }

    /// Flip the front shell. Returns the new kind, or None when empty.
    pub fn invert_front(&mut self) -> Option<ShellKind> {
        let front = self.shells.front_mut()?;
        *front = front.inverted();
        Some(*front)
    }

    pub fn last_loaded(&self) -> Option<ShellKind> {
        self.last_loaded
    }

    pub fn count(&self) -> usize {
        self.shells.len()
    }

    pub fn count_by_kind(&self, kind: ShellKind) -> usize {
        self.shells.iter().filter(|&&s| s == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.shells.is_empty()
    }

    pub fn status(&self) -> MagazineStatus {
        MagazineStatus {
            total: self.count(),
            live: self.count_by_kind(ShellKind::Live),
            blank: self.count_by_kind(ShellKind::Blank),
        }
    }
}
