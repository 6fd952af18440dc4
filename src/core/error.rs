use crate::items::ItemKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("The shotgun is empty")]
    EmptyMagazine,

    #[error("All {capacity} item slots are full")]
    InventoryFull { capacity: usize },

    #[error("No items to pick from")]
    InventoryEmpty,

    #[error("You don't have {0}")]
    ItemNotHeld(ItemKind),

    #[error("Unrecognized choice: {0:?}")]
    InvalidUserSelection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Save file is corrupt: {0}")]
    CorruptSave(String),
}

impl GameError {
    /// Errors that only reject the current input; the prompt is simply asked again.
    pub fn is_rejected_input(&self) -> bool {
        matches!(
            self,
            GameError::InventoryFull { .. }
                | GameError::InventoryEmpty
                | GameError::ItemNotHeld(_)
                | GameError::InvalidUserSelection(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
