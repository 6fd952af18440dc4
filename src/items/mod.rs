//! Items: kinds, inventories and their effects.

pub mod effects;
pub mod types;

pub use effects::resolve_item;
pub use types::*;
