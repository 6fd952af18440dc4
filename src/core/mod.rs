//! Shared constants, rules and the crate-wide error type.

pub mod constants;
pub mod error;
pub mod rules;

pub use constants::*;
pub use error::{GameError, Result};
pub use rules::{DamageRule, Rules};
