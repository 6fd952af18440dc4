//! Stage progression and the session controller.

pub mod logic;
pub mod types;

pub use logic::Session;
pub use types::{SessionEnd, StageOutcome, StageState};
