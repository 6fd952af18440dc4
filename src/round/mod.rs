//! Turns and rounds: firing, the dealer's policy and the round state machine.

pub mod logic;
pub mod opponent;
pub mod turn;
pub mod types;

pub use logic::{RoundController, RoundEnd};
pub use opponent::{knows_next_shell, take_opponent_turn};
pub use turn::fire_at;
pub use types::{TurnResult, TurnState};
