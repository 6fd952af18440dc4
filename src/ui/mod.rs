//! Presentation: the `Presenter` seam, narration text and the console front-end.

pub mod console;
pub mod narration;
pub mod presenter;
pub mod testing;

pub use console::{ConsolePresenter, StartChoice};
pub use presenter::{
    parse_item, parse_target, parse_yes_no, OfferChoice, PlayerAction, Presenter, TableView,
};
