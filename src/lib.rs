//! Buckshot - shotgun roulette against a dealer.
//!
//! The engine is UI-agnostic: everything the player sees goes through the
//! `ui::Presenter` trait and every save through `save_manager::SaveStore`.

pub mod build_info;
pub mod core;
pub mod events;
pub mod items;
pub mod magazine;
pub mod round;
pub mod save_manager;
pub mod simulator;
pub mod stage;
pub mod table;
pub mod ui;
