//! Tallgrass - a terminal creature battler.
//!
//! The library holds the whole game so integration tests and the headless
//! simulator can drive it without a terminal.

pub mod battle;
pub mod build_info;
pub mod core;
pub mod creature;
pub mod game;
pub mod scenes;
pub mod simulator;
pub mod ui;
