//! Headless battle simulator for Monte Carlo balance checks.
//!
//! Runs whole battles with the same initiative, damage and experience rules
//! the animated turn uses, minus the animation, and aggregates the results.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, simulate_battle, BattleStats};
