//! Monopoly Strategy Simulation Library
//!
//! Plays many independent games of a simplified Monopoly-style board game
//! and compares how often each fixed purchasing strategy ends up winning.
//!
//! ## Modules
//!
//! - `player`: balance ledger, rent transfer and die rolls
//! - `strategy`: the four purchasing behaviors
//! - `board`: properties, ownership and random board generation
//! - `game`: single-game turn engine
//! - `runner`: repeated games and per-strategy statistics
//!
//! ## Usage
//!
//! ```bash
//! # Run 300 games with the default board
//! cargo run --bin monopoly --release
//!
//! # Reproducible batch
//! cargo run --bin monopoly --release -- --simulations 10000 --seed 42
//! ```

pub mod board;
pub mod error;
pub mod game;
pub mod player;
pub mod runner;
pub mod strategy;

pub use error::{Result, SimulationError};
