//! Detective Quest: the Mansion Mystery
//!
//! A detective text adventure: walk the rooms of a mansion, collect clues,
//! then name the culprit. The accusation sticks only if enough of the
//! collected clues point at the accused.
//!
//! # Game Mechanics
//!
//! - **Exploration**: from the Hall, go left (`e`) or right (`d`) through the
//!   mansion; each room gives up its clue once
//! - **Dossier**: collected clues are kept sorted and free of duplicates
//! - **Judgement**: stop (`s`), accuse a suspect, and at least
//!   [`game::MIN_CLUES`] clues must point at them
//!
//! # Architecture
//!
//! - `data` - The mansion map, the clue ledger and the suspect index
//! - `game` - Session state machine, commands and verdicts
//! - `console` - Line-based front end over any reader and writer
//! - `tui` - Terminal user interface with ratatui

pub mod console;
pub mod data;
pub mod game;
pub mod tui;

pub use data::*;
pub use game::{GamePhase, Session};

/// Game version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for the game
pub type Result<T> = anyhow::Result<T>;

/// Custom error types
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    #[error("No clues collected: nobody can be accused")]
    NoEvidence,
}
