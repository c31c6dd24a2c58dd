//! Data structures behind the mansion
//!
//! The room map, the clue ledger and the suspect index.

pub mod clue_ledger;
pub mod mansion;
pub mod suspect_index;

pub use clue_ledger::*;
pub use mansion::*;
pub use suspect_index::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Id(pub Uuid);

impl Id {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
