//! The accusation and its outcome

use crate::data::Tally;
use serde::{Deserialize, Serialize};

/// Corroborating clues needed for an accusation to stick
pub const MIN_CLUES: usize = 2;

/// How an accusation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerdictOutcome {
    /// Enough evidence: the accused is the culprit
    Convicted,
    /// Not enough evidence
    Insufficient,
}

/// Outcome of accusing a suspect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub accused: String,
    pub tally: usize,
    pub required: usize,
    pub corroborating: Vec<String>,
    pub outcome: VerdictOutcome,
}

impl Verdict {
    pub fn from_tally(tally: Tally, required: usize) -> Self {
        let outcome = if tally.count >= required {
            VerdictOutcome::Convicted
        } else {
            VerdictOutcome::Insufficient
        };
        Self {
            accused: tally.accused,
            tally: tally.count,
            required,
            corroborating: tally.corroborating,
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == VerdictOutcome::Convicted
    }

    /// One-line summary for the verdict report
    pub fn headline(&self) -> String {
        match self.outcome {
            VerdictOutcome::Convicted => format!(
                "SUCCESS! Enough evidence: {} is the culprit. Your dossier is flawless.",
                self.accused
            ),
            VerdictOutcome::Insufficient => format!(
                "FAILURE! Not enough evidence: you need at least {} clues to accuse {}. Go back and search more!",
                self.required, self.accused
            ),
        }
    }
}
