//! Player commands and what they lead to

use crate::data::Direction;
use serde::{Deserialize, Serialize};

/// A navigation command typed during exploration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Go(Direction),
    StopAndAccuse,
}

impl Command {
    /// Parse one line of input. The trailing newline is ignored; anything
    /// other than `e`, `d` or `s` (either case) is not a command.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim_end_matches(&['\n', '\r'][..]) {
            "e" | "E" => Some(Command::Go(Direction::Left)),
            "d" | "D" => Some(Command::Go(Direction::Right)),
            "s" | "S" => Some(Command::StopAndAccuse),
            _ => None,
        }
    }

    /// Key that issues this command
    pub fn key(&self) -> char {
        match self {
            Command::Go(Direction::Left) => 'e',
            Command::Go(Direction::Right) => 'd',
            Command::StopAndAccuse => 's',
        }
    }
}

/// What searching the current room turned up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visit {
    Clue {
        room: String,
        clue: String,
        /// `None` if the suspect index has no entry for the clue
        suspect: Option<String>,
    },
    Empty {
        room: String,
    },
}

impl Visit {
    pub fn room(&self) -> &str {
        match self {
            Visit::Clue { room, .. } | Visit::Empty { room } => room,
        }
    }
}

/// Result of one line of exploration input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// Walked into another room and searched it
    Moved(Visit),
    /// No door that way; the player stays put
    DeadEnd { direction: Direction },
    /// Not a command; nothing happened
    Invalid { input: String },
    /// Exploration is over
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_cases() {
        assert_eq!(Command::parse("e"), Some(Command::Go(Direction::Left)));
        assert_eq!(Command::parse("E"), Some(Command::Go(Direction::Left)));
        assert_eq!(Command::parse("d\n"), Some(Command::Go(Direction::Right)));
        assert_eq!(Command::parse("D\r\n"), Some(Command::Go(Direction::Right)));
        assert_eq!(Command::parse("s"), Some(Command::StopAndAccuse));
        assert_eq!(Command::parse("S"), Some(Command::StopAndAccuse));
    }

    #[test]
    fn rejects_everything_else() {
        for line in ["", "\n", "x", "ee", " e", "left", "q"] {
            assert_eq!(Command::parse(line), None, "{line:?}");
        }
    }

    #[test]
    fn keys_round_trip() {
        for command in [
            Command::Go(Direction::Left),
            Command::Go(Direction::Right),
            Command::StopAndAccuse,
        ] {
            assert_eq!(Command::parse(&command.key().to_string()), Some(command));
        }
    }
}
