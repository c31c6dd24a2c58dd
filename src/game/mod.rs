//! Core game logic and state management

pub mod command;
pub mod verdict;

pub use command::{Command, StepOutcome, Visit};
pub use verdict::{Verdict, VerdictOutcome, MIN_CLUES};

use crate::data::*;
use crate::GameError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Where the session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Building,
    Exploring,
    Judging,
    Done,
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GamePhase::Building => write!(f, "Building"),
            GamePhase::Exploring => write!(f, "Exploring"),
            GamePhase::Judging => write!(f, "Judging"),
            GamePhase::Done => write!(f, "Done"),
        }
    }
}

/// What a message in the log is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    System,
    Room,
    ClueFound,
    SuspectLinked,
    LookupMiss,
    NoClue,
    DeadEnd,
    InvalidCommand,
    Dossier,
    Corroboration,
    Verdict,
    ReadError,
}

/// A message to display to the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMessage {
    pub timestamp: DateTime<Utc>,
    pub kind: MessageKind,
    pub text: String,
}

impl GameMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            text: text.into(),
        }
    }
}

/// Session statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub rooms_visited: u32,
    pub clues_collected: u32,
    pub dead_ends: u32,
    pub invalid_commands: u32,
}

/// How much was released when the session closed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownReport {
    pub rooms: usize,
    pub clues: usize,
    pub index_entries: usize,
}

/// One playthrough: the mansion, the detective's ledger and the suspect index
#[derive(Debug)]
pub struct Session {
    pub id: Id,
    phase: GamePhase,
    map: MansionMap,
    ledger: ClueLedger,
    index: SuspectIndex,
    /// Turns taken from the Hall to the current room
    position: Vec<Direction>,
    pub stats: SessionStats,
    verdict: Option<Verdict>,
    teardown: Option<TeardownReport>,
    /// Message log (for UI display)
    pub message_log: Vec<GameMessage>,
}

impl Session {
    /// Build the mansion and its suspect index, then open the front door.
    pub fn new() -> Self {
        let id = Id::new();
        let mut index = SuspectIndex::new();
        let map = MansionMap::build(&mut index);

        let mut session = Self {
            id,
            phase: GamePhase::Building,
            map,
            ledger: ClueLedger::new(),
            index,
            position: Vec::new(),
            stats: SessionStats::default(),
            verdict: None,
            teardown: None,
            message_log: Vec::new(),
        };
        debug!(session = %id, rooms = session.map.len(), "session built");

        session.phase = GamePhase::Exploring;
        session.log(
            MessageKind::System,
            "Welcome to the mansion. Explore the rooms, collect clues, then name the culprit.",
        );
        session
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn map(&self) -> &MansionMap {
        &self.map
    }

    pub fn ledger(&self) -> &ClueLedger {
        &self.ledger
    }

    pub fn index(&self) -> &SuspectIndex {
        &self.index
    }

    pub fn position(&self) -> &[Direction] {
        &self.position
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.map.room(&self.position)
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    pub fn teardown_report(&self) -> Option<TeardownReport> {
        self.teardown
    }

    /// Add a message to the log
    fn log(&mut self, kind: MessageKind, text: impl Into<String>) {
        self.message_log.push(GameMessage::new(kind, text));
    }

    fn expect_phase(&self, expected: GamePhase) -> Result<(), GameError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(GameError::InvalidState(format!(
                "expected {} phase, session is {}",
                expected, self.phase
            )))
        }
    }

    /// Search the current room.
    ///
    /// A clue found here goes into the ledger and is looked up in the suspect
    /// index straight away. The room keeps nothing afterwards. Rooms entered
    /// through a door are searched by [`Session::apply`]; the Hall is only
    /// searched when this is called.
    pub fn visit_current(&mut self) -> Result<Visit, GameError> {
        self.expect_phase(GamePhase::Exploring)?;
        self.search()
    }

    fn search(&mut self) -> Result<Visit, GameError> {
        let (room, found) = {
            let room = self
                .map
                .room_mut(&self.position)
                .ok_or_else(|| GameError::InvalidState("current room is not on the map".into()))?;
            (room.name().to_string(), room.visit())
        };
        self.stats.rooms_visited += 1;
        self.log(MessageKind::Room, format!("You are in: {room}"));

        let Some(clue) = found else {
            self.log(MessageKind::NoClue, "No new clues here.");
            return Ok(Visit::Empty { room });
        };

        if self.ledger.insert(&clue) {
            self.stats.clues_collected += 1;
        }
        info!(room = %room, clue = %clue, "clue collected");
        self.log(MessageKind::ClueFound, format!("CLUE FOUND: \"{clue}\""));

        let suspect = self.index.lookup(&clue).map(str::to_string);
        match &suspect {
            Some(name) => self.log(
                MessageKind::SuspectLinked,
                format!("This clue points to: {name}."),
            ),
            None => {
                warn!(clue = %clue, "collected clue has no suspect on record");
                self.log(
                    MessageKind::LookupMiss,
                    "No suspect on record for this clue.",
                );
            }
        }

        Ok(Visit::Clue {
            room,
            clue,
            suspect,
        })
    }

    /// Feed one line of exploration input
    pub fn handle_input(&mut self, line: &str) -> Result<StepOutcome, GameError> {
        self.expect_phase(GamePhase::Exploring)?;
        match Command::parse(line) {
            Some(command) => self.apply(command),
            None => {
                let input = line.trim_end_matches(&['\n', '\r'][..]).to_string();
                self.stats.invalid_commands += 1;
                self.log(
                    MessageKind::InvalidCommand,
                    format!("Invalid option '{input}'. Try again."),
                );
                Ok(StepOutcome::Invalid { input })
            }
        }
    }

    /// Move through a door and search the room behind it, or stop exploring
    pub fn apply(&mut self, command: Command) -> Result<StepOutcome, GameError> {
        self.expect_phase(GamePhase::Exploring)?;
        match command {
            Command::Go(direction) => {
                let has_door = self
                    .current_room()
                    .and_then(|room| room.child(direction))
                    .is_some();
                if !has_door {
                    self.stats.dead_ends += 1;
                    self.log(
                        MessageKind::DeadEnd,
                        format!("Dead end: there is no door to the {direction} here."),
                    );
                    return Ok(StepOutcome::DeadEnd { direction });
                }

                self.position.push(direction);
                let visit = self.search()?;
                debug!(room = visit.room(), %direction, "moved");
                Ok(StepOutcome::Moved(visit))
            }
            Command::StopAndAccuse => {
                self.log(MessageKind::System, "Ending the exploration.");
                self.enter_judging();
                Ok(StepOutcome::Stopped)
            }
        }
    }

    /// The input stream closed during exploration
    pub fn end_of_input(&mut self) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Exploring)?;
        self.log(MessageKind::System, "No more input. Ending the exploration.");
        self.enter_judging();
        Ok(())
    }

    fn enter_judging(&mut self) {
        self.phase = GamePhase::Judging;
        let dossier: Vec<String> = self.ledger.in_order().map(str::to_string).collect();
        if dossier.is_empty() {
            self.log(MessageKind::Dossier, "No clues were collected.");
        } else {
            self.log(MessageKind::Dossier, "Dossier, in alphabetical order:");
            for clue in dossier {
                self.log(MessageKind::Dossier, format!("  -> \"{clue}\""));
            }
        }
    }

    /// Collected clues, alphabetical
    pub fn dossier(&self) -> Vec<&str> {
        self.ledger.in_order().collect()
    }

    /// Whether there is any evidence to accuse with
    pub fn can_accuse(&self) -> bool {
        self.phase == GamePhase::Judging && !self.ledger.is_empty()
    }

    /// Count the ledger clues pointing at a suspect without ending the game
    pub fn tally(&self, accused: &str) -> Tally {
        self.ledger.tally_for_suspect(accused, &self.index)
    }

    /// Name the culprit. Ends the session.
    pub fn accuse(&mut self, accused: &str) -> Result<Verdict, GameError> {
        self.expect_phase(GamePhase::Judging)?;
        if self.ledger.is_empty() {
            return Err(GameError::NoEvidence);
        }

        let accused = accused.trim_end_matches(&['\n', '\r'][..]);
        self.log(
            MessageKind::System,
            format!("Checking the evidence against {accused}..."),
        );
        let tally = self.tally(accused);
        for clue in &tally.corroborating {
            self.log(
                MessageKind::Corroboration,
                format!("  [+] Clue \"{clue}\" points to {accused}."),
            );
        }

        let verdict = Verdict::from_tally(tally, MIN_CLUES);
        info!(
            accused = %verdict.accused,
            tally = verdict.tally,
            required = verdict.required,
            success = verdict.is_success(),
            "verdict"
        );
        self.log(
            MessageKind::Verdict,
            format!(
                "Clues against {}: {} (at least {} required)",
                verdict.accused, verdict.tally, verdict.required
            ),
        );
        self.log(MessageKind::Verdict, verdict.headline());
        self.verdict = Some(verdict.clone());
        self.enter_done();
        Ok(verdict)
    }

    /// Close judging without an accusation
    pub fn skip_judging(&mut self) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Judging)?;
        if self.ledger.is_empty() {
            self.log(
                MessageKind::System,
                "You cannot accuse anyone without a single clue!",
            );
        } else {
            self.log(MessageKind::System, "The case is left open.");
        }
        self.enter_done();
        Ok(())
    }

    /// The accused name could not be read
    pub fn abandon_judging(&mut self, reason: &str) -> Result<(), GameError> {
        self.expect_phase(GamePhase::Judging)?;
        warn!(reason, "judging abandoned");
        self.log(MessageKind::ReadError, format!("Read error: {reason}"));
        self.enter_done();
        Ok(())
    }

    /// Close the case from whatever phase the session is in, without a
    /// verdict. Does nothing once the session is done.
    pub fn abandon(&mut self, reason: &str) -> Result<(), GameError> {
        match self.phase {
            GamePhase::Exploring | GamePhase::Judging => {
                warn!(reason, phase = %self.phase, "case abandoned");
                self.log(MessageKind::System, format!("Case abandoned: {reason}."));
                self.enter_done();
                Ok(())
            }
            GamePhase::Done => Ok(()),
            GamePhase::Building => Err(GameError::InvalidState(
                "the mansion is still being built".into(),
            )),
        }
    }

    fn enter_done(&mut self) {
        self.phase = GamePhase::Done;
        let report = TeardownReport {
            rooms: self.map.teardown(),
            clues: self.ledger.teardown(),
            index_entries: self.index.teardown(),
        };
        debug!(session = %self.id, ?report, "session closed");
        self.teardown = Some(report);
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_exploring_from_the_hall() {
        let session = Session::new();
        assert_eq!(session.phase(), GamePhase::Exploring);
        assert_eq!(session.current_room().map(Room::name), Some(HALL));
        assert!(session.ledger().is_empty());
        assert_eq!(session.index().len(), 7);
    }

    #[test]
    fn visiting_collects_and_resolves() {
        let mut session = Session::new();
        let visit = session.visit_current().unwrap();
        assert_eq!(
            visit,
            Visit::Clue {
                room: "Hall".to_string(),
                clue: "Encontrado um ticket de onibus na lareira.".to_string(),
                suspect: Some("Empregado".to_string()),
            }
        );
        assert_eq!(session.ledger().len(), 1);

        // Searching again finds nothing new
        let again = session.visit_current().unwrap();
        assert_eq!(again, Visit::Empty { room: "Hall".to_string() });
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.stats.rooms_visited, 2);
        assert_eq!(session.stats.clues_collected, 1);
    }

    #[test]
    fn entering_a_room_searches_it() {
        let mut session = Session::new();
        session.apply(Command::Go(Direction::Right)).unwrap();
        let outcome = session.apply(Command::Go(Direction::Left)).unwrap();

        assert!(matches!(outcome, StepOutcome::Moved(Visit::Clue { ref room, .. }) if room == "Pantry"));
        // The Hall was walked through without being searched
        assert_eq!(
            session.dossier(),
            vec!["A faca sumiu, mas o chef nao se lembra.", "O cofre estava aberto e vazio."]
        );
        assert_eq!(session.stats.rooms_visited, 2);
        assert_eq!(session.tally("Empregado").count, 1);

        // Walking into the Garden finds nothing
        let mut session = Session::new();
        session.apply(Command::Go(Direction::Left)).unwrap();
        let garden = session.apply(Command::Go(Direction::Right)).unwrap();
        assert_eq!(garden, StepOutcome::Moved(Visit::Empty { room: "Garden".to_string() }));
        assert_eq!(session.message_log.last().map(|m| m.kind), Some(MessageKind::NoClue));
    }

    #[test]
    fn dead_end_keeps_the_player_in_place() {
        let mut session = Session::new();
        session.apply(Command::Go(Direction::Right)).unwrap();
        session.apply(Command::Go(Direction::Right)).unwrap();
        assert_eq!(session.current_room().map(Room::name), Some("Dining Room"));

        let outcome = session.apply(Command::Go(Direction::Left)).unwrap();
        assert_eq!(outcome, StepOutcome::DeadEnd { direction: Direction::Left });
        assert_eq!(session.current_room().map(Room::name), Some("Dining Room"));
        assert_eq!(session.phase(), GamePhase::Exploring);
        assert_eq!(session.stats.dead_ends, 1);
    }

    #[test]
    fn invalid_input_is_reported_and_ignored() {
        let mut session = Session::new();
        let outcome = session.handle_input("x\n").unwrap();
        assert_eq!(outcome, StepOutcome::Invalid { input: "x".to_string() });
        assert_eq!(session.position(), &[] as &[Direction]);
        assert_eq!(session.stats.invalid_commands, 1);
        assert_eq!(
            session.message_log.last().map(|m| m.kind),
            Some(MessageKind::InvalidCommand)
        );
    }

    #[test]
    fn wrong_phase_is_an_error() {
        let mut session = Session::new();
        assert!(matches!(
            session.accuse("Chef"),
            Err(GameError::InvalidState(_))
        ));

        session.apply(Command::StopAndAccuse).unwrap();
        assert_eq!(session.phase(), GamePhase::Judging);
        assert!(session.visit_current().is_err());
        assert!(session.handle_input("e").is_err());
        assert!(session.end_of_input().is_err());
    }

    #[test]
    fn accusing_without_clues_is_refused() {
        let mut session = Session::new();
        session.end_of_input().unwrap();
        assert!(!session.can_accuse());
        assert_eq!(session.accuse("Chef"), Err(GameError::NoEvidence));
        assert_eq!(session.phase(), GamePhase::Judging);

        session.skip_judging().unwrap();
        assert_eq!(session.phase(), GamePhase::Done);
        assert!(session.verdict().is_none());
    }

    #[test]
    fn finishing_tears_everything_down() {
        let mut session = Session::new();
        session.visit_current().unwrap();
        session.apply(Command::Go(Direction::Left)).unwrap();
        session.apply(Command::StopAndAccuse).unwrap();
        session.accuse("Senhora").unwrap();

        assert_eq!(
            session.teardown_report(),
            Some(TeardownReport {
                rooms: 8,
                clues: 2,
                index_entries: 7,
            })
        );
        assert!(session.map().is_empty());
        assert!(session.ledger().is_empty());
        assert!(session.index().is_empty());
        assert!(session.accuse("Senhora").is_err());
    }

    #[test]
    fn abandoning_judging_closes_the_session() {
        let mut session = Session::new();
        session.visit_current().unwrap();
        session.end_of_input().unwrap();
        assert!(session.can_accuse());

        session.abandon_judging("input closed").unwrap();
        assert_eq!(session.phase(), GamePhase::Done);
        assert!(session.verdict().is_none());
        assert_eq!(
            session.message_log.last().map(|m| m.kind),
            Some(MessageKind::ReadError)
        );
    }

    #[test]
    fn abandoning_ends_the_session_from_any_phase() {
        let mut session = Session::new();
        session.abandon("closed").unwrap();
        assert_eq!(session.phase(), GamePhase::Done);
        assert_eq!(session.teardown_report().map(|r| r.rooms), Some(8));

        let mut session = Session::new();
        session.visit_current().unwrap();
        session.end_of_input().unwrap();
        session.abandon("closed").unwrap();
        assert_eq!(session.phase(), GamePhase::Done);
        assert!(session.verdict().is_none());

        // Already done: nothing left to release
        session.abandon("closed").unwrap();
        assert_eq!(session.teardown_report().map(|r| r.clues), Some(1));
    }
}
