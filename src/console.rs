//! Line-based front end
//!
//! Plays a session over any reader and writer, one line of input per prompt.
//! Used by `--plain` and by the scenario tests.

use crate::data::{Direction, Id, SUSPECTS};
use crate::game::{Command, GameMessage, GamePhase, SessionStats, TeardownReport, Verdict};
use crate::{Result, Session, VERSION};
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::warn;

const RULE: &str = "=======================================================";

/// Run a whole session: explore, show the dossier, judge.
///
/// Running out of input during exploration starts the judgement; running out
/// while the accused name is expected closes the case with a read error.
pub fn play<R: BufRead, W: Write>(session: &mut Session, mut input: R, mut out: W) -> Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "      DETECTIVE QUEST: THE MANSION MYSTERY (v{VERSION})")?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "Keys: 'e' = left, 'd' = right, 's' = stop and accuse.")?;

    // The Hall is searched on arrival; every other room when it is entered
    if session.phase() == GamePhase::Exploring {
        session.visit_current()?;
    }

    let mut shown = 0;
    while session.phase() == GamePhase::Exploring {
        writeln!(out, "-------------------------------------------------------")?;
        shown = show_messages(session, shown, &mut out)?;
        show_exits(session, &mut out)?;

        write!(out, "\nYOUR CHOICE (e/d/s): ")?;
        out.flush()?;
        match read_line(&mut input) {
            Some(line) => {
                session.handle_input(&line)?;
            }
            None => session.end_of_input()?,
        }
        writeln!(out)?;
    }
    shown = show_messages(session, shown, &mut out)?;

    writeln!(out, "\n{RULE}")?;
    writeln!(out, "         JUDGEMENT: WHO IS THE CULPRIT?")?;
    writeln!(out, "{RULE}")?;
    if session.can_accuse() {
        writeln!(out, "Suspects (check your clues):")?;
        for suspect in SUSPECTS {
            writeln!(out, "   - {suspect}")?;
        }
        write!(out, "\nENTER THE NAME OF THE ACCUSED: ")?;
        out.flush()?;
        match read_line(&mut input) {
            Some(name) => {
                writeln!(out)?;
                session.accuse(&name)?;
            }
            None => {
                writeln!(out)?;
                session.abandon_judging("could not read the accused name")?;
            }
        }
    } else {
        session.skip_judging()?;
    }
    show_messages(session, shown, &mut out)?;
    out.flush()?;
    Ok(())
}

/// One line without its trailing newline; `None` at end of input or on a
/// read failure.
fn read_line<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim_end_matches(&['\n', '\r'][..]).to_string()),
        Err(error) => {
            warn!(%error, "failed to read input");
            None
        }
    }
}

fn show_messages<W: Write>(session: &Session, from: usize, out: &mut W) -> Result<usize> {
    for message in session.message_log.iter().skip(from) {
        writeln!(out, "{}", message.text)?;
    }
    Ok(session.message_log.len())
}

fn show_exits<W: Write>(session: &Session, out: &mut W) -> Result<()> {
    let Some(room) = session.current_room() else {
        return Ok(());
    };
    writeln!(out, "\nWhere to next?")?;
    for (direction, name) in room.exits() {
        let label = match direction {
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        writeln!(out, " [{}] {label} (to {name})", Command::Go(direction).key())?;
    }
    writeln!(out, " [{}] Stop exploring and start the judgement", Command::StopAndAccuse.key())?;
    Ok(())
}

/// Everything that happened in a session, for `--transcript`
#[derive(Debug, Serialize)]
pub struct Transcript<'a> {
    pub session: Id,
    pub phase: GamePhase,
    pub stats: &'a SessionStats,
    pub verdict: Option<&'a Verdict>,
    pub teardown: Option<TeardownReport>,
    pub messages: &'a [GameMessage],
}

impl<'a> Transcript<'a> {
    pub fn of(session: &'a Session) -> Self {
        Self {
            session: session.id,
            phase: session.phase(),
            stats: &session.stats,
            verdict: session.verdict(),
            teardown: session.teardown_report(),
            messages: &session.message_log,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain text: one timestamped line per message
    pub fn to_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{} {:?}: {}\n", m.timestamp.format("%H:%M:%S"), m.kind, m.text))
            .collect()
    }
}
