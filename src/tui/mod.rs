//! Terminal User Interface
//!
//! Full-screen front end for the mansion using ratatui

pub mod app;
pub mod widgets;

pub use app::App;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};
use crate::game::MessageKind;

/// Color scheme for the game
pub struct Theme {
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
            header: Color::Magenta,
        }
    }
}

/// Get color for a message kind
pub fn message_color(kind: MessageKind) -> Color {
    match kind {
        MessageKind::System => Color::Cyan,
        MessageKind::Room => Color::White,
        MessageKind::ClueFound => Color::Green,
        MessageKind::SuspectLinked => Color::Magenta,
        MessageKind::LookupMiss | MessageKind::DeadEnd => Color::Yellow,
        MessageKind::NoClue => Color::DarkGray,
        MessageKind::InvalidCommand | MessageKind::ReadError => Color::Red,
        MessageKind::Dossier => Color::Blue,
        MessageKind::Corroboration => Color::Green,
        MessageKind::Verdict => Color::Yellow,
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// Logo for header
pub const SMALL_LOGO: &str = " DETECTIVE QUEST ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════════════════════╗
║                       CONTROLS                                ║
╠═══════════════════════════════════════════════════════════════╣
║  e     Go through the left door                               ║
║  d     Go through the right door                              ║
║  s     Stop exploring and accuse a suspect                    ║
║  Esc   Stop exploring / cancel the accusation                 ║
║  ?     Toggle this help                                       ║
║  Ctrl+C  Quit                                                 ║
╠═══════════════════════════════════════════════════════════════╣
║                      JUDGEMENT                                ║
╠═══════════════════════════════════════════════════════════════╣
║  Type the suspect's exact name and press Enter.               ║
║  At least 2 collected clues must point at them.               ║
╚═══════════════════════════════════════════════════════════════╝
"#;

/// Create the main layout
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Min(10),     // Main content
            Constraint::Length(1),   // Status bar
        ])
        .split(area)
        .to_vec()
}

/// Create the game content layout (left panel + main area)
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),  // Room panel
            Constraint::Percentage(70),  // Main area
        ])
        .split(area)
        .to_vec()
}

/// Create the main area layout (messages + dossier)
pub fn create_main_area_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(65),  // Messages
            Constraint::Percentage(35),  // Dossier
        ])
        .split(area)
        .to_vec()
}

/// Centered popup of at most `width` x `height`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
