//! Main application state and rendering

use crate::data::{Direction as Door, SUSPECTS};
use crate::game::{GamePhase, MessageKind, Session, StepOutcome};
use crate::tui::widgets::{DramaticBox, EvidenceGauge};
use crate::tui::{Theme, styled_block, message_color, centered_rect, HELP_TEXT, SMALL_LOGO};
use crate::tui::{create_main_layout, create_content_layout, create_main_area_layout};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};
use std::time::Duration;

/// Clues hidden in the mansion
const TOTAL_CLUES: usize = 7;

/// Application state
pub struct App {
    pub session: Session,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub current_screen: Screen,
    pub input_buffer: String,
    /// Dossier as it stood when exploration ended
    pub dossier: Vec<String>,
}

/// Current screen being displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Exploring,
    Accusing,
    Verdict,
}

impl App {
    pub fn new() -> Self {
        let mut app = Self {
            session: Session::new(),
            theme: Theme::default(),
            running: true,
            show_help: false,
            current_screen: Screen::Exploring,
            input_buffer: String::new(),
            dossier: Vec::new(),
        };
        // Doors search the rooms behind them; the Hall needs a first look
        if let Err(e) = app.session.visit_current() {
            tracing::error!(error = %e, "could not search the hall");
        }
        app
    }

    /// Leave the game, closing the case if it is still open
    fn quit(&mut self) {
        if let Err(e) = self.session.abandon("the game was closed") {
            tracing::error!(error = %e, "could not close the case");
        }
        self.running = false;
    }

    /// Handle keyboard input
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(true);
                }

                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.quit();
                    return Ok(false);
                }

                if self.show_help {
                    self.show_help = false;
                    return Ok(true);
                }

                match self.current_screen {
                    Screen::Exploring => self.handle_exploring_key(key.code),
                    Screen::Accusing => self.handle_accusing_key(key.code),
                    Screen::Verdict => self.running = false,
                }
            }
        }
        Ok(self.running)
    }

    fn handle_exploring_key(&mut self, code: KeyCode) {
        let line = match code {
            KeyCode::Char('?') => {
                self.show_help = true;
                return;
            }
            KeyCode::Esc => "s".to_string(),
            KeyCode::Char(c) => c.to_string(),
            _ => return,
        };

        match self.session.handle_input(&line) {
            Ok(StepOutcome::Stopped) => self.start_judging(),
            Ok(_) => {}
            Err(e) => tracing::error!(error = %e, "command rejected"),
        }
    }

    fn start_judging(&mut self) {
        self.dossier = self.session.dossier().into_iter().map(str::to_string).collect();
        if self.session.can_accuse() {
            self.current_screen = Screen::Accusing;
        } else {
            if let Err(e) = self.session.skip_judging() {
                tracing::error!(error = %e, "could not close the case");
            }
            self.current_screen = Screen::Verdict;
        }
    }

    fn handle_accusing_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let accused = std::mem::take(&mut self.input_buffer);
                if let Err(e) = self.session.accuse(&accused) {
                    tracing::error!(error = %e, "accusation failed");
                }
                self.current_screen = Screen::Verdict;
            }
            KeyCode::Esc => {
                if let Err(e) = self.session.abandon_judging("accusation cancelled") {
                    tracing::error!(error = %e, "could not close the case");
                }
                self.current_screen = Screen::Verdict;
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
            }
            _ => {}
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.render_game(frame);

        match self.current_screen {
            Screen::Exploring => {}
            Screen::Accusing => self.render_accusation(frame),
            Screen::Verdict => self.render_verdict(frame),
        }

        // Overlay help if showing
        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_game(&self, frame: &mut Frame) {
        let area = frame.area();
        let layout = create_main_layout(area);

        self.render_header(frame, layout[0]);

        let content_layout = create_content_layout(layout[1]);
        self.render_room_panel(frame, content_layout[0]);

        let main_layout = create_main_area_layout(content_layout[1]);
        self.render_messages(frame, main_layout[0]);
        self.render_dossier(frame, main_layout[1]);

        self.render_status_bar(frame, layout[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(22),
                Constraint::Min(20),
                Constraint::Length(16),
            ])
            .split(area);

        let logo = Paragraph::new(SMALL_LOGO)
            .style(Style::default().fg(self.theme.accent).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(logo, header_layout[0]);

        let location = self
            .session
            .current_room()
            .map(|room| room.name().to_string())
            .unwrap_or_else(|| "The mansion is closed".to_string());
        let title = Paragraph::new(location)
            .style(Style::default().fg(self.theme.warning))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(title, header_layout[1]);

        let phase = Paragraph::new(format!(" {} ", self.session.phase()))
            .style(Style::default().fg(self.theme.header))
            .alignment(Alignment::Right)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(phase, header_layout[2]);
    }

    fn render_room_panel(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),   // Clue gauge
                Constraint::Min(6),      // Doors
            ])
            .split(area);

        let gauge_block = styled_block("Detective", &self.theme);
        let gauge_area = gauge_block.inner(chunks[0]);
        frame.render_widget(gauge_block, chunks[0]);
        frame.render_widget(
            EvidenceGauge::new("Clues", self.session.stats.clues_collected as usize, TOTAL_CLUES)
                .color(self.theme.success),
            gauge_area,
        );

        let mut doors: Vec<ListItem> = Vec::new();
        if let Some(room) = self.session.current_room() {
            for (door, name) in room.exits() {
                let (key, label) = match door {
                    Door::Left => ('e', "Left"),
                    Door::Right => ('d', "Right"),
                };
                doors.push(ListItem::new(format!("  [{key}] {label} to {name}")));
            }
            if room.is_leaf() {
                doors.push(ListItem::new("  No doors lead on from here").style(Style::default().fg(Color::DarkGray)));
            }
        }
        doors.push(ListItem::new("  ───────────────────"));
        doors.push(ListItem::new("  [s] Stop and accuse"));
        doors.push(ListItem::new("  [?] Help"));

        let door_list = List::new(doors).block(styled_block("Doors", &self.theme));
        frame.render_widget(door_list, chunks[1]);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect) {
        let visible_lines = area.height.saturating_sub(2) as usize;
        let log = &self.session.message_log;
        let start = log.len().saturating_sub(visible_lines);
        let lines: Vec<Line> = log[start..]
            .iter()
            .map(|message| {
                let style = Style::default().fg(message_color(message.kind));
                let style = match message.kind {
                    MessageKind::ClueFound | MessageKind::Verdict | MessageKind::Room => {
                        style.add_modifier(Modifier::BOLD)
                    }
                    _ => style,
                };
                Line::from(Span::styled(message.text.clone(), style))
            })
            .collect();

        let messages = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(styled_block("Notebook", &self.theme));
        frame.render_widget(messages, area);
    }

    fn render_dossier(&self, frame: &mut Frame, area: Rect) {
        // Once the session is closed the ledger is gone; show the snapshot
        let clues: Vec<String> = if self.session.phase() == GamePhase::Exploring {
            self.session.dossier().into_iter().map(str::to_string).collect()
        } else {
            self.dossier.clone()
        };

        let items: Vec<ListItem> = if clues.is_empty() {
            vec![ListItem::new("  No clues collected yet.").style(Style::default().fg(Color::DarkGray))]
        } else {
            clues
                .iter()
                .map(|clue| ListItem::new(format!("  -> \"{clue}\"")))
                .collect()
        };
        let dossier = List::new(items).block(styled_block("Dossier (A-Z)", &self.theme));
        frame.render_widget(dossier, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let stats = &self.session.stats;
        let status_text = format!(
            " Rooms searched: {} | Clues: {} | Dead ends: {} | Press ? for help ",
            stats.rooms_visited, stats.clues_collected, stats.dead_ends,
        );

        let status = Paragraph::new(status_text)
            .style(Style::default().fg(self.theme.fg).bg(Color::DarkGray));
        frame.render_widget(status, area);
    }

    fn render_accusation(&self, frame: &mut Frame) {
        let popup_area = centered_rect(frame.area(), 50, 12);
        frame.render_widget(Clear, popup_area);

        let mut text = vec![
            Line::from(Span::styled(
                "WHO IS THE CULPRIT?",
                Style::default().fg(self.theme.warning).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];
        for suspect in SUSPECTS {
            text.push(Line::from(format!("   - {suspect}")));
        }
        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::raw("Accuse: "),
            Span::styled(
                format!("{}_", self.input_buffer),
                Style::default().fg(self.theme.accent),
            ),
        ]));
        text.push(Line::from(Span::styled(
            "Enter to accuse, Esc to give up",
            Style::default().fg(Color::DarkGray),
        )));

        let popup = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.warning))
                .title(" Judgement "),
        );
        frame.render_widget(popup, popup_area);
    }

    fn render_verdict(&self, frame: &mut Frame) {
        let area = centered_rect(frame.area(), 70, 14);
        frame.render_widget(Clear, area);

        let (title, color, mut lines) = match self.session.verdict() {
            Some(verdict) => {
                let color = if verdict.is_success() { self.theme.success } else { self.theme.alert };
                let mut lines = vec![
                    format!("Accused: {}", verdict.accused),
                    format!("Clues against them: {} (at least {} required)", verdict.tally, verdict.required),
                    String::new(),
                ];
                lines.extend(verdict.corroborating.iter().map(|clue| format!("[+] \"{clue}\"")));
                lines.push(String::new());
                lines.push(verdict.headline());
                ("VERDICT", color, lines)
            }
            None => {
                // No accusation: show why from the log
                let reason = self
                    .session
                    .message_log
                    .last()
                    .map(|m| m.text.clone())
                    .unwrap_or_default();
                ("CASE CLOSED", self.theme.warning, vec![reason])
            }
        };
        lines.push(String::new());
        lines.push("Press any key to leave the mansion".to_string());

        frame.render_widget(
            DramaticBox::new(title).border_color(color).content(lines),
            area,
        );
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let popup_area = centered_rect(frame.area(), 70, 20);
        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(self.theme.fg))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.accent)));
        frame.render_widget(help, popup_area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
