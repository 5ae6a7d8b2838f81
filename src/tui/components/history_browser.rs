//! # History Browser Component
//!
//! Overlay for reopening and deleting recorded commands. Opened with
//! Ctrl+O, dismissed with Esc.
//!
//! ```text
//! ┌ History (3) ────────────────────────────────────────┐
//! │ When         Tool      Tier     Command             │
//! │▶ 03-14 09:12 tellraw   1.21.5+  /tellraw @a "hi"    │
//! │  03-13 18:40 title     1.16+    /title @p title ... │
//! ├ Preview ────────────────────────────────────────────┤
//! │ hi                                                  │
//! │ /tellraw @a "hi"                                    │
//! └──────────── d Delete  Enter Open  Esc Back ─────────┘
//! ```
//!
//! `HistoryBrowserState` lives in `TuiState`; `HistoryBrowser` borrows it
//! for one frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap};

use crate::core::history::HistoryEntry;
use crate::tui::components::segment_list::segment_style;
use crate::tui::event::TuiEvent;

const PREVIEW_HEIGHT: u16 = 5;

/// Persistent state for the history overlay.
pub struct HistoryBrowserState {
    pub entries: Vec<HistoryEntry>,
    /// ID armed by a first `d`; a second `d` on the same row deletes it.
    pub pending_delete: Option<String>,
    pub table: TableState,
}

impl HistoryBrowserState {
    pub fn new(entries: Vec<HistoryEntry>) -> Self {
        let first = (!entries.is_empty()).then_some(0);
        Self {
            entries,
            pending_delete: None,
            table: TableState::default().with_selected(first),
        }
    }

    pub fn selected(&self) -> usize {
        self.table.selected().unwrap_or(0)
    }

    pub fn selected_entry(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.selected())
    }

    fn step(&mut self, delta: isize) {
        let Some(last) = self.entries.len().checked_sub(1) else {
            return;
        };
        let next = self.selected().saturating_add_signed(delta).min(last);
        self.table.select(Some(next));
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<HistoryEvent> {
        let armed = self.pending_delete.take();

        match event {
            TuiEvent::Escape => Some(HistoryEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.step(-1);
                None
            }
            TuiEvent::CursorDown => {
                self.step(1);
                None
            }
            TuiEvent::CursorHome => {
                self.step(isize::MIN);
                None
            }
            TuiEvent::CursorEnd => {
                self.step(isize::MAX);
                None
            }
            TuiEvent::Submit => self.selected_entry().cloned().map(HistoryEvent::Load),
            TuiEvent::InputChar('d') => {
                let id = self.selected_entry()?.id.clone();
                if armed.as_deref() == Some(id.as_str()) {
                    Some(HistoryEvent::Delete(id))
                } else {
                    self.pending_delete = Some(id);
                    None
                }
            }
            _ => None,
        }
    }

    /// Drop a row once its entry is gone from disk.
    pub fn remove_entry(&mut self, id: &str) {
        self.entries.retain(|e| e.id != id);
        let selected = match self.entries.len() {
            0 => None,
            n => Some(self.selected().min(n - 1)),
        };
        self.table.select(selected);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryEvent {
    Load(HistoryEntry),
    Delete(String),
    Dismiss,
}

/// Transient render wrapper for the history overlay.
pub struct HistoryBrowser<'a> {
    state: &'a mut HistoryBrowserState,
}

impl<'a> HistoryBrowser<'a> {
    pub fn new(state: &'a mut HistoryBrowserState) -> Self {
        Self { state }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [overlay] = Layout::vertical([Constraint::Percentage(80)])
            .flex(Flex::Center)
            .areas(area);
        let [overlay] = Layout::horizontal([Constraint::Percentage(85)])
            .flex(Flex::Center)
            .areas(overlay);
        frame.render_widget(Clear, overlay);

        let armed = self.state.pending_delete.is_some();
        let help = if armed {
            " d again to delete | any key cancels "
        } else {
            " d Delete  Enter Open  Esc Back "
        };
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" History ({}) ", self.state.entries.len()))
            .title_bottom(Line::from(help).centered());
        let inner = outer.inner(overlay);
        frame.render_widget(outer, overlay);

        if self.state.entries.is_empty() {
            let empty = Paragraph::new("No recorded commands.")
                .style(Style::default().fg(Color::DarkGray))
                .centered();
            frame.render_widget(empty, inner);
            return;
        }

        let [table_area, preview_area] =
            Layout::vertical([Constraint::Min(2), Constraint::Length(PREVIEW_HEIGHT)]).areas(inner);

        let rows = self.state.entries.iter().map(|entry| {
            Row::new(vec![
                Cell::from(format_timestamp(entry.created_at)),
                Cell::from(entry.tool.label()),
                Cell::from(entry.version.label()),
                Cell::from(entry.command.as_str()),
            ])
            .style(Style::default().fg(Color::Gray))
        });
        let highlight = Style::default()
            .fg(if armed { Color::Red } else { Color::White })
            .add_modifier(Modifier::BOLD | Modifier::REVERSED);
        let table = Table::new(
            rows,
            [
                Constraint::Length(11),
                Constraint::Length(9),
                Constraint::Length(8),
                Constraint::Fill(1),
            ],
        )
        .header(
            Row::new(["When", "Tool", "Tier", "Command"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        )
        .row_highlight_style(highlight)
        .highlight_symbol("▶ ");
        frame.render_stateful_widget(table, table_area, &mut self.state.table);

        if let Some(entry) = self.state.selected_entry() {
            render_preview(frame, preview_area, entry);
        }
    }
}

/// The entry's segments in their own styles, then the full command.
fn render_preview(frame: &mut Frame, area: Rect, entry: &HistoryEntry) {
    let styled: Vec<Span> = entry
        .segments
        .iter()
        .map(|s| Span::styled(s.text.as_str(), segment_style(s)))
        .collect();
    let command = Line::styled(entry.command.as_str(), Style::default().fg(Color::DarkGray));
    let preview = Paragraph::new(vec![Line::from(styled), command])
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" Preview "),
        );
    frame.render_widget(preview, area);
}

fn format_timestamp(ts: i64) -> String {
    use chrono::{DateTime, Local, Utc};
    DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or_default()
        .with_timezone(&Local)
        .format("%m-%d %H:%M")
        .to_string()
}
