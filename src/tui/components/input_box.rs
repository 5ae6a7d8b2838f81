//! # InputBox Component
//!
//! Single-line editor for one field: segment text, click value, hover
//! value or the command target. Opened from Cursor mode, closed by Enter
//! (commit) or Esc (discard).
//!
//! ## State Management
//!
//! The buffer and cursor are internal state. Which field is being edited is
//! a prop fixed at construction; the parent turns the submitted text into
//! an `Action` through `EditField::action`.
//!
//! The cursor is a byte offset into the buffer. Its screen column is the
//! display width of the text before it, so wide glyphs stay aligned.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::core::action::Action;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// The field an InputBox writes back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Text,
    ClickValue,
    HoverValue,
    Target,
}

impl EditField {
    pub fn label(self) -> &'static str {
        match self {
            EditField::Text => "Text",
            EditField::ClickValue => "Click value",
            EditField::HoverValue => "Hover value (text, id, or JSON object)",
            EditField::Target => "Target (@a, @p[limit=1], player name)",
        }
    }

    pub fn action(self, value: String) -> Action {
        match self {
            EditField::Text => Action::SetText(value),
            EditField::ClickValue => Action::SetClickValue(value),
            EditField::HoverValue => Action::SetHoverValue(value),
            EditField::Target => Action::SetTarget(value),
        }
    }
}

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed; the edit is committed
    Submit(String),
    /// Esc pressed; the edit is discarded
    Cancel,
    ContentChanged,
}

pub struct InputBox {
    pub field: EditField,
    pub buffer: String,
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pos: usize,
    /// First visible display column
    scroll: u16,
}

impl InputBox {
    /// Opens an editor pre-filled with the field's current value, cursor at the end.
    pub fn new(field: EditField, initial: impl Into<String>) -> Self {
        let buffer = initial.into();
        Self {
            field,
            pos: buffer.len(),
            buffer,
            scroll: 0,
        }
    }

    fn cursor_column(&self) -> u16 {
        self.buffer[..self.pos].width() as u16
    }

    /// Keeps the cursor inside a viewport `visible` columns wide.
    fn update_scroll(&mut self, visible: u16) {
        let column = self.cursor_column();
        if column < self.scroll {
            self.scroll = column;
        } else if visible > 0 && column >= self.scroll + visible {
            self.scroll = column + 1 - visible;
        }
    }
}

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    s[..pos].char_indices().next_back().map(|(i, _)| i).unwrap_or(0)
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    s[pos..]
        .chars()
        .next()
        .map(|c| pos + c.len_utf8())
        .unwrap_or(s.len())
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let visible = area.width.saturating_sub(2);
        self.update_scroll(visible);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", self.field.label()))
            .title_bottom(" Enter save · Esc cancel ");
        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .style(Style::default().fg(Color::Green))
            .scroll((0, self.scroll));
        frame.render_widget(input, area);

        let x = area.x + 1 + (self.cursor_column() - self.scroll).min(visible);
        frame.set_cursor_position((x, area.y + 1));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.pos, *c);
                self.pos += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line: pasted newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.pos, &text);
                self.pos += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.pos);
                    self.buffer.drain(prev..self.pos);
                    self.pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.pos);
                    self.buffer.drain(self.pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => (self.pos > 0).then(|| {
                self.pos = prev_char_boundary(&self.buffer, self.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.pos < self.buffer.len()).then(|| {
                self.pos = next_char_boundary(&self.buffer, self.pos);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => (self.pos != 0).then(|| {
                self.pos = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.pos != self.buffer.len()).then(|| {
                self.pos = self.buffer.len();
                InputEvent::ContentChanged
            }),
            TuiEvent::Submit => Some(InputEvent::Submit(std::mem::take(&mut self.buffer))),
            TuiEvent::Escape => Some(InputEvent::Cancel),
            _ => None,
        }
    }
}
