//! # SegmentList Component
//!
//! Left pane: one row per segment, drawn in the segment's own color and
//! styles so the list doubles as a live preview of the chat line.
//!
//! Empty segments show a dim placeholder; they are skipped when serializing.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, List, ListItem, ListState};

use crate::core::text::{StyleFlag, TextColor, TextSegment};
use crate::tui::component::Component;

/// Terminal style approximating how the segment renders in game.
pub fn segment_style(segment: &TextSegment) -> Style {
    let mut style = Style::default();
    if let Some((r, g, b)) = segment.color.as_ref().and_then(TextColor::rgb) {
        style = style.fg(Color::Rgb(r, g, b));
    }
    for flag in StyleFlag::ALL {
        if segment.is_set(flag) {
            style = style.add_modifier(match flag {
                StyleFlag::Bold => Modifier::BOLD,
                StyleFlag::Italic => Modifier::ITALIC,
                StyleFlag::Underlined => Modifier::UNDERLINED,
                StyleFlag::Strikethrough => Modifier::CROSSED_OUT,
                StyleFlag::Obfuscated => Modifier::RAPID_BLINK,
            });
        }
    }
    style
}

pub struct SegmentList<'a> {
    pub segments: &'a [TextSegment],
    pub selected: usize,
    /// Dimmed while a field is being edited
    pub dimmed: bool,
}

impl<'a> SegmentList<'a> {
    pub fn new(segments: &'a [TextSegment], selected: usize, dimmed: bool) -> Self {
        Self {
            segments,
            selected,
            dimmed,
        }
    }
}

impl Component for SegmentList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .segments
            .iter()
            .enumerate()
            .map(|(i, segment)| {
                let marker = if i == self.selected { "▶ " } else { "  " };
                let number = Span::styled(
                    format!("{marker}{:>2} ", i + 1),
                    Style::default().fg(Color::DarkGray),
                );
                let body = if segment.text.is_empty() {
                    Span::styled(
                        "(empty)",
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC),
                    )
                } else {
                    Span::styled(segment.text.as_str(), segment_style(segment))
                };
                ListItem::new(Line::from(vec![number, body]))
            })
            .collect();

        let border_style = if self.dimmed {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let list = List::new(items)
            .block(
                Block::bordered()
                    .title(format!(" Segments ({}) ", self.segments.len()))
                    .border_style(border_style),
            )
            .highlight_style(Style::default().bg(Color::Rgb(40, 40, 40)));

        let mut list_state = ListState::default();
        if !self.segments.is_empty() {
            list_state.select(Some(self.selected.min(self.segments.len() - 1)));
        }
        frame.render_stateful_widget(list, area, &mut list_state);
    }
}
