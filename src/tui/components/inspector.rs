//! # Inspector Component
//!
//! Right pane: every field of the selected segment, plus the click and
//! hover events (which always live on the first segment).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use serde_json::Value;

use crate::core::text::{ClickEvent, HoverEvent, StyleFlag, TextSegment};
use crate::tui::component::Component;

pub struct Inspector<'a> {
    pub segment: Option<&'a TextSegment>,
    pub event_segment: Option<&'a TextSegment>,
    pub index: usize,
    pub total: usize,
}

impl<'a> Inspector<'a> {
    pub fn new(
        segment: Option<&'a TextSegment>,
        event_segment: Option<&'a TextSegment>,
        index: usize,
        total: usize,
    ) -> Self {
        Self {
            segment,
            event_segment,
            index,
            total,
        }
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().fg(Color::White);
        let mut lines = Vec::new();

        if let Some(segment) = self.segment {
            lines.push(Line::from(vec![
                Span::styled("Text   ", label),
                Span::styled(format!("{:?}", segment.text), value),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Color  ", label),
                Span::styled(
                    segment
                        .color
                        .as_ref()
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| String::from("none")),
                    value,
                ),
            ]));

            let mut styles = vec![Span::styled("Styles ", label)];
            for flag in StyleFlag::ALL {
                let (key, name) = flag_hint(flag);
                let style = if segment.is_set(flag) {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                styles.push(Span::styled(format!("[{key}]{name} "), style));
            }
            lines.push(Line::from(styles));
        }

        lines.push(Line::default());
        let click = self.event_segment.and_then(|s| s.click_event.as_ref());
        let hover = self.event_segment.and_then(|s| s.hover_event.as_ref());
        lines.push(Line::from(vec![
            Span::styled("Click  ", label),
            Span::styled(describe_click(click), value),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Hover  ", label),
            Span::styled(describe_hover(hover), value),
        ]));
        lines
    }
}

fn flag_hint(flag: StyleFlag) -> (char, &'static str) {
    match flag {
        StyleFlag::Bold => ('b', "bold"),
        StyleFlag::Italic => ('i', "italic"),
        StyleFlag::Underlined => ('u', "underlined"),
        StyleFlag::Strikethrough => ('s', "strike"),
        StyleFlag::Obfuscated => ('o', "obfuscated"),
    }
}

fn describe_click(click: Option<&ClickEvent>) -> String {
    match click {
        None => String::from("none"),
        Some(c) => format!("{} {:?}", c.action.as_str(), c.value),
    }
}

fn describe_hover(hover: Option<&HoverEvent>) -> String {
    match hover {
        None => String::from("none"),
        Some(h) => {
            let contents = match &h.contents {
                Value::Object(map) if map.len() == 1 => map
                    .values()
                    .next()
                    .map(|v| match v {
                        Value::String(s) => format!("{s:?}"),
                        other => other.to_string(),
                    })
                    .unwrap_or_default(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            format!("{} {}", h.action.as_str(), contents)
        }
    }
}

impl Component for Inspector<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = format!(" Segment {}/{} ", self.index + 1, self.total.max(1));
        let paragraph = Paragraph::new(self.lines())
            .block(Block::bordered().title(title))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::text::{ClickAction, HoverAction, NamedColor};
    use crate::test_support::{buffer_text, styled};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use serde_json::json;

    #[test]
    fn test_describe_events() {
        assert_eq!(describe_click(None), "none");
        assert_eq!(
            describe_click(Some(&ClickEvent::new(ClickAction::RunCommand, "/spawn"))),
            "run_command \"/spawn\""
        );
        assert_eq!(
            describe_hover(Some(&HoverEvent::text("tip"))),
            "show_text \"tip\""
        );
        let entity = HoverEvent::new(
            HoverAction::ShowEntity,
            json!({"type": "minecraft:cow", "name": "Daisy"}),
        );
        assert!(describe_hover(Some(&entity)).contains("minecraft:cow"));
    }

    #[test]
    fn test_render_shows_fields() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let segment = styled("Hi", NamedColor::Gold, &[StyleFlag::Bold]);

        terminal
            .draw(|f| {
                Inspector::new(Some(&segment), Some(&segment), 0, 1).render(f, f.area());
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Segment 1/1"));
        assert!(text.contains("\"Hi\""));
        assert!(text.contains("gold"));
        assert!(text.contains("[b]bold"));
        assert!(text.contains("Click  none"));
    }
}
