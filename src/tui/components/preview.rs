//! # Preview Component
//!
//! Bottom pane: the generated command, wrapped so long JSON stays readable.
//! Regenerated from `App` on every frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use crate::tui::component::Component;

pub struct Preview<'a> {
    pub command: &'a str,
    pub array_format: bool,
}

impl<'a> Preview<'a> {
    pub fn new(command: &'a str, array_format: bool) -> Self {
        Self {
            command,
            array_format,
        }
    }

    /// Rows needed to show the whole command at `width`, borders included.
    pub fn height(&self, width: u16) -> u16 {
        let inner = width.saturating_sub(2).max(1) as usize;
        let chars = self.command.chars().count().max(1);
        (chars.div_ceil(inner) as u16).saturating_add(2)
    }
}

impl Component for Preview<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = if self.array_format {
            " Command [array] "
        } else {
            " Command "
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            self.command,
            Style::default().fg(Color::Yellow),
        )))
        .block(
            Block::bordered()
                .title(title)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_height_accounts_for_wrapping() {
        assert_eq!(Preview::new("", false).height(20), 3);
        assert_eq!(Preview::new(&"x".repeat(18), false).height(20), 3);
        assert_eq!(Preview::new(&"x".repeat(19), false).height(20), 4);
    }

    #[test]
    fn test_render_shows_command() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                Preview::new("/tellraw @a \"Hi\"", true).render(f, f.area());
            })
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Command [array]"));
        assert!(text.contains("/tellraw @a \"Hi\""));
    }
}
