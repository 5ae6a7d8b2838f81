//! # TitleBar Component
//!
//! Top status bar showing the active tool, version tier, target and the
//! latest status message.
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ```text
//! mccmd | tellraw → @a | 1.21.5+ | color: gold
//! ```
//!
//! The status message is dropped when empty so the separator doesn't dangle.

use crate::Tool;
use crate::core::selector::Target;
use crate::core::version::VersionTier;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
pub struct TitleBar {
    pub tool: Tool,
    pub version: VersionTier,
    /// Only shown for tools that address players
    pub target: Option<Target>,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(
        tool: Tool,
        version: VersionTier,
        target: Option<Target>,
        status_message: String,
    ) -> Self {
        Self {
            tool,
            version,
            target,
            status_message,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("mccmd | {}", self.tool.label());
        if let Some(target) = &self.target {
            text.push_str(&format!(" → {target}"));
        }
        text.push_str(&format!(" | {}", self.version));
        if !self.status_message.is_empty() {
            text.push_str(&format!(" | {}", self.status_message));
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
