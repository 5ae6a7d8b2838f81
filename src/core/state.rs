//! # Application State
//!
//! The editor session: the segments being composed and the options that turn
//! them into a command. No TUI-specific types live here; presentation state
//! belongs to the `tui` module.
//!
//! ```text
//! App
//! ├── segments: Vec<TextSegment>  // ordered runs, never empty
//! ├── selected: usize             // segment under edit
//! ├── tool: Tool                  // tellraw, title, sign, ...
//! ├── version: VersionTier        // serialization policy
//! ├── target: Target              // @a, player name, ...
//! ├── array_format: bool          // ["", ...] output for chat tools
//! └── status_message: String      // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::Tool;
use crate::core::command;
use crate::core::config::ResolvedConfig;
use crate::core::history::HistoryEntry;
use crate::core::selector::Target;
use crate::core::serializer::{SerializeOptions, serialize};
use crate::core::text::{TextSegment, create_default, drop_empty};
use crate::core::version::VersionTier;

/// Click and hover events are edited on this segment.
pub const EVENT_SEGMENT: usize = 0;

pub struct App {
    pub segments: Vec<TextSegment>,
    pub selected: usize,
    pub tool: Tool,
    pub version: VersionTier,
    pub target: Target,
    pub array_format: bool,
    pub status_message: String,
}

impl App {
    pub fn new(version: VersionTier, target: Target) -> Self {
        Self {
            segments: vec![create_default()],
            selected: 0,
            tool: Tool::default(),
            version,
            target,
            array_format: false,
            status_message: String::from("Ready"),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.version, config.target.clone())
    }

    pub fn selected_segment(&self) -> Option<&TextSegment> {
        self.segments.get(self.selected)
    }

    pub fn event_segment(&self) -> Option<&TextSegment> {
        self.segments.get(EVENT_SEGMENT)
    }

    /// The segments that reach the serializer: empty runs are dropped.
    pub fn collect_segments(&self) -> Vec<TextSegment> {
        drop_empty(self.segments.iter().cloned())
    }

    pub fn serialize_options(&self) -> SerializeOptions {
        SerializeOptions::new(self.version).with_array_format(self.array_format)
    }

    /// The bare text component for the current segments.
    pub fn component(&self) -> String {
        serialize(&self.collect_segments(), &self.serialize_options())
    }

    /// The full command for the current tool.
    pub fn command(&self) -> String {
        command::build(
            self.tool,
            &self.target,
            &self.collect_segments(),
            &self.serialize_options(),
        )
    }

    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry::new(self.tool, self.version, self.command(), self.collect_segments())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::text::TextSegment;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Ready");
        assert_eq!(app.segments.len(), 1);
        assert_eq!(app.selected, 0);
        assert!(!app.array_format);
    }

    #[test]
    fn test_empty_segments_are_not_serialized() {
        let mut app = test_app();
        app.segments = vec![
            TextSegment::plain(""),
            TextSegment::plain("Hi"),
            TextSegment::plain(""),
        ];
        assert_eq!(app.collect_segments(), vec![TextSegment::plain("Hi")]);
        assert_eq!(app.component(), r#""Hi""#);
        assert_eq!(app.command(), r#"/tellraw @a "Hi""#);
    }

    #[test]
    fn test_fresh_app_serializes_to_empty_component() {
        let app = test_app();
        assert_eq!(app.component(), r#""""#);
    }
}
