//! mccmd library exports

use serde::{Deserialize, Serialize};

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::serializer::{SerializeOptions, reshape_click_event, reshape_hover_event, serialize};
pub use crate::core::text::{TextSegment, create_default};
pub use crate::core::version::{VersionTier, version_to_tier};

/// The command a text component gets embedded into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Tellraw,
    Title,
    Subtitle,
    Actionbar,
    Sign,
    Book,
}

impl Tool {
    const ORDER: [Tool; 6] = [
        Tool::Tellraw,
        Tool::Title,
        Tool::Subtitle,
        Tool::Actionbar,
        Tool::Sign,
        Tool::Book,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Tool::Tellraw => "tellraw",
            Tool::Title => "title",
            Tool::Subtitle => "subtitle",
            Tool::Actionbar => "actionbar",
            Tool::Sign => "sign",
            Tool::Book => "book",
        }
    }

    pub fn next(self) -> Self {
        let index = Self::ORDER.iter().position(|&t| t == self).unwrap_or(0);
        Self::ORDER[(index + 1) % Self::ORDER.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_cycle_wraps() {
        let mut tool = Tool::default();
        let mut seen = vec![tool];
        for _ in 0..5 {
            tool = tool.next();
            seen.push(tool);
        }
        assert_eq!(seen.last(), Some(&Tool::Book));
        assert_eq!(tool.next(), Tool::Tellraw);
    }

    #[test]
    fn test_tool_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&Tool::Actionbar).unwrap(), r#""actionbar""#);
        assert_eq!(serde_json::from_str::<Tool>(r#""sign""#).unwrap(), Tool::Sign);
    }
}
