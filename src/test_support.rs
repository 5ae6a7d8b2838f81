//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::selector::Target;
use crate::core::state::App;
use crate::core::text::{NamedColor, StyleFlag, TextColor, TextSegment};
use crate::core::version::VersionTier;

/// Creates a test App on the newest tier targeting `@a`.
pub fn test_app() -> App {
    App::new(VersionTier::V1_21_5, Target::default())
}

/// A segment with a named color and the given style flags set.
pub fn styled(text: &str, color: NamedColor, flags: &[StyleFlag]) -> TextSegment {
    let mut segment = TextSegment::plain(text);
    segment.color = Some(TextColor::Named(color));
    for &flag in flags {
        segment.set_flag(flag, true);
    }
    segment
}

/// Flattens a ratatui buffer into a string for `contains` assertions.
pub fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}
