//! # Text Component Model
//!
//! The in-memory shape of one styled run of text (a "segment") and its
//! optional click/hover interactions.
//!
//! ```text
//! TextSegment
//! ├── text: String
//! ├── color: Option<TextColor>        // named, #RRGGBB, or passed through
//! ├── bold / italic / underlined / strikethrough / obfuscated: Option<bool>
//! ├── click_event: Option<ClickEvent> // { action, value }
//! └── hover_event: Option<HoverEvent> // { action, contents }
//! ```
//!
//! Style flags are presence-as-true: `None` and `Some(false)` both mean
//! "not set" and never reach the wire. There is no way to express an explicit
//! `false` that overrides an inherited `true`.
//!
//! Records deserialize from the camelCase shape the editor produces, so a
//! segments file written by hand looks like `{"text":"Hi","clickEvent":{...}}`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Segment
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TextSegment {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<TextColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underlined: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obfuscated: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_event: Option<ClickEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_event: Option<HoverEvent>,
}

/// Returns the empty segment the editor starts from: no text, every style
/// flag explicitly off, no color and no events.
pub fn create_default() -> TextSegment {
    TextSegment {
        text: String::new(),
        color: None,
        bold: Some(false),
        italic: Some(false),
        underlined: Some(false),
        strikethrough: Some(false),
        obfuscated: Some(false),
        click_event: None,
        hover_event: None,
    }
}

/// Drops empty-text runs. Everything that serializes user input goes
/// through this first.
pub fn drop_empty(segments: impl IntoIterator<Item = TextSegment>) -> Vec<TextSegment> {
    segments
        .into_iter()
        .filter(|s| !s.text.is_empty())
        .collect()
}

/// The five boolean formatting flags, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFlag {
    Bold,
    Italic,
    Underlined,
    Strikethrough,
    Obfuscated,
}

impl StyleFlag {
    pub const ALL: [StyleFlag; 5] = [
        StyleFlag::Bold,
        StyleFlag::Italic,
        StyleFlag::Underlined,
        StyleFlag::Strikethrough,
        StyleFlag::Obfuscated,
    ];

    /// JSON key for this flag.
    pub fn key(self) -> &'static str {
        match self {
            StyleFlag::Bold => "bold",
            StyleFlag::Italic => "italic",
            StyleFlag::Underlined => "underlined",
            StyleFlag::Strikethrough => "strikethrough",
            StyleFlag::Obfuscated => "obfuscated",
        }
    }
}

impl TextSegment {
    /// A plain segment with only text set.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    fn flag_slot(&self, flag: StyleFlag) -> &Option<bool> {
        match flag {
            StyleFlag::Bold => &self.bold,
            StyleFlag::Italic => &self.italic,
            StyleFlag::Underlined => &self.underlined,
            StyleFlag::Strikethrough => &self.strikethrough,
            StyleFlag::Obfuscated => &self.obfuscated,
        }
    }

    fn flag_slot_mut(&mut self, flag: StyleFlag) -> &mut Option<bool> {
        match flag {
            StyleFlag::Bold => &mut self.bold,
            StyleFlag::Italic => &mut self.italic,
            StyleFlag::Underlined => &mut self.underlined,
            StyleFlag::Strikethrough => &mut self.strikethrough,
            StyleFlag::Obfuscated => &mut self.obfuscated,
        }
    }

    /// True only when the flag is present and `true`.
    pub fn is_set(&self, flag: StyleFlag) -> bool {
        self.flag_slot(flag).unwrap_or(false)
    }

    pub fn set_flag(&mut self, flag: StyleFlag, on: bool) {
        *self.flag_slot_mut(flag) = Some(on);
    }

    pub fn toggle(&mut self, flag: StyleFlag) {
        let on = self.is_set(flag);
        self.set_flag(flag, !on);
    }

    /// Any formatting flag or interaction event present.
    pub fn has_styles(&self) -> bool {
        StyleFlag::ALL.iter().any(|&flag| self.is_set(flag))
            || self.click_event.is_some()
            || self.hover_event.is_some()
    }

    /// True when the segment can be written as a bare JSON string.
    pub fn is_plain(&self) -> bool {
        self.color.is_none() && !self.has_styles()
    }
}

// ============================================================================
// Colors
// ============================================================================

/// The sixteen legacy chat colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    pub const ALL: [NamedColor; 16] = [
        NamedColor::Black,
        NamedColor::DarkBlue,
        NamedColor::DarkGreen,
        NamedColor::DarkAqua,
        NamedColor::DarkRed,
        NamedColor::DarkPurple,
        NamedColor::Gold,
        NamedColor::Gray,
        NamedColor::DarkGray,
        NamedColor::Blue,
        NamedColor::Green,
        NamedColor::Aqua,
        NamedColor::Red,
        NamedColor::LightPurple,
        NamedColor::Yellow,
        NamedColor::White,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::DarkBlue => "dark_blue",
            NamedColor::DarkGreen => "dark_green",
            NamedColor::DarkAqua => "dark_aqua",
            NamedColor::DarkRed => "dark_red",
            NamedColor::DarkPurple => "dark_purple",
            NamedColor::Gold => "gold",
            NamedColor::Gray => "gray",
            NamedColor::DarkGray => "dark_gray",
            NamedColor::Blue => "blue",
            NamedColor::Green => "green",
            NamedColor::Aqua => "aqua",
            NamedColor::Red => "red",
            NamedColor::LightPurple => "light_purple",
            NamedColor::Yellow => "yellow",
            NamedColor::White => "white",
        }
    }

    /// Legacy formatting code (`§0` .. `§f`).
    pub fn code(self) -> char {
        let index = Self::ALL.iter().position(|&c| c == self).unwrap_or(15);
        char::from_digit(index as u32, 16).unwrap_or('f')
    }

    pub fn from_code(code: char) -> Option<NamedColor> {
        let index = code.to_ascii_lowercase().to_digit(16)?;
        Self::ALL.get(index as usize).copied()
    }

    pub fn from_name(name: &str) -> Option<NamedColor> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Foreground RGB as rendered by the vanilla client.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            NamedColor::Black => (0x00, 0x00, 0x00),
            NamedColor::DarkBlue => (0x00, 0x00, 0xAA),
            NamedColor::DarkGreen => (0x00, 0xAA, 0x00),
            NamedColor::DarkAqua => (0x00, 0xAA, 0xAA),
            NamedColor::DarkRed => (0xAA, 0x00, 0x00),
            NamedColor::DarkPurple => (0xAA, 0x00, 0xAA),
            NamedColor::Gold => (0xFF, 0xAA, 0x00),
            NamedColor::Gray => (0xAA, 0xAA, 0xAA),
            NamedColor::DarkGray => (0x55, 0x55, 0x55),
            NamedColor::Blue => (0x55, 0x55, 0xFF),
            NamedColor::Green => (0x55, 0xFF, 0x55),
            NamedColor::Aqua => (0x55, 0xFF, 0xFF),
            NamedColor::Red => (0xFF, 0x55, 0x55),
            NamedColor::LightPurple => (0xFF, 0x55, 0xFF),
            NamedColor::Yellow => (0xFF, 0xFF, 0x55),
            NamedColor::White => (0xFF, 0xFF, 0xFF),
        }
    }

    /// Next color in palette order, wrapping to `None` after white.
    pub fn cycle(current: Option<NamedColor>) -> Option<NamedColor> {
        match current {
            None => Some(NamedColor::Black),
            Some(NamedColor::White) => None,
            Some(color) => {
                let index = Self::ALL.iter().position(|&c| c == color).unwrap_or(0);
                Self::ALL.get(index + 1).copied()
            }
        }
    }
}

/// A `color` field value. Hex literals and unknown names are kept exactly
/// as written so the output matches the input.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum TextColor {
    Named(NamedColor),
    /// `#RRGGBB`
    Hex(String),
    Other(String),
}

impl TextColor {
    pub fn named(&self) -> Option<NamedColor> {
        match self {
            TextColor::Named(c) => Some(*c),
            TextColor::Hex(_) | TextColor::Other(_) => None,
        }
    }

    /// `None` for names the client wouldn't recognize either.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        match self {
            TextColor::Named(c) => Some(c.rgb()),
            TextColor::Hex(s) => {
                let v = parse_hex(s)?;
                Some(((v >> 16) as u8, (v >> 8) as u8, v as u8))
            }
            TextColor::Other(_) => None,
        }
    }
}

fn parse_hex(s: &str) -> Option<u32> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color '{}'", self.0)
    }
}

impl std::error::Error for ColorParseError {}

/// Strict parse: only the palette names and `#RRGGBB`.
impl FromStr for TextColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if parse_hex(s).is_some() {
            return Ok(TextColor::Hex(s.to_string()));
        }
        NamedColor::from_name(s)
            .map(TextColor::Named)
            .ok_or_else(|| ColorParseError(s.to_string()))
    }
}

impl From<String> for TextColor {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(color) => color,
            Err(ColorParseError(raw)) => TextColor::Other(raw),
        }
    }
}

impl From<TextColor> for String {
    fn from(color: TextColor) -> Self {
        match color {
            TextColor::Named(c) => c.name().to_string(),
            TextColor::Hex(s) | TextColor::Other(s) => s,
        }
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextColor::Named(c) => f.write_str(c.name()),
            TextColor::Hex(s) | TextColor::Other(s) => f.write_str(s),
        }
    }
}

impl From<NamedColor> for TextColor {
    fn from(color: NamedColor) -> Self {
        TextColor::Named(color)
    }
}

// ============================================================================
// Events
// ============================================================================

/// What a click does. Unrecognized actions are kept verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ClickAction {
    OpenUrl,
    RunCommand,
    SuggestCommand,
    CopyToClipboard,
    ChangePage,
    Other(String),
}

impl ClickAction {
    /// Known actions in editor cycle order.
    pub const KNOWN: [ClickAction; 5] = [
        ClickAction::OpenUrl,
        ClickAction::RunCommand,
        ClickAction::SuggestCommand,
        ClickAction::CopyToClipboard,
        ClickAction::ChangePage,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ClickAction::OpenUrl => "open_url",
            ClickAction::RunCommand => "run_command",
            ClickAction::SuggestCommand => "suggest_command",
            ClickAction::CopyToClipboard => "copy_to_clipboard",
            ClickAction::ChangePage => "change_page",
            ClickAction::Other(s) => s,
        }
    }
}

impl From<String> for ClickAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "open_url" => ClickAction::OpenUrl,
            "run_command" => ClickAction::RunCommand,
            "suggest_command" => ClickAction::SuggestCommand,
            "copy_to_clipboard" => ClickAction::CopyToClipboard,
            "change_page" => ClickAction::ChangePage,
            _ => ClickAction::Other(s),
        }
    }
}

impl From<ClickAction> for String {
    fn from(action: ClickAction) -> Self {
        action.as_str().to_string()
    }
}

impl Default for ClickAction {
    fn default() -> Self {
        ClickAction::Other(String::new())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ClickEvent {
    pub action: ClickAction,
    pub value: String,
}

impl ClickEvent {
    pub fn new(action: ClickAction, value: impl Into<String>) -> Self {
        Self {
            action,
            value: value.into(),
        }
    }
}

/// What hovering shows. Unrecognized actions are kept verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum HoverAction {
    ShowText,
    ShowItem,
    ShowEntity,
    Other(String),
}

impl HoverAction {
    pub const KNOWN: [HoverAction; 3] = [
        HoverAction::ShowText,
        HoverAction::ShowItem,
        HoverAction::ShowEntity,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            HoverAction::ShowText => "show_text",
            HoverAction::ShowItem => "show_item",
            HoverAction::ShowEntity => "show_entity",
            HoverAction::Other(s) => s,
        }
    }
}

impl From<String> for HoverAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "show_text" => HoverAction::ShowText,
            "show_item" => HoverAction::ShowItem,
            "show_entity" => HoverAction::ShowEntity,
            _ => HoverAction::Other(s),
        }
    }
}

impl From<HoverAction> for String {
    fn from(action: HoverAction) -> Self {
        action.as_str().to_string()
    }
}

impl Default for HoverAction {
    fn default() -> Self {
        HoverAction::Other(String::new())
    }
}

/// `contents` is a string or an arbitrary object depending on the action.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct HoverEvent {
    pub action: HoverAction,
    pub contents: Value,
}

impl HoverEvent {
    pub fn new(action: HoverAction, contents: Value) -> Self {
        Self { action, contents }
    }

    /// A `show_text` hover with `{"text": ...}` contents.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(
            HoverAction::ShowText,
            serde_json::json!({ "text": text.into() }),
        )
    }
}
