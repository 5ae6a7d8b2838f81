//! # Component Serializer
//!
//! Turns an ordered sequence of [`TextSegment`]s into the JSON text component
//! string that gets embedded in a command.
//!
//! ```text
//! segments ──► empty?            ──► ""
//!          ──► one plain segment ──► "Hello"
//!          ──► otherwise         ──► {..} | [{..},{..}] | ["",{..},{..}]
//! ```
//!
//! The version tier decides how click/hover events look on the wire:
//!
//! - `1.21.5+`: `click_event` / `hover_event`, payload reshaped per action
//! - older tiers: `clickEvent` / `hoverEvent`, payload passed through as-is
//!
//! Serialization never fails. Malformed events degrade to a best-effort shape
//! instead of aborting, so a preview always shows something.

use serde_json::{Map, Value};

use crate::core::text::{ClickAction, ClickEvent, HoverAction, HoverEvent, StyleFlag, TextSegment};
use crate::core::version::VersionTier;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    pub version: VersionTier,
    /// Emit `["", ...]`, the base-plus-extras layout book pages use.
    pub array_format: bool,
}

impl SerializeOptions {
    pub fn new(version: VersionTier) -> Self {
        Self {
            version,
            array_format: false,
        }
    }

    pub fn with_array_format(mut self, array_format: bool) -> Self {
        self.array_format = array_format;
        self
    }
}

/// Serializes `segments` into a JSON text component string.
pub fn serialize(segments: &[TextSegment], options: &SerializeOptions) -> String {
    if segments.is_empty() {
        return Value::String(String::new()).to_string();
    }

    if let [only] = segments
        && only.is_plain()
    {
        return Value::String(only.text.clone()).to_string();
    }

    let mut objects: Vec<Value> = segments
        .iter()
        .map(|segment| Value::Object(component_object(segment, options.version)))
        .collect();

    if options.array_format {
        objects.insert(0, Value::String(String::new()));
        return Value::Array(objects).to_string();
    }

    if objects.len() == 1 {
        return objects.remove(0).to_string();
    }
    Value::Array(objects).to_string()
}

/// Builds the object form of one segment.
fn component_object(segment: &TextSegment, version: VersionTier) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("text".into(), Value::String(segment.text.clone()));

    if let Some(color) = &segment.color {
        obj.insert("color".into(), Value::String(color.to_string()));
    }

    for flag in StyleFlag::ALL {
        if segment.is_set(flag) {
            obj.insert(flag.key().into(), Value::Bool(true));
        }
    }

    let new_format = version.uses_new_event_format();

    if let Some(click) = &segment.click_event {
        if new_format {
            obj.insert("click_event".into(), reshape_click_event(click));
        } else {
            obj.insert("clickEvent".into(), legacy_click_event(click));
        }
    }

    if let Some(hover) = &segment.hover_event {
        if new_format {
            obj.insert("hover_event".into(), reshape_hover_event(hover));
        } else {
            obj.insert("hoverEvent".into(), legacy_hover_event(hover));
        }
    }

    obj
}

fn legacy_click_event(click: &ClickEvent) -> Value {
    let mut obj = Map::new();
    obj.insert("action".into(), click.action.as_str().into());
    obj.insert("value".into(), click.value.clone().into());
    Value::Object(obj)
}

fn legacy_hover_event(hover: &HoverEvent) -> Value {
    let mut obj = Map::new();
    obj.insert("action".into(), hover.action.as_str().into());
    obj.insert("contents".into(), hover.contents.clone());
    Value::Object(obj)
}

/// Reshapes a click event into the 1.21.5+ payload: `action` plus one
/// action-specific field.
pub fn reshape_click_event(click: &ClickEvent) -> Value {
    let mut obj = Map::new();
    obj.insert("action".into(), click.action.as_str().into());

    let value = click.value.as_str();
    let (key, mapped): (&str, Value) = match click.action {
        ClickAction::OpenUrl => ("url", value.into()),
        ClickAction::RunCommand => ("command", value.strip_prefix('/').unwrap_or(value).into()),
        ClickAction::SuggestCommand => ("command", value.into()),
        ClickAction::CopyToClipboard => ("contents", value.into()),
        ClickAction::ChangePage => ("page", parse_int_prefix(value).unwrap_or(1).into()),
        ClickAction::Other(_) => ("value", value.into()),
    };
    obj.insert(key.into(), mapped);

    Value::Object(obj)
}

/// Reshapes a hover event into the 1.21.5+ payload.
pub fn reshape_hover_event(hover: &HoverEvent) -> Value {
    let mut obj = Map::new();
    obj.insert("action".into(), hover.action.as_str().into());

    match (&hover.action, &hover.contents) {
        (HoverAction::ShowText, contents) => {
            obj.insert("value".into(), contents.clone());
        }
        (HoverAction::ShowItem, Value::Object(item)) => {
            for (key, value) in item {
                obj.insert(key.clone(), value.clone());
            }
        }
        (HoverAction::ShowItem, Value::Null) => {}
        (HoverAction::ShowItem, id) => {
            obj.insert("id".into(), id.clone());
        }
        (HoverAction::ShowEntity, Value::Object(entity)) => {
            // `type` is the new `id`; the old `id` becomes `uuid`
            if let Some(id) = present(entity, "type").or_else(|| present(entity, "id")) {
                obj.insert("id".into(), id.clone());
            }
            if let Some(uuid) = present(entity, "id").or_else(|| present(entity, "uuid")) {
                obj.insert("uuid".into(), uuid.clone());
            }
            if let Some(name) = present(entity, "name") {
                obj.insert("name".into(), name.clone());
            }
        }
        (HoverAction::ShowEntity, _) => {}
        (HoverAction::Other(_), contents) => {
            obj.insert("contents".into(), contents.clone());
        }
    }

    Value::Object(obj)
}

/// Looks up `key`, treating an explicit `null` as absent.
fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// Parses the leading integer of `s` the way a lenient page field does:
/// leading whitespace, an optional sign, then at least one digit. Trailing
/// garbage is ignored (`"3rd"` is 3).
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
