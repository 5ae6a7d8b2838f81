//! # Actions
//!
//! Everything that can happen in the editor becomes an `Action`.
//! User presses `b`? That's `Action::ToggleStyle(StyleFlag::Bold)`.
//! User confirms a field edit? That's `Action::SetText(text)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing any I/O the caller should perform.
//! No side effects here. I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;
use serde_json::Value;

use crate::core::history::HistoryEntry;
use crate::core::selector::Target;
use crate::core::state::{App, EVENT_SEGMENT};
use crate::core::text::{
    ClickAction, ClickEvent, HoverAction, HoverEvent, NamedColor, StyleFlag, TextColor, create_default,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    AddSegment,
    RemoveSegment,
    SelectNext,
    SelectPrev,
    SetText(String),
    ToggleStyle(StyleFlag),
    CycleColor,
    CycleClickAction,
    SetClickValue(String),
    CycleHoverAction,
    SetHoverValue(String),
    CycleVersion,
    CycleTool,
    ToggleArrayFormat,
    SetTarget(String),
    Clear,
    RecordHistory,
    LoadHistory(HistoryEntry),
    Quit,
}

/// Work the caller must do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Persist `App::history_entry()`.
    RecordHistory,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::AddSegment => {
            let at = (app.selected + 1).min(app.segments.len());
            app.segments.insert(at, create_default());
            app.selected = at;
            app.status_message = format!("Added segment {}", at + 1);
        }
        Action::RemoveSegment => {
            if app.selected < app.segments.len() {
                app.segments.remove(app.selected);
            }
            if app.segments.is_empty() {
                app.segments.push(create_default());
            }
            app.selected = app.selected.min(app.segments.len() - 1);
            app.status_message = String::from("Removed segment");
        }
        Action::SelectNext => {
            if app.selected + 1 < app.segments.len() {
                app.selected += 1;
            }
        }
        Action::SelectPrev => {
            app.selected = app.selected.saturating_sub(1);
        }
        Action::SetText(text) => {
            if let Some(segment) = app.segments.get_mut(app.selected) {
                segment.text = text;
            }
        }
        Action::ToggleStyle(flag) => {
            if let Some(segment) = app.segments.get_mut(app.selected) {
                segment.toggle(flag);
                let state = if segment.is_set(flag) { "on" } else { "off" };
                app.status_message = format!("{}: {}", flag.key(), state);
            }
        }
        Action::CycleColor => {
            if let Some(segment) = app.segments.get_mut(app.selected) {
                let current = segment.color.as_ref().and_then(TextColor::named);
                segment.color = NamedColor::cycle(current).map(TextColor::Named);
                app.status_message = match &segment.color {
                    Some(color) => format!("color: {color}"),
                    None => String::from("color: none"),
                };
            }
        }
        Action::CycleClickAction => {
            if let Some(segment) = app.segments.get_mut(EVENT_SEGMENT) {
                segment.click_event = next_click(segment.click_event.take());
                app.status_message = match &segment.click_event {
                    Some(click) => format!("click: {}", click.action.as_str()),
                    None => String::from("click: none"),
                };
            }
        }
        Action::SetClickValue(value) => {
            if let Some(click) = app
                .segments
                .get_mut(EVENT_SEGMENT)
                .and_then(|s| s.click_event.as_mut())
            {
                click.value = value;
            } else {
                app.status_message = String::from("Choose a click action first (e)");
            }
        }
        Action::CycleHoverAction => {
            if let Some(segment) = app.segments.get_mut(EVENT_SEGMENT) {
                segment.hover_event = next_hover(segment.hover_event.take());
                app.status_message = match &segment.hover_event {
                    Some(hover) => format!("hover: {}", hover.action.as_str()),
                    None => String::from("hover: none"),
                };
            }
        }
        Action::SetHoverValue(input) => {
            if let Some(hover) = app
                .segments
                .get_mut(EVENT_SEGMENT)
                .and_then(|s| s.hover_event.as_mut())
            {
                hover.contents = hover_contents(&hover.action, &input);
            } else {
                app.status_message = String::from("Choose a hover action first (h)");
            }
        }
        Action::CycleVersion => {
            app.version = app.version.next();
            app.status_message = format!("Version: {}", app.version);
        }
        Action::CycleTool => {
            app.tool = app.tool.next();
            app.status_message = format!("Tool: {}", app.tool.label());
        }
        Action::ToggleArrayFormat => {
            app.array_format = !app.array_format;
            app.status_message = format!(
                "Array format: {}",
                if app.array_format { "on" } else { "off" }
            );
        }
        Action::SetTarget(raw) => match raw.parse::<Target>() {
            Ok(target) => {
                app.status_message = format!("Target: {target}");
                app.target = target;
            }
            Err(e) => app.status_message = format!("Invalid target: {e}"),
        },
        Action::Clear => {
            app.segments = vec![create_default()];
            app.selected = 0;
            app.status_message = String::from("Cleared");
        }
        Action::RecordHistory => {
            if app.collect_segments().is_empty() {
                app.status_message = String::from("Nothing to save");
            } else {
                app.status_message = String::from("Saved to history");
                return Effect::RecordHistory;
            }
        }
        Action::LoadHistory(entry) => {
            app.segments = if entry.segments.is_empty() {
                vec![create_default()]
            } else {
                entry.segments
            };
            app.selected = 0;
            app.tool = entry.tool;
            app.version = entry.version;
            app.status_message = String::from("Loaded from history");
        }
        Action::Quit => return Effect::Quit,
    }
    Effect::None
}

/// none → open_url → … → change_page → none, keeping the typed value.
fn next_click(current: Option<ClickEvent>) -> Option<ClickEvent> {
    let (index, value) = match current {
        None => return Some(ClickEvent::new(ClickAction::KNOWN[0].clone(), "")),
        Some(click) => (
            ClickAction::KNOWN.iter().position(|a| *a == click.action),
            click.value,
        ),
    };
    match index {
        Some(i) if i + 1 < ClickAction::KNOWN.len() => {
            Some(ClickEvent::new(ClickAction::KNOWN[i + 1].clone(), value))
        }
        Some(_) => None,
        // Unrecognized action loaded from a file: restart the cycle
        None => Some(ClickEvent::new(ClickAction::KNOWN[0].clone(), value)),
    }
}

/// none → show_text → show_item → show_entity → none. Contents reset because
/// their shape differs per action.
fn next_hover(current: Option<HoverEvent>) -> Option<HoverEvent> {
    let index = match current {
        None => return Some(HoverEvent::text("")),
        Some(hover) => HoverAction::KNOWN.iter().position(|a| *a == hover.action),
    };
    match index {
        Some(i) if i + 1 < HoverAction::KNOWN.len() => Some(HoverEvent::new(
            HoverAction::KNOWN[i + 1].clone(),
            hover_contents(&HoverAction::KNOWN[i + 1], ""),
        )),
        Some(_) => None,
        None => Some(HoverEvent::text("")),
    }
}

/// Turns a typed field into hover contents. A JSON object is used as-is;
/// anything else fills the action's main field.
pub fn hover_contents(action: &HoverAction, input: &str) -> Value {
    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(input) {
        return value;
    }
    match action {
        HoverAction::ShowText => serde_json::json!({ "text": input }),
        HoverAction::ShowItem => serde_json::json!({ "id": input }),
        HoverAction::ShowEntity => serde_json::json!({ "type": input }),
        HoverAction::Other(_) => Value::String(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tool;
    use crate::core::text::TextSegment;
    use crate::core::version::VersionTier;
    use crate::test_support::test_app;
    use serde_json::json;

    #[test]
    fn test_add_segment_inserts_after_selected() {
        let mut app = test_app();
        update(&mut app, Action::SetText("a".into()));
        update(&mut app, Action::AddSegment);
        update(&mut app, Action::SetText("c".into()));
        update(&mut app, Action::SelectPrev);
        update(&mut app, Action::AddSegment);
        update(&mut app, Action::SetText("b".into()));

        let texts: Vec<&str> = app.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_remove_last_segment_resets_to_default() {
        let mut app = test_app();
        update(&mut app, Action::SetText("only".into()));
        update(&mut app, Action::RemoveSegment);
        assert_eq!(app.segments, vec![create_default()]);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_remove_clamps_selection() {
        let mut app = test_app();
        update(&mut app, Action::AddSegment);
        assert_eq!(app.selected, 1);
        update(&mut app, Action::RemoveSegment);
        assert_eq!(app.selected, 0);
        assert_eq!(app.segments.len(), 1);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = test_app();
        update(&mut app, Action::SelectPrev);
        assert_eq!(app.selected, 0);
        update(&mut app, Action::SelectNext);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_toggle_style_drives_output() {
        let mut app = test_app();
        update(&mut app, Action::SetText("Hi".into()));
        update(&mut app, Action::ToggleStyle(StyleFlag::Bold));
        assert_eq!(app.component(), r#"{"text":"Hi","bold":true}"#);
        update(&mut app, Action::ToggleStyle(StyleFlag::Bold));
        assert_eq!(app.component(), r#""Hi""#);
    }

    #[test]
    fn test_cycle_color() {
        let mut app = test_app();
        update(&mut app, Action::CycleColor);
        assert_eq!(app.segments[0].color, Some(TextColor::Named(NamedColor::Black)));
        assert_eq!(app.status_message, "color: black");
    }

    #[test]
    fn test_events_attach_to_first_segment() {
        let mut app = test_app();
        update(&mut app, Action::SetText("A".into()));
        update(&mut app, Action::AddSegment);
        update(&mut app, Action::SetText("B".into()));
        assert_eq!(app.selected, 1);

        update(&mut app, Action::CycleClickAction);
        update(&mut app, Action::SetClickValue("https://example.com".into()));

        assert_eq!(
            app.segments[0].click_event,
            Some(ClickEvent::new(ClickAction::OpenUrl, "https://example.com"))
        );
        assert!(app.segments[1].click_event.is_none());
    }

    #[test]
    fn test_click_cycle_keeps_value_and_wraps_to_none() {
        let mut app = test_app();
        update(&mut app, Action::CycleClickAction);
        update(&mut app, Action::SetClickValue("/spawn".into()));
        update(&mut app, Action::CycleClickAction);
        assert_eq!(
            app.segments[0].click_event,
            Some(ClickEvent::new(ClickAction::RunCommand, "/spawn"))
        );
        for _ in 0..3 {
            update(&mut app, Action::CycleClickAction);
        }
        assert_eq!(
            app.segments[0].click_event.as_ref().map(|c| c.action.clone()),
            Some(ClickAction::ChangePage)
        );
        update(&mut app, Action::CycleClickAction);
        assert!(app.segments[0].click_event.is_none());
    }

    #[test]
    fn test_set_click_value_without_action_reports() {
        let mut app = test_app();
        update(&mut app, Action::SetClickValue("x".into()));
        assert!(app.segments[0].click_event.is_none());
        assert!(app.status_message.contains("click action"));
    }

    #[test]
    fn test_hover_value_mapping() {
        assert_eq!(hover_contents(&HoverAction::ShowText, "tip"), json!({"text": "tip"}));
        assert_eq!(
            hover_contents(&HoverAction::ShowItem, "minecraft:apple"),
            json!({"id": "minecraft:apple"})
        );
        assert_eq!(
            hover_contents(&HoverAction::ShowEntity, r#"{"type":"minecraft:cow","name":"Daisy"}"#),
            json!({"type": "minecraft:cow", "name": "Daisy"})
        );
        // JSON that isn't an object is treated as text
        assert_eq!(hover_contents(&HoverAction::ShowText, "42"), json!({"text": "42"}));
    }

    #[test]
    fn test_hover_cycle() {
        let mut app = test_app();
        update(&mut app, Action::SetText("x".into()));
        update(&mut app, Action::CycleHoverAction);
        update(&mut app, Action::SetHoverValue("hello".into()));
        assert_eq!(
            app.component(),
            r#"{"text":"x","hover_event":{"action":"show_text","value":{"text":"hello"}}}"#
        );
        update(&mut app, Action::CycleHoverAction);
        assert_eq!(
            app.segments[0].hover_event.as_ref().map(|h| h.action.clone()),
            Some(HoverAction::ShowItem)
        );
        update(&mut app, Action::CycleHoverAction);
        update(&mut app, Action::CycleHoverAction);
        assert!(app.segments[0].hover_event.is_none());
    }

    #[test]
    fn test_cycle_version_and_tool() {
        let mut app = test_app();
        update(&mut app, Action::CycleVersion);
        assert_eq!(app.version, VersionTier::V1_20);
        update(&mut app, Action::CycleTool);
        assert_eq!(app.tool, Tool::Title);
        assert_eq!(app.status_message, "Tool: title");
    }

    #[test]
    fn test_set_target() {
        let mut app = test_app();
        update(&mut app, Action::SetTarget("@p[limit=1]".into()));
        assert_eq!(app.target.to_string(), "@p[limit=1]");
        update(&mut app, Action::SetTarget("@q".into()));
        assert_eq!(app.target.to_string(), "@p[limit=1]");
        assert!(app.status_message.starts_with("Invalid target"));
    }

    #[test]
    fn test_record_history_requires_content() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::RecordHistory), Effect::None);
        update(&mut app, Action::SetText("x".into()));
        assert_eq!(update(&mut app, Action::RecordHistory), Effect::RecordHistory);
    }

    #[test]
    fn test_load_history_restores_session() {
        let mut app = test_app();
        let entry = HistoryEntry::new(
            Tool::Actionbar,
            VersionTier::V1_16,
            "/title @a actionbar \"hp\"".into(),
            vec![TextSegment::plain("hp")],
        );
        update(&mut app, Action::LoadHistory(entry));
        assert_eq!(app.tool, Tool::Actionbar);
        assert_eq!(app.version, VersionTier::V1_16);
        assert_eq!(app.command(), "/title @a actionbar \"hp\"");
    }

    #[test]
    fn test_clear_and_quit() {
        let mut app = test_app();
        update(&mut app, Action::AddSegment);
        update(&mut app, Action::Clear);
        assert_eq!(app.segments.len(), 1);
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
