//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the editor,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Modes
//!
//! - **Cursor**: single keys act on the selected segment (`b` toggles bold,
//!   `c` cycles color, ...). Enter, `E`, `H` and `g` open the field editor.
//! - **Input**: the field editor owns the keyboard until Enter or Esc.
//!
//! The history overlay (Ctrl+O) takes every event while open.
//!
//! ## Redraw Strategy
//!
//! Nothing animates, so the loop sleeps up to 500ms and only redraws after
//! an event. All pending events are drained before the next draw.

mod component;
mod components;
mod event;
mod ui;

use log::{info, warn};
use std::io::{self, stdout};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use serde_json::Value;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::history;
use crate::core::state::App;
use crate::core::text::{HoverEvent, StyleFlag};
use crate::tui::component::EventHandler;
use crate::tui::components::{EditField, HistoryBrowserState, HistoryEvent, InputBox, InputEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Single-key commands on the selected segment.
    Cursor,
    /// Editing one field in the input box. Enter commits, Esc discards.
    Input,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    /// Field editor, present while in Input mode
    pub input_box: Option<InputBox>,
    pub input_mode: InputMode,
    /// History overlay (None = hidden)
    pub history_browser: Option<HistoryBrowserState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            input_box: None,
            input_mode: InputMode::Cursor,
            history_browser: None,
        }
    }

    pub fn open_editor(&mut self, field: EditField, initial: impl Into<String>) {
        self.input_box = Some(InputBox::new(field, initial));
        self.input_mode = InputMode::Input;
    }

    pub fn close_editor(&mut self) {
        self.input_box = None;
        self.input_mode = InputMode::Cursor;
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        // Event types are reported so key releases can be filtered out; the
        // flags are ignored by terminals without the Kitty protocol
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    if let Err(e) = &terminal_mode_guard {
        warn!("Failed to enable terminal modes: {}", e);
    }

    let result = (|| -> io::Result<()> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
                needs_redraw = false;
            }

            let first_event = poll_event_timeout(std::time::Duration::from_millis(500));
            if first_event.is_some() {
                needs_redraw = true;
            }
            for event in first_event
                .into_iter()
                .chain(std::iter::from_fn(poll_event_immediate))
            {
                if handle_event(&mut app, &mut tui, event, &config) {
                    info!("Editor closed");
                    return Ok(());
                }
            }
        }
    })();

    drop(terminal_mode_guard);
    ratatui::restore();
    result
}

/// Routes one event through the overlay, the field editor or the cursor
/// keymap. Returns true when the editor should exit.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent, config: &ResolvedConfig) -> bool {
    match event {
        TuiEvent::Resize => return false,
        // Ctrl+C always quits regardless of mode
        TuiEvent::ForceQuit => return apply(app, Action::Quit, config),
        TuiEvent::OpenHistory => {
            open_history(app, tui, config);
            return false;
        }
        _ => {}
    }

    // When the history overlay is open, route all events to it
    if let Some(ref mut browser) = tui.history_browser {
        if let Some(history_event) = browser.handle_event(&event) {
            match history_event {
                HistoryEvent::Load(entry) => {
                    tui.history_browser = None;
                    return apply(app, Action::LoadHistory(entry), config);
                }
                HistoryEvent::Delete(id) => match delete_entry(config, &id) {
                    Ok(()) => browser.remove_entry(&id),
                    Err(e) => {
                        warn!("Failed to delete history entry {}: {}", id, e);
                        app.status_message = format!("Delete failed: {e}");
                    }
                },
                HistoryEvent::Dismiss => tui.history_browser = None,
            }
        }
        return false;
    }

    match tui.input_mode {
        InputMode::Input => {
            let Some(input_box) = tui.input_box.as_mut() else {
                tui.close_editor();
                return false;
            };
            match input_box.handle_event(&event) {
                Some(InputEvent::Submit(value)) => {
                    let field = input_box.field;
                    tui.close_editor();
                    apply(app, field.action(value), config)
                }
                Some(InputEvent::Cancel) => {
                    tui.close_editor();
                    false
                }
                Some(InputEvent::ContentChanged) | None => false,
            }
        }
        InputMode::Cursor => match cursor_action(app, tui, event) {
            Some(action) => apply(app, action, config),
            None => false,
        },
    }
}

/// The Cursor-mode keymap. Keys that open an editor return `None`.
fn cursor_action(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Option<Action> {
    let action = match event {
        TuiEvent::CursorUp => Action::SelectPrev,
        TuiEvent::CursorDown => Action::SelectNext,
        TuiEvent::Submit => {
            let text = app.selected_segment().map(|s| s.text.clone()).unwrap_or_default();
            tui.open_editor(EditField::Text, text);
            return None;
        }
        // Pasting starts an edit of the selected text
        TuiEvent::Paste(_) => {
            let text = app.selected_segment().map(|s| s.text.clone()).unwrap_or_default();
            tui.open_editor(EditField::Text, text);
            if let Some(input_box) = tui.input_box.as_mut() {
                input_box.handle_event(&event);
            }
            return None;
        }
        TuiEvent::InputChar(c) => match c {
            'n' => Action::AddSegment,
            'd' => Action::RemoveSegment,
            'b' => Action::ToggleStyle(StyleFlag::Bold),
            'i' => Action::ToggleStyle(StyleFlag::Italic),
            'u' => Action::ToggleStyle(StyleFlag::Underlined),
            's' => Action::ToggleStyle(StyleFlag::Strikethrough),
            'o' => Action::ToggleStyle(StyleFlag::Obfuscated),
            'c' => Action::CycleColor,
            'e' => Action::CycleClickAction,
            'h' => Action::CycleHoverAction,
            'v' => Action::CycleVersion,
            't' => Action::CycleTool,
            'a' => Action::ToggleArrayFormat,
            'y' => Action::RecordHistory,
            'x' => Action::Clear,
            'q' => Action::Quit,
            'E' => {
                match app.event_segment().and_then(|s| s.click_event.as_ref()) {
                    Some(click) => {
                        let value = click.value.clone();
                        tui.open_editor(EditField::ClickValue, value);
                    }
                    None => app.status_message = String::from("Choose a click action first (e)"),
                }
                return None;
            }
            'H' => {
                match app.event_segment().and_then(|s| s.hover_event.as_ref()) {
                    Some(hover) => {
                        let value = hover_input(hover);
                        tui.open_editor(EditField::HoverValue, value);
                    }
                    None => app.status_message = String::from("Choose a hover action first (h)"),
                }
                return None;
            }
            'g' => {
                tui.open_editor(EditField::Target, app.target.to_string());
                return None;
            }
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}

/// Pre-fills the hover editor: the bare value for single-field contents,
/// JSON otherwise.
fn hover_input(hover: &HoverEvent) -> String {
    match &hover.contents {
        Value::Object(map) if map.len() == 1 => match map.values().next() {
            Some(Value::String(s)) => s.clone(),
            _ => hover.contents.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Runs `update` and performs the effect it asks for.
fn apply(app: &mut App, action: Action, config: &ResolvedConfig) -> bool {
    match update(app, action) {
        Effect::Quit => true,
        Effect::RecordHistory => {
            match config.data_dir.as_deref() {
                Some(dir) if config.history_enabled => {
                    if let Err(e) = history::record(dir, app.history_entry(), config.history_max_entries) {
                        warn!("Failed to record history: {}", e);
                        app.status_message = format!("Save failed: {e}");
                    }
                }
                _ => app.status_message = String::from("History is disabled"),
            }
            false
        }
        Effect::None => false,
    }
}

fn open_history(app: &mut App, tui: &mut TuiState, config: &ResolvedConfig) {
    let Some(dir) = config.data_dir.as_deref() else {
        app.status_message = String::from("History is disabled");
        return;
    };
    match history::load(dir) {
        Ok(index) => tui.history_browser = Some(HistoryBrowserState::new(index.entries)),
        Err(e) => {
            warn!("Failed to load history: {}", e);
            app.status_message = format!("History unavailable: {e}");
        }
    }
}

fn delete_entry(config: &ResolvedConfig, id: &str) -> io::Result<()> {
    let dir = config
        .data_dir
        .as_deref()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no data directory"))?;
    history::remove(dir, id).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tool;
    use crate::core::selector::Target;
    use crate::core::text::{ClickAction, ClickEvent};
    use crate::core::version::VersionTier;
    use crate::test_support::test_app;
    use std::path::Path;

    fn config(dir: &Path) -> ResolvedConfig {
        ResolvedConfig {
            version: VersionTier::V1_21_5,
            target: Target::default(),
            history_enabled: true,
            history_max_entries: 50,
            data_dir: Some(dir.to_path_buf()),
        }
    }

    fn send(app: &mut App, tui: &mut TuiState, config: &ResolvedConfig, events: &[TuiEvent]) -> bool {
        let mut quit = false;
        for event in events {
            quit |= handle_event(app, tui, event.clone(), config);
        }
        quit
    }

    fn typed(s: &str) -> Vec<TuiEvent> {
        s.chars().map(TuiEvent::InputChar).collect()
    }

    #[test]
    fn test_enter_edits_selected_text() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let mut app = test_app();
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &config, &[TuiEvent::Submit]);
        assert_eq!(tui.input_mode, InputMode::Input);
        // Letters go to the editor, not the keymap
        send(&mut app, &mut tui, &config, &typed("bold q"));
        send(&mut app, &mut tui, &config, &[TuiEvent::Submit]);

        assert_eq!(tui.input_mode, InputMode::Cursor);
        assert_eq!(app.segments[0].text, "bold q");
        assert!(!app.segments[0].is_set(StyleFlag::Bold));
    }

    #[test]
    fn test_escape_discards_edit() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let mut app = test_app();
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &config, &[TuiEvent::Submit]);
        send(&mut app, &mut tui, &config, &typed("draft"));
        send(&mut app, &mut tui, &config, &[TuiEvent::Escape]);

        assert!(tui.input_box.is_none());
        assert_eq!(app.segments[0].text, "");
    }

    #[test]
    fn test_cursor_keys_map_to_actions() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let mut app = test_app();
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &config, &typed("bcnt"));
        assert!(app.segments[0].is_set(StyleFlag::Bold));
        assert!(app.segments[0].color.is_some());
        assert_eq!(app.segments.len(), 2);
        assert_eq!(app.selected, 1);
        assert_eq!(app.tool, Tool::Title);

        send(&mut app, &mut tui, &config, &[TuiEvent::CursorUp]);
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_quit_keys() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let mut app = test_app();
        let mut tui = TuiState::new();

        assert!(send(&mut app, &mut tui, &config, &typed("q")));

        // Ctrl+C quits even while editing
        let mut tui = TuiState::new();
        tui.open_editor(EditField::Text, "");
        assert!(send(&mut app, &mut tui, &config, &[TuiEvent::ForceQuit]));
    }

    #[test]
    fn test_click_value_editor() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let mut app = test_app();
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &config, &typed("E"));
        assert!(tui.input_box.is_none());
        assert!(app.status_message.contains("click action"));

        send(&mut app, &mut tui, &config, &typed("eE"));
        assert_eq!(tui.input_mode, InputMode::Input);
        send(&mut app, &mut tui, &config, &typed("https://example.com"));
        send(&mut app, &mut tui, &config, &[TuiEvent::Submit]);
        assert_eq!(
            app.segments[0].click_event,
            Some(ClickEvent::new(ClickAction::OpenUrl, "https://example.com"))
        );
    }

    #[test]
    fn test_hover_input_prefill() {
        assert_eq!(hover_input(&HoverEvent::text("tip")), "tip");
        let entity = HoverEvent::new(
            crate::core::text::HoverAction::ShowEntity,
            serde_json::json!({"type": "minecraft:cow", "name": "Daisy"}),
        );
        assert_eq!(hover_input(&entity), r#"{"type":"minecraft:cow","name":"Daisy"}"#);
    }

    #[test]
    fn test_target_editor() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let mut app = test_app();
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &config, &typed("g"));
        // Pre-filled with "@a"; replace it
        send(&mut app, &mut tui, &config, &[TuiEvent::Backspace, TuiEvent::Backspace]);
        send(&mut app, &mut tui, &config, &typed("Steve"));
        send(&mut app, &mut tui, &config, &[TuiEvent::Submit]);
        assert_eq!(app.target.to_string(), "Steve");
    }

    #[test]
    fn test_record_then_reopen_from_history() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let mut app = test_app();
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &config, &[TuiEvent::Submit]);
        send(&mut app, &mut tui, &config, &typed("saved"));
        send(&mut app, &mut tui, &config, &[TuiEvent::Submit]);
        send(&mut app, &mut tui, &config, &typed("y"));
        assert_eq!(history::load(dir.path()).unwrap().entries.len(), 1);

        send(&mut app, &mut tui, &config, &typed("x"));
        assert_eq!(app.segments[0].text, "");

        send(&mut app, &mut tui, &config, &[TuiEvent::OpenHistory]);
        assert!(tui.history_browser.is_some());
        send(&mut app, &mut tui, &config, &[TuiEvent::Submit]);
        assert!(tui.history_browser.is_none());
        assert_eq!(app.segments[0].text, "saved");
    }

    #[test]
    fn test_delete_from_history_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let mut app = test_app();
        app.segments[0].text = String::from("gone");
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &config, &typed("y"));
        send(&mut app, &mut tui, &config, &[TuiEvent::OpenHistory]);
        send(&mut app, &mut tui, &config, &typed("dd"));
        assert!(history::load(dir.path()).unwrap().entries.is_empty());
        send(&mut app, &mut tui, &config, &[TuiEvent::Escape]);
        assert!(tui.history_browser.is_none());
    }

    #[test]
    fn test_failed_delete_keeps_row() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let mut app = test_app();
        app.segments[0].text = String::from("kept");
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &config, &typed("y"));
        send(&mut app, &mut tui, &config, &[TuiEvent::OpenHistory]);
        std::fs::write(dir.path().join("history.json"), "{not json").unwrap();
        send(&mut app, &mut tui, &config, &typed("dd"));

        let browser = tui.history_browser.as_ref().unwrap();
        assert_eq!(browser.entries.len(), 1);
        assert!(app.status_message.starts_with("Delete failed"));
    }

    #[test]
    fn test_record_with_history_disabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        config.history_enabled = false;
        let mut app = test_app();
        app.segments[0].text = String::from("x");
        let mut tui = TuiState::new();

        send(&mut app, &mut tui, &config, &typed("y"));
        assert_eq!(app.status_message, "History is disabled");
        assert!(history::load(dir.path()).unwrap().entries.is_empty());
    }
}
