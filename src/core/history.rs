//! # Command History
//!
//! Remembers generated commands in `~/.mccmd/history.json`, newest first.
//!
//! Each entry keeps the segments it was built from so the editor can reopen
//! it. Recording a command that is already in the list moves it to the front
//! instead of duplicating it; the list is capped at a configured length.
//!
//! All writes use atomic rename (write `.tmp`, then `rename()`) for crash safety.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::Tool;
use crate::core::text::TextSegment;
use crate::core::version::VersionTier;

const HISTORY_FILE: &str = "history.json";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub id: String,
    pub tool: Tool,
    pub version: VersionTier,
    pub command: String,
    #[serde(default)]
    pub segments: Vec<TextSegment>,
    pub created_at: i64,
}

impl HistoryEntry {
    /// A new entry stamped with a fresh UUID and the current time.
    pub fn new(tool: Tool, version: VersionTier, command: String, segments: Vec<TextSegment>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            tool,
            version,
            command,
            segments,
            created_at: Utc::now().timestamp(),
        }
    }
}

#[derive(Serialize, Deserialize, Default, Debug)]
pub struct HistoryIndex {
    pub entries: Vec<HistoryEntry>,
}

fn history_path(dir: &Path) -> PathBuf {
    dir.join(HISTORY_FILE)
}

/// Atomically write `data` as JSON to `path` (via `.tmp` + rename).
fn atomic_write_json<T: Serialize>(path: &Path, data: &T) -> io::Result<()> {
    let tmp_path = path.with_extension("tmp");
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Load the history from `dir`. A missing file is an empty history.
pub fn load(dir: &Path) -> io::Result<HistoryIndex> {
    let path = history_path(dir);
    if !path.exists() {
        return Ok(HistoryIndex::default());
    }
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn store(dir: &Path, index: &HistoryIndex) -> io::Result<()> {
    fs::create_dir_all(dir)?;
    atomic_write_json(&history_path(dir), index)
}

/// Put `entry` at the front, dropping any older entry with the same command,
/// and keep at most `max_entries`.
pub fn record(dir: &Path, entry: HistoryEntry, max_entries: usize) -> io::Result<()> {
    let mut index = match load(dir) {
        Ok(index) => index,
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            warn!("History file is corrupt, starting over: {}", e);
            HistoryIndex::default()
        }
        Err(e) => return Err(e),
    };

    index.entries.retain(|e| e.command != entry.command);
    debug!("Recording history entry {} ({})", entry.id, entry.tool.label());
    index.entries.insert(0, entry);
    index.entries.truncate(max_entries);

    store(dir, &index)
}

/// Remove one entry by ID. Unknown IDs are not an error.
pub fn remove(dir: &Path, id: &str) -> io::Result<bool> {
    let mut index = load(dir)?;
    let before = index.entries.len();
    index.entries.retain(|e| e.id != id);
    let removed = index.entries.len() != before;
    if removed {
        store(dir, &index)?;
    }
    Ok(removed)
}

/// Remove every entry.
pub fn clear(dir: &Path) -> io::Result<()> {
    let path = history_path(dir);
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Record `entry` if a data directory is available, logging failures instead
/// of returning them. Entry point for callers that must not fail on history.
pub fn record_quietly(dir: Option<&Path>, entry: HistoryEntry, max_entries: usize) {
    let Some(dir) = dir else {
        warn!("No data directory, command not recorded");
        return;
    };
    if let Err(e) = record(dir, entry, max_entries) {
        warn!("Failed to record history: {}", e);
    }
}
