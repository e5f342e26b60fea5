//! Calculation history
//!
//! Every completed calculation becomes one `"[timestamp] description"` line.
//! The history file holds the oldest entry first and is rewritten wholesale
//! on every append and on clear; viewers list it newest first.
//!
//! The file has no schema beyond one line per entry. Lines that do not look
//! like `[timestamp] description` (hand-written notes, other tools' output)
//! are kept verbatim and written back unchanged.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Timestamp layout used inside the brackets of each history line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// History persistence errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Reading or writing the history file failed
    #[error("History file I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A line does not start with a `[timestamp]` prefix
    #[error("Malformed history line {line_number}: {line}")]
    MalformedLine {
        /// 1-based line number
        line_number: usize,
        /// The offending line
        line: String,
    },
    /// JSON export failed
    #[error("History JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The store never loaded its file, so saving would overwrite it
    #[error("History file {} was not loaded; refusing to overwrite it", .path.display())]
    NotLoaded {
        /// The file that could not be read
        path: PathBuf,
    },
}

/// A single entry in the calculation history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local time the calculation completed (second resolution); `None` for
    /// a line kept verbatim from the file
    pub timestamp: Option<NaiveDateTime>,
    /// What was calculated, e.g. `5 + 3` or `sqr(4)`
    pub operands: String,
    /// The result text as displayed
    pub result: String,
}

impl HistoryEntry {
    /// Creates a new history entry stamped with the current local time
    #[must_use]
    pub fn new(operands: String, result: String) -> Self {
        let now = Local::now().naive_local();
        Self::with_timestamp(operands, result, now.with_nanosecond(0).unwrap_or(now))
    }

    /// Creates a history entry with a specific timestamp (for testing)
    #[must_use]
    pub fn with_timestamp(operands: String, result: String, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp: Some(timestamp),
            operands,
            result,
        }
    }

    /// Wraps a history file line that has no `[timestamp]` prefix
    #[must_use]
    pub fn verbatim(line: &str) -> Self {
        Self {
            timestamp: None,
            operands: line.to_string(),
            result: String::new(),
        }
    }

    /// Returns `operands = result`, or just the operands when there is no result
    #[must_use]
    pub fn description(&self) -> String {
        if self.result.is_empty() {
            self.operands.clone()
        } else {
            format!("{} = {}", self.operands, self.result)
        }
    }

    /// Renders the entry as one history file line
    #[must_use]
    pub fn to_line(&self) -> String {
        match self.timestamp {
            Some(timestamp) => format!(
                "[{}] {}",
                timestamp.format(TIMESTAMP_FORMAT),
                self.description()
            ),
            None => self.description(),
        }
    }

    /// Parses one history file line.
    ///
    /// The description is split at its last ` = `. A description without one,
    /// or with nothing after it, is kept whole as the operands so hand-edited
    /// lines survive a rewrite.
    pub fn parse_line(line: &str, line_number: usize) -> Result<Self, HistoryError> {
        let malformed = || HistoryError::MalformedLine {
            line_number,
            line: line.to_string(),
        };
        let rest = line.strip_prefix('[').ok_or_else(malformed)?;
        let (stamp, description) = rest.split_once(']').ok_or_else(malformed)?;
        let timestamp =
            NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).map_err(|_| malformed())?;
        let description = description.strip_prefix(' ').unwrap_or(description);
        let (operands, result) = match description.rsplit_once(" = ") {
            Some((operands, result)) if !result.is_empty() => (operands, result),
            _ => (description, ""),
        };
        Ok(Self::with_timestamp(
            operands.to_string(),
            result.to_string(),
            timestamp,
        ))
    }
}

/// Ordered calculation history (oldest first)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    /// Creates an empty history
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses history file contents.
    ///
    /// Blank lines are dropped. Any other line that would not be written back
    /// exactly as read is kept verbatim.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut history = Self::new();
        for (index, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let entry = match HistoryEntry::parse_line(line, index + 1) {
                Ok(entry) if entry.to_line() == line => entry,
                Ok(_) => HistoryEntry::verbatim(line),
                Err(err) => {
                    warn!(%err, "keeping history line verbatim");
                    HistoryEntry::verbatim(line)
                }
            };
            history.push(entry);
        }
        history
    }

    /// Renders the history file contents, one line per entry
    #[must_use]
    pub fn to_text(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}\n", entry.to_line()))
            .collect()
    }

    /// Adds an entry to the end of the history
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the history is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clears all history entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over the entries (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Returns an iterator over the entries (newest first)
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Returns the most recent entry
    #[must_use]
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// Serializes the history to JSON (newest first, as displayed)
    pub fn to_json(&self) -> Result<String, HistoryError> {
        let entries: Vec<&HistoryEntry> = self.iter_newest_first().collect();
        Ok(serde_json::to_string_pretty(&entries)?)
    }
}

/// History backed by a plain-text file
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    history: History,
    /// False when the file exists but could not be read
    writable: bool,
}

impl HistoryStore {
    /// Opens the history file; a missing file is an empty history.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than failing the
    /// load, so every line of the file is kept.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let history = match fs::read(&path) {
            Ok(bytes) => History::from_text(&String::from_utf8_lossy(&bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history file yet");
                History::new()
            }
            Err(err) => return Err(err.into()),
        };
        info!(path = %path.display(), entries = history.len(), "history loaded");
        Ok(Self {
            path,
            history,
            writable: true,
        })
    }

    /// Creates a store for a history that starts out empty
    #[must_use]
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            history: History::new(),
            writable: true,
        }
    }

    /// Creates an in-memory store for a file that could not be loaded.
    ///
    /// Entries are still collected, but saving fails with
    /// [`HistoryError::NotLoaded`] so the unread file is never overwritten.
    #[must_use]
    pub fn detached(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            history: History::new(),
            writable: false,
        }
    }

    /// Whether saving writes to the file
    #[must_use]
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Returns the backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the in-memory history
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Appends an entry and rewrites the file.
    ///
    /// The entry stays in memory even when the write fails.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<(), HistoryError> {
        self.history.push(entry);
        self.save()
    }

    /// Empties the history and rewrites the file
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.history.clear();
        self.save()
    }

    /// Rewrites the whole file from memory
    pub fn save(&self) -> Result<(), HistoryError> {
        if !self.writable {
            return Err(HistoryError::NotLoaded {
                path: self.path.clone(),
            });
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, self.history.to_text())?;
        debug!(path = %self.path.display(), entries = self.history.len(), "history saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn stamp(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn entry(operands: &str, result: &str, s: u32) -> HistoryEntry {
        HistoryEntry::with_timestamp(operands.into(), result.into(), stamp(10, 0, s))
    }

    // ===== HistoryEntry tests =====

    #[test]
    fn test_history_entry_new_has_whole_seconds() {
        let entry = HistoryEntry::new("2 + 2".into(), "4".into());
        assert_eq!(entry.timestamp.unwrap().nanosecond(), 0);
        assert_eq!(entry.description(), "2 + 2 = 4");
    }

    #[test]
    fn test_history_entry_to_line() {
        let entry = entry("5 + 3", "8", 7);
        assert_eq!(entry.to_line(), "[2024-03-15 10:00:07] 5 + 3 = 8");
    }

    #[test]
    fn test_parse_line() {
        let entry = HistoryEntry::parse_line("[2024-03-15 10:00:07] 5 × 3 = 15", 1).unwrap();
        assert_eq!(entry.timestamp, Some(stamp(10, 0, 7)));
        assert_eq!(entry.operands, "5 × 3");
        assert_eq!(entry.result, "15");
    }

    #[test]
    fn test_parse_line_splits_on_last_equals() {
        let entry = HistoryEntry::parse_line("[2024-03-15 10:00:07] a = b = c", 1).unwrap();
        assert_eq!(entry.operands, "a = b");
        assert_eq!(entry.result, "c");
    }

    #[test]
    fn test_parse_line_without_result() {
        let entry = HistoryEntry::parse_line("[2024-03-15 10:00:07] note to self", 1).unwrap();
        assert_eq!(entry.operands, "note to self");
        assert_eq!(entry.result, "");
        assert_eq!(entry.to_line(), "[2024-03-15 10:00:07] note to self");
    }

    #[test]
    fn test_parse_line_keeps_trailing_equals() {
        let line = "[2024-03-15 10:00:07] foo = ";
        let entry = HistoryEntry::parse_line(line, 1).unwrap();
        assert_eq!(entry.operands, "foo = ");
        assert_eq!(entry.result, "");
        assert_eq!(entry.to_line(), line);
    }

    #[test]
    fn test_verbatim_entry_writes_back_unchanged() {
        let entry = HistoryEntry::verbatim("my note = ");
        assert_eq!(entry.timestamp, None);
        assert_eq!(entry.to_line(), "my note = ");
    }

    #[test]
    fn test_parse_line_malformed() {
        for line in ["no stamp", "[not a date] 1 + 1 = 2", "[2024-03-15 10:00:07"] {
            assert!(matches!(
                HistoryEntry::parse_line(line, 4),
                Err(HistoryError::MalformedLine { line_number: 4, .. })
            ));
        }
    }

    #[test]
    fn test_history_entry_serialize() {
        let json = serde_json::to_string(&entry("2 + 3", "5", 1)).unwrap();
        assert!(json.contains("\"operands\":\"2 + 3\""));
        assert!(json.contains("\"result\":\"5\""));
    }

    // ===== History tests =====

    #[test]
    fn test_history_order() {
        let mut history = History::new();
        history.push(entry("a", "1", 1));
        history.push(entry("b", "2", 2));
        history.push(entry("c", "3", 3));

        let oldest: Vec<&str> = history.iter().map(|e| e.operands.as_str()).collect();
        assert_eq!(oldest, vec!["a", "b", "c"]);
        let newest: Vec<&str> = history
            .iter_newest_first()
            .map(|e| e.operands.as_str())
            .collect();
        assert_eq!(newest, vec!["c", "b", "a"]);
        assert_eq!(history.last().unwrap().operands, "c");
    }

    #[test]
    fn test_history_clear() {
        let mut history = History::new();
        history.push(entry("a", "1", 1));
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.to_text(), "");
    }

    #[test]
    fn test_history_text_round_trip() {
        let mut history = History::new();
        history.push(entry("5 + 3", "8", 1));
        history.push(entry("√(9)", "3", 2));
        let restored = History::from_text(&history.to_text());
        assert_eq!(restored, history);
    }

    #[test]
    fn test_history_from_text_keeps_unparsed_lines() {
        let text = "[2024-03-15 10:00:01] 1 + 1 = 2\nmy note\n\n[2024-03-15 10:00:02] 2 + 2 = 4\n";
        let history = History::from_text(text);
        assert_eq!(history.len(), 3);
        assert_eq!(history.iter().nth(1).unwrap().timestamp, None);
        assert_eq!(history.to_text(), text.replace("\n\n", "\n"));
    }

    #[test]
    fn test_history_from_text_keeps_odd_spacing() {
        // Parses, but would not be written back byte for byte
        let text = "[2024-03-15 10:00:01]1 + 1 = 2\n";
        let history = History::from_text(text);
        assert_eq!(history.len(), 1);
        assert_eq!(history.to_text(), text);
    }

    #[test]
    fn test_history_to_json_newest_first() {
        let mut history = History::new();
        history.push(entry("first", "1", 1));
        history.push(entry("second", "2", 2));
        let json = history.to_json().unwrap();
        assert!(json.find("second").unwrap() < json.find("first").unwrap());
    }

    // ===== HistoryStore tests =====

    #[test]
    fn test_store_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::open(dir.path().join("history.txt")).unwrap();
        assert!(store.history().is_empty());
    }

    #[test]
    fn test_store_append_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.txt");

        let mut store = HistoryStore::open(&path).unwrap();
        store.append(entry("5 + 3", "8", 1)).unwrap();
        store.append(entry("sqr(4)", "16", 2)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "[2024-03-15 10:00:01] 5 + 3 = 8\n[2024-03-15 10:00:02] sqr(4) = 16\n"
        );

        let reloaded = HistoryStore::open(&path).unwrap();
        assert_eq!(reloaded.history(), store.history());
    }

    #[test]
    fn test_store_clear_truncates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.txt");
        let mut store = HistoryStore::open(&path).unwrap();
        store.append(entry("1 + 1", "2", 1)).unwrap();
        store.clear().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert!(HistoryStore::open(&path).unwrap().history().is_empty());
    }

    #[test]
    fn test_store_keeps_lines_through_append() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.txt");
        fs::write(&path, "[2024-03-15 10:00:01] 2 + 2 = 4\nmy note\n[2024-03-15 10:00:02] foo = \n")
            .unwrap();

        let mut store = HistoryStore::open(&path).unwrap();
        store.append(entry("1 + 1", "2", 3)).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[2024-03-15 10:00:01] 2 + 2 = 4\nmy note\n[2024-03-15 10:00:02] foo = \n\
             [2024-03-15 10:00:03] 1 + 1 = 2\n"
        );
    }

    #[test]
    fn test_store_open_invalid_utf8_keeps_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.txt");
        fs::write(&path, b"[2024-03-15 10:00:01] 2 + 2 = 4\n[2024-03-15 10:00:02] caf\xE9\n").unwrap();

        let mut store = HistoryStore::open(&path).unwrap();
        assert_eq!(store.history().len(), 2);
        store.append(entry("1 + 1", "2", 3)).unwrap();

        let after = String::from_utf8_lossy(&fs::read(&path).unwrap()).into_owned();
        assert!(after.contains("[2024-03-15 10:00:01] 2 + 2 = 4"));
        assert!(after.contains("[2024-03-15 10:00:02] caf"));
        assert!(after.contains("1 + 1 = 2"));
    }

    #[test]
    fn test_detached_store_never_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.txt");
        fs::write(&path, "[2024-03-15 10:00:01] 2 + 2 = 4\n").unwrap();

        let mut store = HistoryStore::detached(&path);
        assert!(!store.is_writable());
        let result = store.append(entry("1 + 1", "2", 2));
        assert!(matches!(result, Err(HistoryError::NotLoaded { .. })));
        assert_eq!(store.history().len(), 1);
        assert!(matches!(store.clear(), Err(HistoryError::NotLoaded { .. })));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[2024-03-15 10:00:01] 2 + 2 = 4\n"
        );
    }

    #[test]
    fn test_store_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("history.txt");
        let mut store = HistoryStore::empty(&path);
        store.append(entry("1 + 1", "2", 1)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_store_write_failure_keeps_entry() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be written as a file
        let mut store = HistoryStore::empty(dir.path());
        let result = store.append(entry("1 + 1", "2", 1));
        assert!(matches!(result, Err(HistoryError::Io(_))));
        assert_eq!(store.history().len(), 1);
    }
}
