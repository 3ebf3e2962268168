//! Summary History Module
//!
//! Persists generated summaries (and the user's API key) to a single JSON file.
//! Writes are whole-file, last-write-wins. A missing or corrupt file is treated
//! as empty history rather than an error.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use summarist_core::history::HistoryStore;
//!
//! let store = HistoryStore::new("data/history.json", 50);
//! let record = store.append(result)?;
//! let recent = store.list();
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::engine::SummaryResult;
use crate::error::AppError;

/// Maximum title length in characters
const MAX_TITLE_CHARS: usize = 60;

/// A stored summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Short label derived from the summary's opening words
    pub title: String,
    pub result: SummaryResult,
}

/// Everything kept in the history file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Newest first
    #[serde(default)]
    pub summaries: Vec<SummaryRecord>,
}

/// Derive a title from the first words of a summary, cut at a word boundary.
pub fn derive_title(summary_text: &str) -> String {
    let mut title = String::new();
    for word in summary_text.split_whitespace() {
        let extra = if title.is_empty() { 0 } else { 1 };
        if title.chars().count() + extra + word.chars().count() > MAX_TITLE_CHARS {
            break;
        }
        if extra == 1 {
            title.push(' ');
        }
        title.push_str(word);
    }
    if title.is_empty() {
        // a single very long word
        title = summary_text.chars().take(MAX_TITLE_CHARS).collect();
    }
    title.trim_end_matches(['.', ',', ';', ':']).to_string()
}

/// File-backed summary history
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    limit: usize,
}

impl HistoryStore {
    /// Create a store backed by `path`, keeping at most `limit` summaries.
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit: limit.max(1),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored state; missing or unreadable files yield an empty state.
    pub fn load(&self) -> StoredState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return StoredState::default(),
            Err(e) => {
                warn!("Failed to read history file {:?}: {}", self.path, e);
                return StoredState::default();
            }
        };

        match serde_json::from_str::<StoredState>(&raw) {
            Ok(state) => state,
            Err(e) => {
                warn!("History file {:?} is corrupt, starting empty: {}", self.path, e);
                StoredState::default()
            }
        }
    }

    /// Overwrite the stored state.
    pub fn save(&self, state: &StoredState) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json)?;
        debug!("Saved {} summaries to {:?}", state.summaries.len(), self.path);
        Ok(())
    }

    /// Store a new summary at the front of the history, trimming the oldest beyond the limit.
    pub fn append(&self, result: SummaryResult) -> Result<SummaryRecord, AppError> {
        let record = SummaryRecord {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            title: derive_title(&result.summary_text),
            result,
        };

        let mut state = self.load();
        state.summaries.insert(0, record.clone());
        state.summaries.truncate(self.limit);
        self.save(&state)?;
        Ok(record)
    }

    /// All stored summaries, newest first.
    pub fn list(&self) -> Vec<SummaryRecord> {
        self.load().summaries
    }

    /// Look up a summary by id.
    pub fn get(&self, id: Uuid) -> Option<SummaryRecord> {
        self.load().summaries.into_iter().find(|r| r.id == id)
    }

    /// Delete a summary. Returns whether anything was removed.
    pub fn remove(&self, id: Uuid) -> Result<bool, AppError> {
        let mut state = self.load();
        let before = state.summaries.len();
        state.summaries.retain(|r| r.id != id);
        if state.summaries.len() == before {
            return Ok(false);
        }
        self.save(&state)?;
        Ok(true)
    }

    /// Delete all summaries, keeping the API key.
    pub fn clear(&self) -> Result<(), AppError> {
        let mut state = self.load();
        state.summaries.clear();
        self.save(&state)
    }

    /// The stored API key, if any.
    pub fn api_key(&self) -> Option<String> {
        self.load().api_key
    }

    /// Store or forget the API key.
    pub fn set_api_key(&self, api_key: Option<String>) -> Result<(), AppError> {
        let mut state = self.load();
        state.api_key = api_key.filter(|k| !k.trim().is_empty());
        self.save(&state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{summarize, SummaryLength};
    use tempfile::TempDir;

    fn sample(text: &str) -> SummaryResult {
        summarize(text, SummaryLength::Long).expect("sample should summarize")
    }

    fn store_in(dir: &TempDir, limit: usize) -> HistoryStore {
        HistoryStore::new(dir.path().join("nested").join("history.json"), limit)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, 10);
        assert_eq!(store.load(), StoredState::default());
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_append_and_get() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, 10);

        let record = store.append(sample("First summary here. It has two sentences.")).unwrap();
        let loaded = store.get(record.id).expect("record should exist");
        assert_eq!(loaded, record);
        assert!(store.path().exists());
    }

    #[test]
    fn test_newest_first_and_limit() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, 2);

        store.append(sample("One.")).unwrap();
        store.append(sample("Two.")).unwrap();
        let third = store.append(sample("Three.")).unwrap();

        let list = store.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, third.id);
        assert_eq!(list[0].title, "Three");
        assert_eq!(list[1].title, "Two");
    }

    #[test]
    fn test_corrupt_file_is_empty_history() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, 10);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(store.list().is_empty());
        // and can be overwritten
        store.append(sample("Recovered.")).unwrap();
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, 10);
        let a = store.append(sample("Alpha.")).unwrap();
        store.append(sample("Beta.")).unwrap();

        assert!(store.remove(a.id).unwrap());
        assert!(!store.remove(a.id).unwrap());
        assert_eq!(store.list().len(), 1);

        store.set_api_key(Some("sk-keep".to_string())).unwrap();
        store.clear().unwrap();
        assert!(store.list().is_empty());
        assert_eq!(store.api_key().as_deref(), Some("sk-keep"));
    }

    #[test]
    fn test_blank_api_key_is_forgotten() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir, 10);
        store.set_api_key(Some("sk-1".to_string())).unwrap();
        store.set_api_key(Some("  ".to_string())).unwrap();
        assert_eq!(store.api_key(), None);
    }

    #[test]
    fn test_derive_title() {
        assert_eq!(derive_title("Short summary."), "Short summary");
        let long = "word ".repeat(30);
        let title = derive_title(&long);
        assert!(title.chars().count() <= MAX_TITLE_CHARS);
        assert!(title.starts_with("word word"));
        assert_eq!(derive_title(&"x".repeat(80)).chars().count(), MAX_TITLE_CHARS);
    }
}
