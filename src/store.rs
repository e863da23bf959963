//! Intermediate store for retrieved items.
//!
//! One run's retrieved results are persisted as a JSON array at a well-known
//! path so the planner and summarizer can re-read them between turns and so
//! out-of-process tools (`gist store show`) can inspect them after the run.
//! The file is cleared at the start of every run; within a run it only grows.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A single item returned by a retrieval tool.
///
/// Immutable once created: fields are set at construction and never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedItem {
    pub title: String,
    pub content: String,
}

impl RetrievedItem {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// File-backed, append-only store of [`RetrievedItem`]s for one run.
///
/// The sequential execution model gives the store exactly one writer at a
/// time, so no locking is needed. Concurrent runs must use distinct paths.
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Creates a store handle for the given file path. No I/O happens here.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Clears the store, leaving an empty item list behind.
    ///
    /// Called at run start so leftovers from a prior run never leak into
    /// this one, whatever state the file was left in.
    pub fn reset(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        self.write(&[])
    }

    /// Appends items after everything already stored, preserving their order.
    pub fn append(&self, items: &[RetrievedItem]) -> Result<(), StoreError> {
        if items.is_empty() {
            return Ok(());
        }
        let mut all = self.read_all()?;
        all.extend_from_slice(items);
        self.write(&all)
    }

    /// Reads every stored item in insertion order.
    ///
    /// A missing file reads as an empty list; an unreadable or unparsable
    /// file is an error.
    pub fn read_all(&self) -> Result<Vec<RetrievedItem>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| self.io_err(e))?;
        serde_json::from_str(&contents).map_err(|e| StoreError::Parse {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    fn write(&self, items: &[RetrievedItem]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(items).map_err(|e| StoreError::Parse {
            path: self.path.display().to_string(),
            source: e,
        })?;
        fs::write(&self.path, json).map_err(|e| self.io_err(e))
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(name: &str) -> Store {
        let path = std::env::temp_dir().join(format!(
            "gist_test_store_{}_{}.json",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        Store::at(path)
    }

    #[test]
    fn test_read_all_missing_file_is_empty() {
        let store = temp_store("missing");
        assert_eq!(store.read_all().unwrap(), Vec::new());
    }

    #[test]
    fn test_reset_clears_leftover_contents() {
        let store = temp_store("reset");
        store
            .append(&[RetrievedItem::new("stale", "from a previous run")])
            .unwrap();
        store.reset().unwrap();
        assert_eq!(store.read_all().unwrap(), Vec::new());
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let store = temp_store("order");
        store.reset().unwrap();
        store
            .append(&[
                RetrievedItem::new("a", "first"),
                RetrievedItem::new("b", "second"),
            ])
            .unwrap();
        store.append(&[RetrievedItem::new("c", "third")]).unwrap();

        let titles: Vec<String> = store
            .read_all()
            .unwrap()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_append_empty_batch_is_a_no_op() {
        let store = temp_store("empty_batch");
        store.reset().unwrap();
        store.append(&[]).unwrap();
        assert_eq!(store.read_all().unwrap(), Vec::new());
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let store = temp_store("corrupt");
        fs::write(store.path(), "not json at all").unwrap();
        let err = store.read_all().unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        let _ = fs::remove_file(store.path());
    }

    #[test]
    fn test_external_view_is_a_plain_json_array() {
        let store = temp_store("external");
        store.reset().unwrap();
        store
            .append(&[RetrievedItem::new("title", "content")])
            .unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0]["title"], "title");
        assert_eq!(parsed[0]["content"], "content");
        let _ = fs::remove_file(store.path());
    }
}
