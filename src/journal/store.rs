//! Entry store
//!
//! JSON-lines backed store for journal entries. Entries are kept in memory
//! sorted ascending by observation date, which is the order every analyzer
//! expects. Persistence writes the whole file to a temp file in the same
//! directory and renames it into place, so a crash never leaves a
//! half-written store behind.

use crate::journal::error::{StoreError, StoreResult};
use crate::journal::types::JournalEntry;
use chrono::Utc;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// File-backed store for one person's entry history
pub struct EntryStore {
    /// Backing file; `None` for an in-memory store (tests, dry runs)
    path: Option<PathBuf>,
    /// All entries, ascending by (date, id)
    entries: Vec<JournalEntry>,
}

impl EntryStore {
    /// Create an in-memory store with no backing file
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: Vec::new(),
        }
    }

    /// Open a store at the given path, creating it if missing
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut entries = Vec::new();

        if path.exists() {
            let file = std::fs::File::open(&path)?;
            for (line_num, line) in BufReader::new(file).lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let entry: JournalEntry = serde_json::from_str(&line).map_err(|e| {
                    StoreError::Serialization(format!("line {}: {}", line_num + 1, e))
                })?;
                entries.push(entry);
            }
        } else if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut store = Self {
            path: Some(path),
            entries,
        };
        store.sort_entries();

        tracing::debug!(entries = store.entries.len(), "Opened entry store");
        Ok(store)
    }

    /// All entries, ascending by date
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries in the store
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by id
    pub fn get(&self, id: &str) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Save an entry, returning the finalized version
    ///
    /// New entries (empty or unknown id) get an id and `created_at`.
    /// Saving over an existing id keeps the original `created_at` and
    /// refreshes `updated_at`. Out-of-range metric values are rejected
    /// here so the analytics pipeline never sees them.
    pub fn save(&mut self, mut entry: JournalEntry) -> StoreResult<JournalEntry> {
        if let Err((metric, value)) = entry.validate() {
            return Err(StoreError::OutOfRange { metric, value });
        }

        let now = Utc::now().timestamp_millis();

        if entry.id.is_empty() {
            entry.id = uuid::Uuid::new_v4().to_string();
            entry.created_at = now;
            entry.updated_at = None;
            self.entries.push(entry.clone());
        } else if let Some(pos) = self.entries.iter().position(|e| e.id == entry.id) {
            entry.created_at = self.entries[pos].created_at;
            entry.updated_at = Some(now);
            self.entries[pos] = entry.clone();
        } else {
            entry.created_at = now;
            entry.updated_at = None;
            self.entries.push(entry.clone());
        }

        self.sort_entries();
        self.persist()?;

        tracing::debug!(id = %entry.id, date = entry.date, "Saved entry");
        Ok(entry)
    }

    /// Delete an entry by id
    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);

        if self.entries.len() == before {
            return Err(StoreError::EntryNotFound(id.to_string()));
        }

        self.persist()?;
        tracing::debug!(id = %id, "Deleted entry");
        Ok(())
    }

    /// Case-insensitive substring search over free text, tags, symptoms,
    /// and medications
    pub fn search(&self, query: &str) -> Vec<&JournalEntry> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| {
                e.free_text.to_lowercase().contains(&needle)
                    || e.tags.iter().any(|t| t.to_lowercase().contains(&needle))
                    || e.symptoms.iter().any(|s| s.to_lowercase().contains(&needle))
                    || e.medications.iter().any(|m| m.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Keep entries sorted ascending by (date, id) so output is stable
    /// even when two entries share a timestamp
    fn sort_entries(&mut self) {
        self.entries.sort_by(|a, b| {
            a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id))
        });
    }

    /// Write all entries to disk atomically (temp file + rename)
    fn persist(&self) -> StoreResult<()> {
        let path = match &self.path {
            Some(p) => p,
            None => return Ok(()),
        };

        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;

        for entry in &self.entries {
            serde_json::to_writer(&mut tmp, entry)?;
            tmp.write_all(b"\n")?;
        }
        tmp.flush()?;

        tmp.persist(path)
            .map_err(|e| StoreError::Io(e.error))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_assigns_id_and_created_at() {
        let mut store = EntryStore::in_memory();
        let saved = store.save(JournalEntry::new(1000).mood(3.0)).unwrap();

        assert!(!saved.id.is_empty());
        assert!(saved.created_at > 0);
        assert!(saved.updated_at.is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_edit_preserves_created_at_and_sets_updated_at() {
        let mut store = EntryStore::in_memory();
        let saved = store.save(JournalEntry::new(1000).mood(3.0)).unwrap();

        let mut edited = saved.clone();
        edited.mood = Some(4.0);
        let edited = store.save(edited).unwrap();

        assert_eq!(edited.id, saved.id);
        assert_eq!(edited.created_at, saved.created_at);
        assert!(edited.updated_at.is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&saved.id).unwrap().mood, Some(4.0));
    }

    #[test]
    fn test_save_rejects_out_of_range() {
        let mut store = EntryStore::in_memory();
        let result = store.save(JournalEntry::new(1000).pain(15.0));
        assert!(matches!(result, Err(StoreError::OutOfRange { .. })));
        assert!(store.is_empty());
    }

    #[test]
    fn test_entries_sorted_by_date() {
        let mut store = EntryStore::in_memory();
        store.save(JournalEntry::new(3000)).unwrap();
        store.save(JournalEntry::new(1000)).unwrap();
        store.save(JournalEntry::new(2000)).unwrap();

        let dates: Vec<i64> = store.entries().iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![1000, 2000, 3000]);
    }

    #[test]
    fn test_delete() {
        let mut store = EntryStore::in_memory();
        let saved = store.save(JournalEntry::new(1000)).unwrap();

        store.delete(&saved.id).unwrap();
        assert!(store.is_empty());

        assert!(matches!(
            store.delete("no-such-id"),
            Err(StoreError::EntryNotFound(_))
        ));
    }

    #[test]
    fn test_search() {
        let mut store = EntryStore::in_memory();
        store
            .save(JournalEntry::new(1000).note("Slept badly").symptom("headache"))
            .unwrap();
        store
            .save(JournalEntry::new(2000).medication("ibuprofen").tag("voice"))
            .unwrap();

        assert_eq!(store.search("HEADACHE").len(), 1);
        assert_eq!(store.search("ibu").len(), 1);
        assert_eq!(store.search("voice").len(), 1);
        assert_eq!(store.search("slept").len(), 1);
        assert_eq!(store.search("zzz").len(), 0);
    }

    #[test]
    fn test_persistence_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.jsonl");

        let id = {
            let mut store = EntryStore::open(&path).unwrap();
            let saved = store
                .save(JournalEntry::new(1000).mood(4.0).symptom("cough"))
                .unwrap();
            store.save(JournalEntry::new(2000).pain(2.0)).unwrap();
            saved.id
        };

        let store = EntryStore::open(&path).unwrap();
        assert_eq!(store.len(), 2);
        let restored = store.get(&id).unwrap();
        assert_eq!(restored.mood, Some(4.0));
        assert!(restored.has_symptom("cough"));
    }
}
