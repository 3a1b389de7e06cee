//! Keyed, insertion-ordered record index.

use crate::types::{Record, Sequence};
use std::collections::{BTreeMap, HashMap};

/// In-memory record collection.
///
/// Records live in a sequence-ordered map so iteration follows creation
/// order; a second map resolves the email key to its sequence in O(1).
#[derive(Debug, Default)]
pub struct RecordIndex {
    /// Sequence -> record.
    entries: BTreeMap<Sequence, Record>,

    /// Email key -> sequence.
    by_key: HashMap<String, Sequence>,

    /// Last sequence handed out.
    head: Sequence,
}

impl RecordIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a record with this key is stored.
    pub fn contains_key(&self, key: &str) -> bool {
        self.by_key.contains_key(key)
    }

    /// Insert a record under a fresh sequence.
    ///
    /// The caller guarantees the key is not already present.
    pub fn insert(&mut self, record: Record) -> Sequence {
        let seq = self.head.next();
        self.head = seq;
        self.by_key.insert(record.email.clone(), seq);
        self.entries.insert(seq, record);
        seq
    }

    /// Get the record for a key.
    pub fn get(&self, key: &str) -> Option<&Record> {
        let seq = self.by_key.get(key)?;
        self.entries.get(seq)
    }

    /// Get the record for a key, mutably.
    ///
    /// Callers must not change `email` to a different value through this
    /// reference; use [`RecordIndex::replace`] for that.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Record> {
        let seq = self.by_key.get(key)?;
        self.entries.get_mut(seq)
    }

    /// Replace the record stored under `key`, keeping its position.
    ///
    /// Returns the previous record, or `None` (and stores nothing) if the
    /// key is absent.
    pub fn replace(&mut self, key: &str, record: Record) -> Option<Record> {
        let seq = *self.by_key.get(key)?;
        if record.email != key {
            self.by_key.remove(key);
            self.by_key.insert(record.email.clone(), seq);
        }
        self.entries.insert(seq, record)
    }

    /// Remove the record stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Record> {
        let seq = self.by_key.remove(key)?;
        self.entries.remove(&seq)
    }

    /// Iterate records in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.entries.values()
    }

    /// Get count of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
