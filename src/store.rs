//! The record store: validated CRUD over the in-memory index.

use crate::clock::{Clock, SystemClock};
use crate::error::{RegistryError, Result};
use crate::records::{apply_patch, RecordIndex};
use crate::types::{DateRange, Record, RecordDraft};
use crate::validate::meets_minimal_age;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default minimum age in years.
pub const DEFAULT_MINIMAL_AGE: u32 = 18;

/// Store configuration.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Minimum age, in years, a birth date must imply to be accepted.
    pub minimal_age: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            minimal_age: DEFAULT_MINIMAL_AGE,
        }
    }
}

/// The authoritative collection of person records.
///
/// All invariants are checked before any mutation, under the same write
/// guard as the mutation itself:
/// - at most one record per email
/// - every stored record has email, first name, last name and birth date
/// - every stored birth date passed the minimum-age rule when last written
pub struct RecordStore {
    /// Store configuration.
    config: StoreConfig,

    /// Source of today's date for the age rule.
    clock: Arc<dyn Clock>,

    /// Records, guarded by a single reader/writer lock.
    records: RwLock<RecordIndex>,
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("config", &self.config)
            .field("len", &self.len())
            .finish()
    }
}

impl RecordStore {
    /// Create an empty store using the system clock.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an empty store with an explicit clock.
    pub fn with_clock(config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            records: RwLock::new(RecordIndex::new()),
        }
    }

    /// Configured minimum age in years.
    pub fn minimal_age(&self) -> u32 {
        self.config.minimal_age
    }

    /// Today's date according to the store clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    // --- Mutations ---

    /// Create a new record.
    ///
    /// Checks, in order: the draft is present, mandatory fields are present,
    /// the email is not taken, the birth date meets the minimum age.
    pub fn create(&self, draft: Option<RecordDraft>) -> Result<Record> {
        let record = draft
            .ok_or(RegistryError::MissingField("record"))?
            .into_record()?;

        let mut records = self.records.write();

        if records.contains_key(&record.email) {
            warn!(email = %record.email, "rejected create: duplicate email");
            return Err(RegistryError::DuplicateKey(record.email));
        }

        self.check_age(record.birth_date)?;

        let seq = records.insert(record.clone());
        debug!(email = %record.email, ?seq, "created record");

        Ok(record)
    }

    /// Replace an existing record wholesale.
    ///
    /// Optional fields absent from the draft become absent on the stored
    /// record. Checks, in order: the draft is present, mandatory fields are
    /// present, the birth date meets the minimum age, the email exists.
    pub fn update(&self, draft: Option<RecordDraft>) -> Result<Record> {
        let record = draft
            .ok_or(RegistryError::MissingField("record"))?
            .into_record()?;

        self.check_age(record.birth_date)?;

        let mut records = self.records.write();
        let key = record.email.clone();

        if records.replace(&key, record.clone()).is_none() {
            warn!(email = %key, "rejected update: no such record");
            return Err(RegistryError::NotFound(key));
        }
        debug!(email = %key, "replaced record");

        Ok(record)
    }

    /// Merge the present fields of `patch` onto the stored record with the
    /// same email.
    ///
    /// A supplied name must not be empty. A supplied birth date must meet the
    /// minimum age on its own; without one, no age check happens. Returns the
    /// merged record.
    pub fn partial_update(&self, patch: RecordDraft) -> Result<Record> {
        let key = patch
            .email
            .clone()
            .ok_or(RegistryError::MissingField("email"))?;

        let mut records = self.records.write();

        let stored = match records.get_mut(&key) {
            Some(stored) => stored,
            None => {
                warn!(email = %key, "rejected partial update: no such record");
                return Err(RegistryError::NotFound(key));
            }
        };

        for (field, value) in [
            ("firstName", &patch.first_name),
            ("lastName", &patch.last_name),
        ] {
            if value.as_deref() == Some("") {
                warn!(email = %key, field, "rejected partial update: empty name");
                return Err(RegistryError::MissingField(field));
            }
        }

        if let Some(birth_date) = patch.birth_date {
            self.check_age(birth_date)?;
        }

        apply_patch(stored, patch);
        debug!(email = %key, "merged record");

        Ok(stored.clone())
    }

    /// Remove the stored record equal to `record` in every field.
    ///
    /// Returns whether anything was removed. A stale or unknown record is a
    /// silent no-op.
    pub fn delete(&self, record: &Record) -> bool {
        let mut records = self.records.write();

        if records.get(record.key()) != Some(record) {
            return false;
        }

        records.remove(record.key());
        debug!(email = %record.email, "deleted record");
        true
    }

    /// Remove the record stored under `email`, whatever its other fields.
    pub fn delete_by_key(&self, email: &str) -> Option<Record> {
        let removed = self.records.write().remove(email);
        if removed.is_some() {
            debug!(email = %email, "deleted record by key");
        }
        removed
    }

    // --- Queries ---

    /// Get the record stored under `email`.
    pub fn get_by_key(&self, email: &str) -> Result<Record> {
        self.records
            .read()
            .get(email)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(email.to_string()))
    }

    /// All records with a birth date in `[from, to]`, in creation order.
    pub fn query_by_date_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Record>> {
        let range = DateRange::new(from, to)?;

        let found: Vec<Record> = self
            .records
            .read()
            .iter()
            .filter(|r| range.contains(r.birth_date))
            .cloned()
            .collect();
        debug!(from = %range.start(), to = %range.end(), count = found.len(), "range query");

        Ok(found)
    }

    /// All records in creation order.
    pub fn list(&self) -> Vec<Record> {
        self.records.read().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn check_age(&self, birth_date: NaiveDate) -> Result<()> {
        let minimal_age = self.config.minimal_age;
        if !meets_minimal_age(birth_date, self.clock.today(), minimal_age) {
            warn!(%birth_date, minimal_age, "rejected birth date below minimal age");
            return Err(RegistryError::AgeTooLow {
                birth_date,
                minimal_age,
            });
        }
        Ok(())
    }
}
