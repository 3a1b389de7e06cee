//! Core types for the registry.

use crate::error::{RegistryError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Insertion position in the store.
///
/// Assigned on create and kept across updates, so iteration order is the
/// order in which records were first created.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Sequence(pub u64);

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seq({})", self.0)
    }
}

impl Sequence {
    pub fn next(self) -> Self {
        Sequence(self.0 + 1)
    }
}

/// A stored person record.
///
/// Equality is value equality over every field. The logical key is `email`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl Record {
    /// Create a record with the mandatory fields and no address or phone.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        birth_date: NaiveDate,
    ) -> Self {
        Self {
            email: email.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            birth_date,
            address: None,
            phone_number: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// The lookup and uniqueness key.
    pub fn key(&self) -> &str {
        &self.email
    }
}

/// Record-shaped input where every field may be absent.
///
/// This is what callers hand to `create`, `update` and `partial_update`,
/// and what the HTTP layer decodes request bodies into.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDraft {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl RecordDraft {
    /// A draft carrying only the key, the starting point for a patch.
    pub fn for_key(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn first_name(mut self, value: impl Into<String>) -> Self {
        self.first_name = Some(value.into());
        self
    }

    pub fn last_name(mut self, value: impl Into<String>) -> Self {
        self.last_name = Some(value.into());
        self
    }

    pub fn birth_date(mut self, value: NaiveDate) -> Self {
        self.birth_date = Some(value);
        self
    }

    pub fn address(mut self, value: impl Into<String>) -> Self {
        self.address = Some(value.into());
        self
    }

    pub fn phone_number(mut self, value: impl Into<String>) -> Self {
        self.phone_number = Some(value.into());
        self
    }

    /// Convert into a full record, failing on the first absent mandatory field.
    ///
    /// Fields are checked in declaration order: email, firstName, lastName,
    /// birthDate. Empty strings count as absent.
    pub fn into_record(self) -> Result<Record> {
        let email = non_empty(self.email).ok_or(RegistryError::MissingField("email"))?;
        let first_name =
            non_empty(self.first_name).ok_or(RegistryError::MissingField("firstName"))?;
        let last_name = non_empty(self.last_name).ok_or(RegistryError::MissingField("lastName"))?;
        let birth_date = self
            .birth_date
            .ok_or(RegistryError::MissingField("birthDate"))?;

        Ok(Record {
            email,
            first_name,
            last_name,
            birth_date,
            address: self.address,
            phone_number: self.phone_number,
        })
    }
}

impl From<Record> for RecordDraft {
    fn from(record: Record) -> Self {
        Self {
            email: Some(record.email),
            first_name: Some(record.first_name),
            last_name: Some(record.last_name),
            birth_date: Some(record.birth_date),
            address: record.address,
            phone_number: record.phone_number,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Inclusive birth-date range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `from` after `to`. Equal bounds are allowed.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self> {
        if from > to {
            return Err(RegistryError::InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    pub fn start(&self) -> NaiveDate {
        self.from
    }

    pub fn end(&self) -> NaiveDate {
        self.to
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }
}
