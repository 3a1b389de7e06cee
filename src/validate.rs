//! Field-level validation and the minimum-age rule.
//!
//! Format checks (`check_format`) belong to the request boundary and collect
//! every failing field at once. The age rule is enforced by the store itself
//! on every write that carries a birth date.

use crate::types::RecordDraft;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Accepted email shape: lowercase local part, lowercase domain, 2-4 letter TLD.
pub const EMAIL_PATTERN: &str = r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,4}$";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"));

/// Field name to failure reason, sorted by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. The first reason recorded for a field wins.
    pub fn add(&mut self, field: &str, reason: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| reason.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, reason) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, reason)?;
            first = false;
        }
        Ok(())
    }
}

/// Whether `email` has the accepted shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Year-difference age rule: `today.year - birth.year >= minimal_age`.
///
/// Month and day are ignored on purpose, so anyone born in the threshold
/// year passes for the whole calendar year.
pub fn meets_minimal_age(birth_date: NaiveDate, today: NaiveDate, minimal_age: u32) -> bool {
    i64::from(today.year()) - i64::from(birth_date.year()) >= i64::from(minimal_age)
}

/// Check the shape of a full record draft.
///
/// Returns every failing field, empty when the draft is well formed.
/// `birthDate` must lie strictly before `today`.
pub fn check_format(draft: &RecordDraft, today: NaiveDate) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match draft.email.as_deref() {
        None => errors.add("email", "must not be null"),
        Some(email) if !is_valid_email(email) => {
            errors.add("email", format!("must match \"{}\"", EMAIL_PATTERN))
        }
        Some(_) => {}
    }

    for (field, value) in [
        ("firstName", draft.first_name.as_deref()),
        ("lastName", draft.last_name.as_deref()),
    ] {
        if value.map_or(true, str::is_empty) {
            errors.add(field, "must not be empty");
        }
    }

    match draft.birth_date {
        None => errors.add("birthDate", "must not be null"),
        Some(date) if date >= today => errors.add("birthDate", "must be a past date"),
        Some(_) => {}
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last+tag@mail-host.example.org"));
        assert!(!is_valid_email("A@b.com"));
        assert!(!is_valid_email("a@b.c"));
        assert!(!is_valid_email("a@b.museum"));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_age_rule_ignores_month_and_day() {
        let today = date(2024, 6, 1);
        assert!(meets_minimal_age(date(2006, 12, 31), today, 18));
        assert!(meets_minimal_age(date(2000, 6, 1), today, 18));
        assert!(!meets_minimal_age(date(2007, 1, 1), today, 18));
        assert!(!meets_minimal_age(date(2024, 1, 1), today, 18));
        assert!(meets_minimal_age(date(2024, 1, 1), today, 0));
    }

    #[test]
    fn test_check_format_collects_all_fields() {
        let errors = check_format(&RecordDraft::default(), date(2024, 6, 1));
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("email"), Some("must not be null"));
        assert_eq!(errors.get("firstName"), Some("must not be empty"));
        assert_eq!(errors.get("lastName"), Some("must not be empty"));
        assert_eq!(errors.get("birthDate"), Some("must not be null"));
    }

    #[test]
    fn test_check_format_rejects_future_and_today() {
        let today = date(2024, 6, 1);
        let draft = RecordDraft::for_key("a@b.com")
            .first_name("A")
            .last_name("B")
            .birth_date(today);
        let errors = check_format(&draft, today);
        assert_eq!(errors.get("birthDate"), Some("must be a past date"));

        let draft = draft.birth_date(date(2000, 1, 1));
        assert!(check_format(&draft, today).is_empty());
    }

    #[test]
    fn test_field_errors_display_is_sorted() {
        let mut errors = FieldErrors::new();
        errors.add("lastName", "must not be empty");
        errors.add("email", "must not be null");
        errors.add("email", "ignored");
        assert_eq!(
            errors.to_string(),
            "email: must not be null; lastName: must not be empty"
        );
    }
}
