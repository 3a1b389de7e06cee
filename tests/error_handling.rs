//! Error handling and edge case tests.

use chrono::NaiveDate;
use person_registry::{FixedClock, Record, RecordDraft, RecordStore, RegistryError, StoreConfig};
use std::sync::Arc;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_store() -> RecordStore {
    RecordStore::with_clock(
        StoreConfig { minimal_age: 18 },
        Arc::new(FixedClock(date(2024, 6, 1))),
    )
}

fn valid(email: &str) -> RecordDraft {
    RecordDraft::for_key(email)
        .first_name("First")
        .last_name("Last")
        .birth_date(date(1990, 1, 1))
}

// --- Create Errors ---

#[test]
fn test_create_missing_record() {
    let store = test_store();
    let result = store.create(None);
    assert!(matches!(result, Err(RegistryError::MissingField("record"))));
}

#[test]
fn test_create_missing_each_field() {
    let store = test_store();

    let mut no_email = valid("a@b.com");
    no_email.email = None;
    assert!(matches!(
        store.create(Some(no_email)),
        Err(RegistryError::MissingField("email"))
    ));

    let mut no_last = valid("a@b.com");
    no_last.last_name = Some(String::new());
    assert!(matches!(
        store.create(Some(no_last)),
        Err(RegistryError::MissingField("lastName"))
    ));

    let mut no_birth = valid("a@b.com");
    no_birth.birth_date = None;
    assert!(matches!(
        store.create(Some(no_birth)),
        Err(RegistryError::MissingField("birthDate"))
    ));

    assert!(store.is_empty());
}

#[test]
fn test_create_duplicate_regardless_of_other_fields() {
    let store = test_store();
    store.create(Some(valid("a@b.com"))).unwrap();

    let other = RecordDraft::for_key("a@b.com")
        .first_name("Someone")
        .last_name("Else")
        .birth_date(date(1970, 3, 3))
        .address("Elsewhere");
    let result = store.create(Some(other));

    assert!(matches!(result, Err(RegistryError::DuplicateKey(e)) if e == "a@b.com"));
    assert_eq!(store.get_by_key("a@b.com").unwrap().first_name, "First");
}

#[test]
fn test_create_age_too_low_reports_date_and_threshold() {
    let store = test_store();
    let young = valid("a@b.com").birth_date(date(2024, 1, 1));

    match store.create(Some(young)) {
        Err(RegistryError::AgeTooLow {
            birth_date,
            minimal_age,
        }) => {
            assert_eq!(birth_date, date(2024, 1, 1));
            assert_eq!(minimal_age, 18);
        }
        other => panic!("expected AgeTooLow, got {:?}", other),
    }
}

// --- Update Errors ---

#[test]
fn test_update_nonexistent() {
    let store = test_store();
    let result = store.update(Some(valid("ghost@b.com")));
    assert!(matches!(result, Err(RegistryError::NotFound(e)) if e == "ghost@b.com"));
    assert!(store.is_empty());
}

#[test]
fn test_update_missing_fields_leaves_store_unchanged() {
    let store = test_store();
    let original = store.create(Some(valid("a@b.com"))).unwrap();

    let partial = RecordDraft::for_key("a@b.com").first_name("Only");
    assert!(matches!(
        store.update(Some(partial)),
        Err(RegistryError::MissingField("lastName"))
    ));
    assert_eq!(store.get_by_key("a@b.com").unwrap(), original);
}

#[test]
fn test_update_age_too_low_leaves_store_unchanged() {
    let store = test_store();
    let original = store.create(Some(valid("a@b.com"))).unwrap();

    let result = store.update(Some(valid("a@b.com").birth_date(date(2010, 1, 1))));
    assert!(matches!(result, Err(RegistryError::AgeTooLow { .. })));
    assert_eq!(store.get_by_key("a@b.com").unwrap(), original);
}

// --- Partial Update Errors ---

#[test]
fn test_partial_update_nonexistent() {
    let store = test_store();
    let result = store.partial_update(RecordDraft::for_key("ghost@b.com").last_name("Z"));
    assert!(matches!(result, Err(RegistryError::NotFound(_))));
}

#[test]
fn test_partial_update_not_found_wins_over_age() {
    let store = test_store();
    let result = store.partial_update(
        RecordDraft::for_key("ghost@b.com").birth_date(date(2024, 1, 1)),
    );
    assert!(matches!(result, Err(RegistryError::NotFound(_))));
}

// --- Lookup and Query Errors ---

#[test]
fn test_get_by_unknown_key() {
    let store = test_store();
    assert!(matches!(
        store.get_by_key("nobody@b.com"),
        Err(RegistryError::NotFound(_))
    ));
}

#[test]
fn test_inverted_range_names_both_bounds() {
    let store = test_store();
    let from = date(2001, 1, 1);
    let to = date(2000, 1, 1);

    let err = store.query_by_date_range(from, to).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidRange { from: f, to: t } if f == from && t == to));

    let message = err.to_string();
    assert!(message.contains("2001-01-01") && message.contains("2000-01-01"));
}

// --- Delete Edge Cases ---

#[test]
fn test_delete_unknown_is_silent() {
    let store = test_store();
    store.create(Some(valid("a@b.com"))).unwrap();

    let unknown = Record::new("nobody@b.com", "N", "B", date(1990, 1, 1));
    assert!(!store.delete(&unknown));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_delete_stale_copy_is_silent() {
    let store = test_store();
    let original = store.create(Some(valid("a@b.com"))).unwrap();
    store
        .partial_update(RecordDraft::for_key("a@b.com").phone_number("555"))
        .unwrap();

    assert!(!store.delete(&original));
    assert_eq!(store.len(), 1);

    let current = store.get_by_key("a@b.com").unwrap();
    assert!(store.delete(&current));
}
