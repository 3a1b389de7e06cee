//! Partial-update merge.

use crate::types::{Record, RecordDraft};

/// Copy every present field of `patch` onto `target`.
///
/// Absent fields leave the target untouched. The field list is the full
/// declared field set of [`Record`]; adding a field there means adding it
/// here. Callers reject empty names before merging.
pub fn apply_patch(target: &mut Record, patch: RecordDraft) {
    let RecordDraft {
        email,
        first_name,
        last_name,
        birth_date,
        address,
        phone_number,
    } = patch;

    if let Some(email) = email {
        target.email = email;
    }
    if let Some(first_name) = first_name {
        target.first_name = first_name;
    }
    if let Some(last_name) = last_name {
        target.last_name = last_name;
    }
    if let Some(birth_date) = birth_date {
        target.birth_date = birth_date;
    }
    if let Some(address) = address {
        target.address = Some(address);
    }
    if let Some(phone_number) = phone_number {
        target.phone_number = Some(phone_number);
    }
}
