//! # Person Registry
//!
//! An in-memory registry of person records with validated create, update,
//! partial update and delete, key lookup, and birth-date range queries.
//!
//! ## Core Concepts
//!
//! - **Records**: a person keyed by email, with names, a birth date and
//!   optional address and phone number
//! - **Drafts**: record-shaped input where every field may be absent
//! - **Minimum age**: birth dates must be at least `minimal_age` calendar
//!   years before the current year
//! - **HTTP** (feature `server`): a thin axum layer over the store
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use person_registry::{RecordDraft, RecordStore, StoreConfig};
//!
//! let store = RecordStore::new(StoreConfig { minimal_age: 18 });
//!
//! let birth = NaiveDate::from_ymd_opt(1990, 4, 2).unwrap();
//! store.create(Some(
//!     RecordDraft::for_key("ada@example.com")
//!         .first_name("Ada")
//!         .last_name("Lovelace")
//!         .birth_date(birth),
//! ))?;
//!
//! store.partial_update(RecordDraft::for_key("ada@example.com").last_name("Byron"))?;
//! assert_eq!(store.get_by_key("ada@example.com")?.last_name, "Byron");
//! # Ok::<(), person_registry::RegistryError>(())
//! ```

pub mod clock;
pub mod error;
#[cfg(feature = "server")]
pub mod http;
pub mod records;
pub mod store;
pub mod types;
pub mod validate;

// Re-exports
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{RegistryError, Result};
pub use records::{apply_patch, RecordIndex};
pub use store::{RecordStore, StoreConfig, DEFAULT_MINIMAL_AGE};
pub use types::*;
pub use validate::{check_format, is_valid_email, meets_minimal_age, FieldErrors};
