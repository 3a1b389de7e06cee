//! Record collection internals.
//!
//! Records are held in an insertion-ordered index keyed by email, and
//! partial updates are applied with an explicit field-by-field merge.

mod index;
mod merge;

pub use index::RecordIndex;
pub use merge::apply_patch;
