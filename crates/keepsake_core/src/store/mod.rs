//! Record store: the single owner of an app's entries.
//!
//! # Responsibility
//! - Expose add/update/delete/get plus derived views to presentation code.
//! - Isolate serialization and storage details from callers.
//!
//! # Invariants
//! - Update/delete of a missing id report `StoreError::NotFound` and leave
//!   the collection untouched.
//! - Persistence failures never roll back the in-memory collection.
//! - Persisted layout is one JSON array per storage key, rewritten in full.

mod error;
mod record_store;

pub use error::{PersistError, StoreError, StoreResult};
pub use record_store::{RecordStore, StoreEvent, SubscriptionId};
