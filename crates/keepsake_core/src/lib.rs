//! Core domain logic for Keepsake journal apps.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod query;
pub mod stats;
pub mod storage;
pub mod store;

pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::category::{
    Category, GratitudeCategory, HairCareCategory, PlaceCategory, PurchaseCategory,
    QuestionCategory, ReflectionMood,
};
pub use model::entry::{Entry, EntryDraft, EntryId, EntryValidationError};
pub use model::{
    ChildhoodPlace, ConversationQuestion, GratitudeEntry, HairCareEntry, Purchase, Reflection,
};
pub use query::{DateRange, EntryFilter, Period, SortOrder};
pub use stats::{CategoryCount, Frequency, NameFrequency, Statistics};
pub use storage::{
    open_kv, open_kv_in_memory, KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore,
    StorageError, StorageResult, SCHEMA_VERSION,
};
pub use store::{PersistError, RecordStore, StoreError, StoreEvent, StoreResult, SubscriptionId};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
