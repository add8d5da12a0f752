//! Entry domain model.
//!
//! # Responsibility
//! - Define the canonical record shared by every journal-style app.
//! - Provide form-level validation helpers for add/edit flows.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - `created_at` is set once; `updated_at` moves forward on every edit.
//! - Decoding tolerates absent optional keys so older payloads still load.

use crate::model::category::Category;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every entry.
pub type EntryId = Uuid;

/// Form-level validation failure.
///
/// The store accepts any draft; callers check drafts before saving and
/// disable their confirm action on error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Title is empty after trimming whitespace.
    EmptyTitle,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "entry title cannot be empty"),
        }
    }
}

impl Error for EntryValidationError {}

/// Editable fields of an entry, as collected by an add form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft<C: Category> {
    pub title: String,
    pub category: C,
    pub date: NaiveDate,
    pub comment: Option<String>,
    pub is_favorite: bool,
}

impl<C: Category> EntryDraft<C> {
    /// Creates a draft with no comment that is not a favorite.
    pub fn new(title: impl Into<String>, category: C, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            category,
            date,
            comment: None,
            is_favorite: false,
        }
    }

    /// Sets the optional comment. Blank comments are stored as `None`.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = normalize_comment(Some(comment.into()));
        self
    }

    /// Marks the draft as a favorite.
    pub fn favorite(mut self) -> Self {
        self.is_favorite = true;
        self
    }

    /// Checks the fields a form must reject before saving.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_title(&self.title)
    }
}

/// Canonical record persisted by a `RecordStore`.
///
/// Serialized as a camelCase JSON object. Every key except `title`,
/// `category` and `date` may be absent on read; absent timestamps decode as
/// the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = ""))]
pub struct Entry<C: Category> {
    /// Assigned on creation. Payloads without one get a fresh id on read;
    /// `RecordStore::open` writes such ids back so they stay stable.
    #[serde(default = "Uuid::new_v4")]
    pub id: EntryId,
    /// Product name, purchase, place, reflection text or question text.
    pub title: String,
    pub category: C,
    /// Calendar day the entry belongs to.
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl<C: Category> Entry<C> {
    /// Creates an entry from a draft with a generated stable ID.
    pub fn from_draft(draft: EntryDraft<C>, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), draft, now)
    }

    /// Creates an entry with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(id: EntryId, draft: EntryDraft<C>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            category: draft.category,
            date: draft.date,
            comment: normalize_comment(draft.comment),
            is_favorite: draft.is_favorite,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the editable fields as a draft, e.g. to prefill an edit form.
    pub fn to_draft(&self) -> EntryDraft<C> {
        EntryDraft {
            title: self.title.clone(),
            category: self.category,
            date: self.date,
            comment: self.comment.clone(),
            is_favorite: self.is_favorite,
        }
    }

    /// Replaces every mutable field from `source` and bumps `updated_at`.
    ///
    /// `id` and `created_at` are never touched.
    pub(crate) fn replace_fields(&mut self, source: &Entry<C>, now: DateTime<Utc>) {
        self.title = source.title.clone();
        self.category = source.category;
        self.date = source.date;
        self.comment = normalize_comment(source.comment.clone());
        self.is_favorite = source.is_favorite;
        self.updated_at = now;
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_title(&self.title)
    }

    /// Case-insensitive substring match over title and comment.
    ///
    /// `needle` must already be lowercase.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .comment
                .as_deref()
                .is_some_and(|comment| comment.to_lowercase().contains(needle))
    }
}

fn validate_title(title: &str) -> Result<(), EntryValidationError> {
    if title.trim().is_empty() {
        return Err(EntryValidationError::EmptyTitle);
    }
    Ok(())
}

fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment.filter(|value| !value.trim().is_empty())
}
