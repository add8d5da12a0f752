use crate::model::entry::EntryId;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure to mirror the in-memory collection to storage.
#[derive(Debug)]
pub enum PersistError {
    Encode(serde_json::Error),
    Write(StorageError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode entries: {err}"),
            Self::Write(err) => write!(f, "failed to write entries: {err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) => Some(err),
            Self::Write(err) => Some(err),
        }
    }
}

/// Record store error.
///
/// `Persist` is returned after the in-memory mutation has already happened
/// and observers were notified; callers may ignore it.
#[derive(Debug)]
pub enum StoreError {
    NotFound(EntryId),
    /// Reading the persisted collection failed.
    Storage(StorageError),
    /// The persisted collection could not be decoded.
    Decode(serde_json::Error),
    Persist(PersistError),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Decode(err) => write!(f, "invalid persisted entries: {err}"),
            Self::Persist(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Storage(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Persist(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<PersistError> for StoreError {
    fn from(value: PersistError) -> Self {
        Self::Persist(value)
    }
}
