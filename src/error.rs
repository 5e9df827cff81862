//! The error types returned by this crate
//!
//! Earlier versions of the tracker silently swallowed every storage failure, so callers
//! could not tell a persisted write from a dropped one. \
//! These types keep the failure kinds apart instead: callers can match on them and decide
//! whether to retry, alert the user, or ignore.

use chrono::NaiveDate;
use thiserror::Error;

/// A failure of the underlying key-value substrate.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O failure on the backing file: {0}")]
    Io(#[from] std::io::Error),

    /// The substrate refused to serve the request (used by mocked storages in tests)
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A task (or a patch result) that violates the domain rules.
///
/// These are detected at the mutation boundary, before anything is written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("a task title must not be empty")]
    EmptyTitle,

    #[error("the start date ({start}) is after the end date ({end})")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

/// What [`TaskStore`](crate::TaskStore) operations can fail with.
///
/// Note that *malformed persisted data* is deliberately absent here: an unreadable collection
/// or record is recovered locally (treated as absent, or dropped) and never surfaced as an error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The substrate could not be read or written. The operation had no effect.
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    #[error("unable to serialize the task collection: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The requested mutation would have produced an invalid task. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
