use crate::store::snapshot::Slot;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Library error taxonomy. Nothing here is fatal to the caller: a missing
/// snapshot is a precondition the cli reports with a hint, and a failed
/// summary call is replaced by a fixed fallback string.
#[derive(Debug, Error)]
pub enum Error {
    /// One of the two comparison inputs has not been captured yet.
    #[error("no {slot} snapshot captured for {date}")]
    MissingSnapshot { date: String, slot: Slot },

    /// An imported item failed boundary validation.
    #[error("malformed item: {reason}")]
    MalformedItem { id: Option<String>, reason: String },

    /// No item with the given id exists in the catalog.
    #[error("item '{0}' not found")]
    ItemNotFound(String),

    /// The narrative summary endpoint failed or returned no usable text.
    #[error("summary unavailable: {0}")]
    SummaryUnavailable(String),

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}
