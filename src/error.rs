// Error types for store operations

use crate::task::TaskId;
use thiserror::Error;

/// Warning shown when a task is added with no text
pub const EMPTY_TEXT_WARNING: &str = "Tugas tidak boleh kosong";

#[derive(Debug, Error)]
pub enum StoreError {
    /// Task text was empty after trimming
    #[error("{}", EMPTY_TEXT_WARNING)]
    EmptyText,

    /// No task with this id is in the list
    #[error("No task with id {0}")]
    UnknownTask(TaskId),

    #[error("Failed to serialize tasks: {0}")]
    Encode(#[from] serde_json::Error),

    /// The slot backend failed to read or write
    #[error("Storage failure: {0:#}")]
    Storage(eyre::Report),
}

impl StoreError {
    /// True for errors a UI should show as an inline warning
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::EmptyText)
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
