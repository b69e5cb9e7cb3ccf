use crate::model::{EntityKind, RecordId};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("item not found: {0}")]
    ItemNotFound(RecordId),

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: RecordId },

    #[error("failed to save {kind}: {source}")]
    SaveFailed {
        kind: EntityKind,
        #[source]
        source: Box<TodoError>,
    },

    #[error("failed to delete {kind}: {source}")]
    DeleteFailed {
        kind: EntityKind,
        #[source]
        source: Box<TodoError>,
    },

    #[error("Invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Corrupt data file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl TodoError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        TodoError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// True for the two "record is absent" variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TodoError::ItemNotFound(_) | TodoError::NotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TodoError>;
