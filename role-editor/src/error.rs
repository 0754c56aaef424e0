//! Editor error types

use thiserror::Error;
use ward_client::ClientError;

/// Editor error type
#[derive(Debug, Error)]
pub enum EditorError {
    /// Save attempted with an empty or whitespace-only name
    #[error("Role name is required")]
    NameRequired,

    /// Operation needs an open editor
    #[error("Editor is not open")]
    NotOpen,

    /// A save or delete is already in flight
    #[error("Editor is busy")]
    Busy,

    /// Delete requested while creating a new role
    #[error("Only an existing role can be deleted")]
    NotEditing,

    /// Delete attempted without confirmation
    #[error("Delete has not been confirmed")]
    DeleteNotConfirmed,

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// Backend call failed
    #[error(transparent)]
    Api(#[from] ClientError),
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;
