//! User-facing error notices
//!
//! Every failure inside the editor becomes a [`Notice`] scoped to the editor.
//! Auth failures are banners that stay until the next successful action or
//! close; validation failures are shown next to the save action; transient
//! failures are dismissible and retried by repeating the action.

use serde::Serialize;
use ward_client::{ClientError, ErrorKind};

pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied. You do not have permission for this action.";
pub const VALIDATION_FALLBACK_MESSAGE: &str = "The role could not be saved. Check the form and try again.";
pub const TRANSIENT_MESSAGE: &str = "The server could not be reached. Please try again.";
pub const NAME_REQUIRED_MESSAGE: &str = "Role name is required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    SessionExpired,
    AccessDenied,
    Validation,
    Transient,
}

impl From<ErrorKind> for NoticeKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::SessionExpired => Self::SessionExpired,
            ErrorKind::AccessDenied => Self::AccessDenied,
            ErrorKind::Validation => Self::Validation,
            ErrorKind::Transient => Self::Transient,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Validation,
            message: message.into(),
        }
    }

    pub fn from_client_error(err: &ClientError) -> Self {
        let kind = NoticeKind::from(err.kind());
        let message = match kind {
            NoticeKind::SessionExpired => SESSION_EXPIRED_MESSAGE.to_string(),
            NoticeKind::AccessDenied => ACCESS_DENIED_MESSAGE.to_string(),
            NoticeKind::Validation => err
                .server_message()
                .unwrap_or(VALIDATION_FALLBACK_MESSAGE)
                .to_string(),
            NoticeKind::Transient => TRANSIENT_MESSAGE.to_string(),
        };
        Self { kind, message }
    }

    /// Auth notices render as a banner instead of inline
    pub fn is_banner(&self) -> bool {
        matches!(self.kind, NoticeKind::SessionExpired | NoticeKind::AccessDenied)
    }

    pub fn is_dismissible(&self) -> bool {
        self.kind == NoticeKind::Transient
    }
}
