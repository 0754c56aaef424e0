//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required (401)
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied (403)
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error (400, 422)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status
    #[error("Internal error: {0}")]
    Internal(String),
}

/// How a failure should be surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Session is gone, the user must log in again
    SessionExpired,
    /// Authenticated but not allowed
    AccessDenied,
    /// The request was rejected on its content
    Validation,
    /// Network or server trouble, retryable by repeating the action
    Transient,
}

impl ClientError {
    /// Classify this error for display
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized => ErrorKind::SessionExpired,
            Self::Forbidden(_) => ErrorKind::AccessDenied,
            Self::Validation(_) => ErrorKind::Validation,
            _ => ErrorKind::Transient,
        }
    }

    /// Message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Validation(msg)
            | Self::Internal(msg) => Some(msg.as_str()).filter(|m| !m.trim().is_empty()),
            _ => None,
        }
    }
}

/// Pull a human-readable message out of an error body
///
/// Accepts `{"detail": "..."}`, the list form `{"detail": [{"msg": "..."}]}`,
/// `{"message": "..."}` and `{"error": "..."}`; anything else is returned as
/// trimmed text.
pub fn extract_message(body: &str) -> String {
    let body = body.trim();
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    let detail = match value.get("detail") {
        Some(serde_json::Value::String(s)) => Some(s.clone()),
        Some(serde_json::Value::Array(items)) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(|msg| msg.as_str())
            .map(str::to_string),
        _ => None,
    };

    detail
        .or_else(|| value.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .or_else(|| value.get("error").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(ClientError::Unauthorized.kind(), ErrorKind::SessionExpired);
        assert_eq!(ClientError::Forbidden(String::new()).kind(), ErrorKind::AccessDenied);
        assert_eq!(ClientError::Validation("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(ClientError::NotFound("x".into()).kind(), ErrorKind::Transient);
        assert_eq!(ClientError::Internal("x".into()).kind(), ErrorKind::Transient);
        assert_eq!(
            ClientError::InvalidResponse("x".into()).kind(),
            ErrorKind::Transient
        );
    }

    #[test]
    fn test_server_message_skips_blank() {
        assert_eq!(ClientError::Validation("  ".into()).server_message(), None);
        assert_eq!(
            ClientError::Validation("Name taken".into()).server_message(),
            Some("Name taken")
        );
        assert_eq!(ClientError::Unauthorized.server_message(), None);
    }

    #[test]
    fn test_extract_detail_string() {
        assert_eq!(extract_message(r#"{"detail": "Role name already exists"}"#), "Role name already exists");
    }

    #[test]
    fn test_extract_detail_list() {
        let body = r#"{"detail": [{"loc": ["body", "name"], "msg": "field required", "type": "missing"}]}"#;
        assert_eq!(extract_message(body), "field required");
    }

    #[test]
    fn test_extract_message_and_error_keys() {
        assert_eq!(extract_message(r#"{"message": "nope"}"#), "nope");
        assert_eq!(extract_message(r#"{"error": "bad"}"#), "bad");
    }

    #[test]
    fn test_extract_plain_text() {
        assert_eq!(extract_message("  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(extract_message(""), "");
    }
}
