//! Domain-level error types.
//!
//! These errors are transport agnostic. Inbound adapters map them to HTTP
//! statuses and the response envelope; the `message` and `details` fields
//! feed server-side logs and are never sent to clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable machine-readable error kind describing the failure category.
///
/// The serialized form is the exact PascalCase variant name, which is what
/// clients receive in the envelope's `error` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A required field is missing from the request body.
    ValidationError,
    /// A query parameter is missing or malformed.
    ClientError,
    /// The requested username already belongs to another user.
    UsernameAlreadyTaken,
    /// The requested email already belongs to another user.
    EmailAlreadyInUse,
    /// No user matches the given identifier or email.
    UserNotFound,
    /// Any unhandled failure; always the outer catch-all.
    ServerError,
}

/// Domain error payload carried alongside the kind.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorKind};
///
/// let err = Error::user_not_found();
/// assert_eq!(err.kind(), ErrorKind::UserNotFound);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    details: Option<Value>,
}

impl Error {
    /// Create a new error with the given kind and log message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            details: None,
        }
    }

    /// Stable machine-readable error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Human-readable message used in server-side logs.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Supplementary structured details for logs.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Error, ErrorKind};
    /// use serde_json::json;
    ///
    /// let err = Error::validation("missing field")
    ///     .with_details(json!({ "missingFields": ["email"] }));
    /// assert!(err.details().is_some());
    /// ```
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Convenience constructor for [`ErrorKind::ValidationError`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message)
    }

    /// Convenience constructor for [`ErrorKind::ClientError`].
    pub fn client(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ClientError, message)
    }

    /// Convenience constructor for [`ErrorKind::UsernameAlreadyTaken`].
    pub fn username_taken() -> Self {
        Self::new(ErrorKind::UsernameAlreadyTaken, "username already taken")
    }

    /// Convenience constructor for [`ErrorKind::EmailAlreadyInUse`].
    pub fn email_in_use() -> Self {
        Self::new(ErrorKind::EmailAlreadyInUse, "email already in use")
    }

    /// Convenience constructor for [`ErrorKind::UserNotFound`].
    pub fn user_not_found() -> Self {
        Self::new(ErrorKind::UserNotFound, "user not found")
    }

    /// Convenience constructor for [`ErrorKind::ServerError`].
    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServerError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
