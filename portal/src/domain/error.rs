//! Client-side error types.
//!
//! These errors are transport agnostic. Local form validation, the session
//! hooks and every outbound adapter map their failures into [`Error`] so a
//! controller only has to decide which notice, if any, to surface.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fallback message used when a failed response carries no `message` field.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

/// Notice surfaced when the service rejects the stored credential.
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Local validation failed; nothing was sent.
    InvalidRequest,
    /// The service answered 401 or 403 and the session was torn down.
    SessionExpired,
    /// The service answered with any other non-success status.
    Rejected,
    /// The request never produced a response.
    Transport,
    /// A success response could not be decoded.
    Decode,
    /// The credential store could not be read or written.
    Storage,
}

/// Portal error payload.
///
/// ## Invariants
/// - `status` is present for [`ErrorCode::SessionExpired`] and
///   [`ErrorCode::Rejected`] and absent otherwise.
/// - `server_message` is only populated from a response body.
///
/// # Examples
/// ```
/// use portal::domain::{Error, ErrorCode};
///
/// let err = Error::rejected(409, Some("User already exists".to_owned()));
/// assert_eq!(err.code(), ErrorCode::Rejected);
/// assert_eq!(err.message(), "User already exists");
/// assert_eq!(err.status(), Some(409));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    message: String,
    status: Option<u16>,
    server_message: Option<String>,
}

impl Error {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status: None,
            server_message: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// HTTP status that produced the error, when one was received.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Message supplied by the service itself, if the body carried one.
    pub fn server_message(&self) -> Option<&str> {
        self.server_message.as_deref()
    }

    /// Whether the session hook already handled this failure.
    pub fn is_session_expired(&self) -> bool {
        self.code == ErrorCode::SessionExpired
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::SessionExpired`].
    ///
    /// The message is always [`SESSION_EXPIRED_MESSAGE`]; whatever the
    /// service said is kept as the server message.
    pub fn session_expired(status: u16, server_message: Option<String>) -> Self {
        Self {
            status: Some(status),
            server_message,
            ..Self::new(ErrorCode::SessionExpired, SESSION_EXPIRED_MESSAGE)
        }
    }

    /// Convenience constructor for [`ErrorCode::Rejected`].
    ///
    /// The message falls back to [`GENERIC_FAILURE_MESSAGE`] when the
    /// service did not explain itself.
    pub fn rejected(status: u16, server_message: Option<String>) -> Self {
        let message = server_message
            .clone()
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned());
        Self {
            code: ErrorCode::Rejected,
            message,
            status: Some(status),
            server_message,
        }
    }

    /// Convenience constructor for [`ErrorCode::Transport`].
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Transport, message)
    }

    /// Convenience constructor for [`ErrorCode::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Decode, message)
    }

    /// Convenience constructor for [`ErrorCode::Storage`].
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Storage, message)
    }

    /// Server-provided message, or `fallback` when there is none.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::Error;
    ///
    /// let err = Error::transport("connection refused");
    /// assert_eq!(err.server_message_or("Registration failed"), "Registration failed");
    /// ```
    pub fn server_message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.server_message().unwrap_or(fallback)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {status})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for Error {}
