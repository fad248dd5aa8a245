//! Authentication primitives: login credentials and the session token.
//!
//! The portal never issues or verifies credentials. It validates the shape
//! of what the user typed, carries the bearer token the service hands back
//! and may peek at the token's claims to pick a landing page.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use zeroize::Zeroizing;

use super::Role;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials sent to `POST /auth/login`.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace.
///
/// # Examples
/// ```
/// use portal::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" amira ", "hunter2").unwrap();
/// assert_eq!(creds.username(), "amira");
/// assert_eq!(creds.password(), "hunter2");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Error returned when a bearer token is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("session token must not be empty")]
pub struct EmptyTokenError;

/// Opaque bearer credential issued by the service.
///
/// The raw value is zeroized on drop and redacted from `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(Zeroizing<String>);

impl SessionToken {
    /// Wrap a raw token, rejecting blank input.
    pub fn new(raw: impl Into<String>) -> Result<Self, EmptyTokenError> {
        let owned: String = raw.into();
        let trimmed = owned.trim();
        if trimmed.is_empty() {
            return Err(EmptyTokenError);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Raw token text, as stored and as sent after `Bearer `.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Value for the `Authorization` header.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::SessionToken;
    ///
    /// let token = SessionToken::new("abc.def.ghi").unwrap();
    /// assert_eq!(token.bearer_value(), "Bearer abc.def.ghi");
    /// ```
    pub fn bearer_value(&self) -> String {
        format!("Bearer {}", self.expose())
    }

    /// Decode the JWT payload without verifying the signature.
    ///
    /// Returns `None` for tokens that are not three-part JWTs or whose
    /// payload is not the expected JSON object.
    pub fn claims(&self) -> Option<TokenClaims> {
        let mut parts = self.expose().split('.');
        let (Some(_header), Some(payload), Some(_signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return None;
        };
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        serde_json::from_slice(&bytes).ok()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Subset of the token payload the portal cares about.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    /// Account the token was issued to.
    #[serde(default)]
    pub username: Option<String>,
    /// Role granted to the account.
    #[serde(default)]
    pub role: Option<Role>,
    /// Expiry as seconds since the Unix epoch.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Expiry instant, when the token declares one.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}
