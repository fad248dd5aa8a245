//! Driven port for the persisted session credential.
//!
//! The credential lives in a key/value store under [`TOKEN_KEY`]. The
//! session hooks read it before every request and clear it when the service
//! rejects it, so adapters must tolerate interleaved loads and clears.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::define_port_error;
use crate::domain::SessionToken;

/// Fixed storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";

define_port_error! {
    /// Errors surfaced by credential storage adapters.
    pub enum CredentialStoreError {
        /// The backing storage could not be reached.
        Unavailable { message: String } =>
            "credential store unavailable: {message}",
        /// The stored data could not be interpreted.
        Corrupt { message: String } =>
            "credential store is corrupt: {message}",
    }
}

/// Port for reading, writing and clearing the session credential.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Current token, if one is stored.
    fn load(&self) -> Result<Option<SessionToken>, CredentialStoreError>;

    /// Store `token`, replacing any previous value.
    fn save(&self, token: &SessionToken) -> Result<(), CredentialStoreError>;

    /// Remove the stored token. Clearing an empty store succeeds.
    fn clear(&self) -> Result<(), CredentialStoreError>;
}

/// Process-local store used by tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    slot: Mutex<Option<SessionToken>>,
}

impl InMemoryCredentialStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `token`.
    pub fn with_token(token: SessionToken) -> Self {
        Self {
            slot: Mutex::new(Some(token)),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<SessionToken>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<Option<SessionToken>, CredentialStoreError> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &SessionToken) -> Result<(), CredentialStoreError> {
        *self.slot() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        self.slot().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn token(raw: &str) -> SessionToken {
        SessionToken::new(raw).expect("token")
    }

    #[rstest]
    fn save_then_load_round_trips() {
        let store = InMemoryCredentialStore::new();
        assert_eq!(store.load(), Ok(None));

        store.save(&token("abc")).expect("save");
        assert_eq!(store.load(), Ok(Some(token("abc"))));
    }

    #[rstest]
    fn clear_is_idempotent() {
        let store = InMemoryCredentialStore::with_token(token("abc"));
        store.clear().expect("first clear");
        store.clear().expect("second clear");
        assert_eq!(store.load(), Ok(None));
    }
}
