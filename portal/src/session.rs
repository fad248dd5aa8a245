//! Session helpers shared by the hook chain and the controllers.
//!
//! Wraps the credential store, the navigator and the notifier so callers
//! deal in session-level operations (persist the token, expire the session,
//! log out) instead of three separate ports.

use std::sync::Arc;

use crate::domain::ports::{CredentialStore, Navigator, Notifier};
use crate::domain::{Error, Notice, Route, SESSION_EXPIRED_MESSAGE, SessionToken};

/// Injectable session state.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
}

impl SessionContext {
    /// Bundle the session ports.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            navigator,
            notifier,
        }
    }

    /// Credential store backing this session.
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Stored token, if any.
    pub fn token(&self) -> Result<Option<SessionToken>, Error> {
        self.store
            .load()
            .map_err(|error| Error::storage(format!("failed to read credential: {error}")))
    }

    /// Persist a freshly issued token.
    pub fn persist_token(&self, token: &SessionToken) -> Result<(), Error> {
        self.store
            .save(token)
            .map_err(|error| Error::storage(format!("failed to persist credential: {error}")))
    }

    /// Tear the session down after the service rejected the credential.
    ///
    /// A failure to clear the store is logged; the redirect and notice
    /// still happen.
    pub fn expire(&self) {
        if let Err(error) = self.store.clear() {
            tracing::warn!(kind = error.kind(), %error, "failed to clear rejected credential");
        }
        self.navigator.navigate(Route::Entry);
        self.notifier.notify(Notice::error(SESSION_EXPIRED_MESSAGE));
    }

    /// Clear the credential and return to the entry page.
    pub fn logout(&self) -> Result<(), Error> {
        self.store
            .clear()
            .map_err(|error| Error::storage(format!("failed to clear credential: {error}")))?;
        self.navigator.navigate(Route::Entry);
        Ok(())
    }

    /// Navigate to `route`.
    pub fn navigate(&self, route: Route) {
        self.navigator.navigate(route);
    }

    /// Surface a success notice.
    pub fn success(&self, message: impl Into<String>) {
        self.notifier.notify(Notice::success(message));
    }

    /// Surface an error notice.
    pub fn error(&self, message: impl Into<String>) {
        self.notifier.notify(Notice::error(message));
    }

    /// Surface an error notice unless the session hook already reported
    /// the failure.
    pub fn report(&self, error: &Error, message: impl Into<String>) {
        if !error.is_session_expired() {
            self.error(message);
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        CredentialStoreError, InMemoryCredentialStore, MockCredentialStore, RecordingNavigator,
        RecordingNotifier,
    };
    use crate::domain::NoticeLevel;
    use rstest::{fixture, rstest};

    struct Harness {
        store: Arc<InMemoryCredentialStore>,
        navigator: Arc<RecordingNavigator>,
        notifier: Arc<RecordingNotifier>,
        session: SessionContext,
    }

    #[fixture]
    fn harness() -> Harness {
        let store = Arc::new(InMemoryCredentialStore::with_token(
            SessionToken::new("abc").expect("token"),
        ));
        let navigator = Arc::new(RecordingNavigator::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let session = SessionContext::new(store.clone(), navigator.clone(), notifier.clone());
        Harness {
            store,
            navigator,
            notifier,
            session,
        }
    }

    #[rstest]
    fn expire_clears_redirects_and_notifies(harness: Harness) {
        harness.session.expire();

        assert_eq!(harness.store.load(), Ok(None));
        assert_eq!(harness.navigator.current(), Some(Route::Entry));
        assert_eq!(
            harness.notifier.last(),
            Some(Notice::error(SESSION_EXPIRED_MESSAGE))
        );
    }

    #[rstest]
    fn expire_still_redirects_when_clear_fails() {
        let mut store = MockCredentialStore::new();
        store
            .expect_clear()
            .times(1)
            .return_once(|| Err(CredentialStoreError::unavailable("disk gone")));
        let navigator = Arc::new(RecordingNavigator::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let session = SessionContext::new(Arc::new(store), navigator.clone(), notifier.clone());

        session.expire();

        assert_eq!(navigator.current(), Some(Route::Entry));
        assert_eq!(notifier.notices().len(), 1);
    }

    #[rstest]
    fn logout_clears_and_navigates_without_notice(harness: Harness) {
        harness.session.logout().expect("logout");

        assert_eq!(harness.store.load(), Ok(None));
        assert_eq!(harness.navigator.current(), Some(Route::Entry));
        assert!(harness.notifier.notices().is_empty());
    }

    #[rstest]
    fn report_stays_quiet_for_expired_sessions(harness: Harness) {
        harness
            .session
            .report(&Error::session_expired(401, None), "Failed to fetch residencies");
        harness
            .session
            .report(&Error::transport("refused"), "Failed to fetch residencies");

        let notices = harness.notifier.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
    }
}
