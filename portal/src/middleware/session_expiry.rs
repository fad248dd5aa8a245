//! Session expiry hook.
//!
//! A 401 or 403 means the service no longer accepts the stored credential.
//! The hook tears the session down (clear, redirect, notice) and halts the
//! chain so the calling controller stays quiet.

use tracing::warn;

use super::{HookFlow, ResponseHook};
use crate::domain::Error;
use crate::domain::ports::{ApiRequest, ApiResponse};
use crate::session::SessionContext;

/// Statuses that invalidate the session.
pub const EXPIRY_STATUSES: [u16; 2] = [401, 403];

/// Response hook that expires the session on authentication failures.
#[derive(Clone)]
pub struct SessionExpiry {
    session: SessionContext,
}

impl SessionExpiry {
    /// Hook acting on `session`.
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }
}

impl ResponseHook for SessionExpiry {
    fn on_response(&self, request: &ApiRequest, response: &ApiResponse) -> HookFlow {
        if !EXPIRY_STATUSES.contains(&response.status) {
            return HookFlow::Continue;
        }
        warn!(
            status = response.status,
            method = %request.method,
            path = %request.path(),
            "credential rejected; expiring session"
        );
        self.session.expire();
        HookFlow::Halt(Error::session_expired(response.status, response.message()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{
        CredentialStore, InMemoryCredentialStore, MockNavigator, MockNotifier,
        RecordingNavigator, RecordingNotifier,
    };
    use crate::domain::{Notice, Route, SESSION_EXPIRED_MESSAGE, SessionToken};
    use rstest::rstest;

    fn seeded_store() -> Arc<InMemoryCredentialStore> {
        Arc::new(InMemoryCredentialStore::with_token(
            SessionToken::new("abc").expect("token"),
        ))
    }

    #[rstest]
    #[case(401)]
    #[case(403)]
    fn rejected_credential_expires_session(#[case] status: u16) {
        let store = seeded_store();
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .withf(|route| *route == Route::Entry)
            .times(1)
            .return_const(());
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|notice| *notice == Notice::error(SESSION_EXPIRED_MESSAGE))
            .times(1)
            .return_const(());
        let hook = SessionExpiry::new(SessionContext::new(
            store.clone(),
            Arc::new(navigator),
            Arc::new(notifier),
        ));

        let flow = hook.on_response(
            &ApiRequest::get(["residencies"]),
            &ApiResponse::empty(status),
        );

        assert_eq!(flow, HookFlow::Halt(Error::session_expired(status, None)));
        assert_eq!(store.load(), Ok(None));
    }

    #[rstest]
    fn expiry_error_keeps_the_response_message() {
        let hook = SessionExpiry::new(SessionContext::new(
            seeded_store(),
            Arc::new(RecordingNavigator::new()),
            Arc::new(RecordingNotifier::new()),
        ));
        let response = ApiResponse::json(
            401,
            &serde_json::json!({ "message": "Invalid username or password" }),
        );

        let HookFlow::Halt(error) = hook.on_response(&ApiRequest::get(["auth", "login"]), &response)
        else {
            panic!("401 must halt the chain");
        };

        assert!(error.is_session_expired());
        assert_eq!(error.server_message(), Some("Invalid username or password"));
    }

    #[rstest]
    #[case(200)]
    #[case(400)]
    #[case(404)]
    #[case(500)]
    fn other_statuses_leave_session_alone(#[case] status: u16) {
        let store = seeded_store();
        let navigator = Arc::new(RecordingNavigator::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let hook = SessionExpiry::new(SessionContext::new(
            store.clone(),
            navigator.clone(),
            notifier.clone(),
        ));

        let flow = hook.on_response(
            &ApiRequest::get(["residencies"]),
            &ApiResponse::empty(status),
        );

        assert_eq!(flow, HookFlow::Continue);
        assert!(store.load().expect("load").is_some());
        assert_eq!(navigator.current(), None);
        assert!(notifier.notices().is_empty());
    }
}
