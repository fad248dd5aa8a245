//! Shared wiring for portal integration tests.
//!
//! Integration tests compile as separate crates, so the in-memory service,
//! session ports and typed API are assembled here once.

use std::sync::Arc;

use portal::client::{ApiClient, PortalApi};
use portal::domain::SessionToken;
use portal::domain::ports::{InMemoryCredentialStore, RecordingNavigator, RecordingNotifier};
use portal::session::SessionContext;
use portal::test_support::FakePortalService;

/// Fake service plus the recording session ports it is wired to.
pub struct Portal {
    pub service: Arc<FakePortalService>,
    pub store: Arc<InMemoryCredentialStore>,
    pub navigator: Arc<RecordingNavigator>,
    pub notifier: Arc<RecordingNotifier>,
    pub session: SessionContext,
    pub api: PortalApi,
}

/// Wire `fake` behind the standard hook chain, optionally logged in.
pub fn portal(fake: FakePortalService, token: Option<&str>) -> Portal {
    let service = Arc::new(fake);
    let store = Arc::new(match token {
        Some(raw) => InMemoryCredentialStore::with_token(SessionToken::new(raw).expect("token")),
        None => InMemoryCredentialStore::new(),
    });
    let navigator = Arc::new(RecordingNavigator::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let session = SessionContext::new(store.clone(), navigator.clone(), notifier.clone());
    let api = PortalApi::new(ApiClient::with_session(service.clone(), &session));
    Portal {
        service,
        store,
        navigator,
        notifier,
        session,
        api,
    }
}
