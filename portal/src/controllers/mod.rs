//! View controllers.
//!
//! Purpose: hold the form and list state behind each page and turn user
//! actions into typed API calls. Every operation surfaces a success or
//! failure notice, mutates local state only on success and hands the
//! error back to its caller. A `SessionExpired` error is never reported
//! twice; the session hook already told the user.

pub mod admin;
pub mod layout;
pub mod login;
pub mod registration;
pub mod student;

pub use admin::AdminDashboard;
pub use layout::LayoutDashboard;
pub use login::LoginController;
pub use registration::RegistrationController;
pub use student::StudentDashboard;

use crate::client::PortalApi;
use crate::domain::{ApiResult, Error, Residency, ResidencyId};
use crate::session::SessionContext;

pub(crate) const EMPTY_SEARCH_MESSAGE: &str = "Please enter a residency ID";
pub(crate) const FOUND_MESSAGE: &str = "Residency found";
pub(crate) const NOT_FOUND_MESSAGE: &str = "Residency not found";
pub(crate) const FETCH_RESIDENCIES_FAILED: &str = "Failed to fetch residencies";

/// Look up one residency by the raw text typed into a search box.
///
/// Blank input is rejected locally without a request.
pub(crate) async fn search_residency(
    api: &PortalApi,
    session: &SessionContext,
    raw_id: &str,
) -> ApiResult<Residency> {
    let Ok(id) = ResidencyId::new(raw_id) else {
        session.error(EMPTY_SEARCH_MESSAGE);
        return Err(Error::invalid_request(EMPTY_SEARCH_MESSAGE));
    };
    match api.get_residency(&id).await {
        Ok(residency) => {
            session.success(FOUND_MESSAGE);
            Ok(residency)
        }
        Err(error) => {
            session.report(&error, NOT_FOUND_MESSAGE);
            Err(error)
        }
    }
}

/// Surface a local validation failure and convert it into [`Error`].
pub(crate) fn reject_locally(session: &SessionContext, error: &impl std::fmt::Display) -> Error {
    let message = error.to_string();
    session.error(message.as_str());
    Error::invalid_request(message)
}

#[cfg(test)]
pub(crate) mod test_harness {
    //! Shared wiring for controller tests.
    use std::sync::Arc;

    use crate::client::{ApiClient, PortalApi};
    use crate::domain::ports::{InMemoryCredentialStore, RecordingNavigator, RecordingNotifier};
    use crate::session::SessionContext;
    use crate::test_support::FakePortalService;

    pub(crate) struct Harness {
        pub(crate) service: Arc<FakePortalService>,
        pub(crate) store: Arc<InMemoryCredentialStore>,
        pub(crate) navigator: Arc<RecordingNavigator>,
        pub(crate) notifier: Arc<RecordingNotifier>,
        pub(crate) session: SessionContext,
        pub(crate) api: PortalApi,
    }

    pub(crate) fn harness(fake: FakePortalService) -> Harness {
        let service = Arc::new(fake);
        let store = Arc::new(InMemoryCredentialStore::new());
        let navigator = Arc::new(RecordingNavigator::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let session = SessionContext::new(store.clone(), navigator.clone(), notifier.clone());
        let api = PortalApi::new(ApiClient::with_session(service.clone(), &session));
        Harness {
            service,
            store,
            navigator,
            notifier,
            session,
            api,
        }
    }
}
