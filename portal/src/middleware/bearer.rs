//! Bearer credential hook.
//!
//! Attaches `Authorization: Bearer <token>` when the credential store holds
//! a token. A missing token, or a store that cannot be read, never blocks
//! the request; the service decides whether it needed one.

use std::sync::Arc;

use tracing::warn;

use super::{HookFlow, RequestHook};
use crate::domain::ports::{ApiRequest, CredentialStore};

/// Name of the header carrying the credential.
pub const AUTHORIZATION: &str = "authorization";

/// Request hook that injects the stored bearer token.
#[derive(Clone)]
pub struct BearerAuth {
    store: Arc<dyn CredentialStore>,
}

impl BearerAuth {
    /// Hook reading from `store`.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

impl RequestHook for BearerAuth {
    fn on_request(&self, request: &mut ApiRequest) -> HookFlow {
        match self.store.load() {
            Ok(Some(token)) => request.set_header(AUTHORIZATION, token.bearer_value()),
            Ok(None) => {}
            Err(error) => {
                warn!(
                    kind = error.kind(),
                    %error,
                    path = %request.path(),
                    "credential store unreadable; sending request without credential"
                );
            }
        }
        HookFlow::Continue
    }
}
