//! Session-aware HTTP client.
//!
//! Purpose: the single request-issuing surface every controller uses. Each
//! exchange runs the request hooks, the transport and the response hooks in
//! order, then maps non-success statuses into [`Error::rejected`].
//!
//! Public surface:
//! - ApiClient: hook chain around an [`HttpTransport`].
//! - PortalApi: typed residency service operations built on ApiClient.

mod resources;

pub use resources::{Acknowledgement, PortalApi};

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::ports::{ApiRequest, ApiResponse, HttpTransport, TransportError};
use crate::domain::{ApiResult, Error, TraceId};
use crate::middleware::{BearerAuth, HookFlow, RequestHook, ResponseHook, SessionExpiry, Trace};
use crate::session::SessionContext;

/// Hook chain around one transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    request_hooks: Vec<Arc<dyn RequestHook>>,
    response_hooks: Vec<Arc<dyn ResponseHook>>,
}

impl ApiClient {
    /// Client with no hooks; requests go out exactly as built.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            request_hooks: Vec::new(),
            response_hooks: Vec::new(),
        }
    }

    /// Client with the standard chain: trace id, then bearer credential on
    /// the way out; session expiry on the way back.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use portal::client::ApiClient;
    /// use portal::domain::ports::{InMemoryCredentialStore, RecordingNavigator, RecordingNotifier};
    /// use portal::session::SessionContext;
    /// use portal::test_support::FakePortalService;
    ///
    /// let session = SessionContext::new(
    ///     Arc::new(InMemoryCredentialStore::new()),
    ///     Arc::new(RecordingNavigator::new()),
    ///     Arc::new(RecordingNotifier::new()),
    /// );
    /// let _client = ApiClient::with_session(Arc::new(FakePortalService::new()), &session);
    /// ```
    pub fn with_session(transport: Arc<dyn HttpTransport>, session: &SessionContext) -> Self {
        Self::new(transport)
            .with_request_hook(Trace)
            .with_request_hook(BearerAuth::new(Arc::clone(session.store())))
            .with_response_hook(SessionExpiry::new(session.clone()))
    }

    /// Append a request hook; hooks run in insertion order.
    #[must_use]
    pub fn with_request_hook(mut self, hook: impl RequestHook + 'static) -> Self {
        self.request_hooks.push(Arc::new(hook));
        self
    }

    /// Append a response hook; hooks run in insertion order.
    #[must_use]
    pub fn with_response_hook(mut self, hook: impl ResponseHook + 'static) -> Self {
        self.response_hooks.push(Arc::new(hook));
        self
    }

    /// Run one exchange through the hook chain.
    ///
    /// # Errors
    ///
    /// - whatever a halting hook returns (e.g. [`Error::session_expired`]);
    /// - [`Error::transport`] when no response was received;
    /// - [`Error::rejected`] for any other non-success status.
    pub async fn send(&self, request: ApiRequest) -> ApiResult<ApiResponse> {
        let trace_id = TraceId::current().unwrap_or_else(TraceId::generate);
        TraceId::scope(trace_id, self.exchange(request)).await
    }

    /// Run one exchange and decode the success body as `T`.
    ///
    /// # Errors
    ///
    /// As [`ApiClient::send`], plus [`Error::decode`] when the body does
    /// not match `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let path = request.path();
        let response = self.send(request).await?;
        response
            .decode()
            .map_err(|error| Error::decode(format!("invalid response body for {path}: {error}")))
    }

    async fn exchange(&self, mut request: ApiRequest) -> ApiResult<ApiResponse> {
        for hook in &self.request_hooks {
            if let HookFlow::Halt(error) = hook.on_request(&mut request) {
                return Err(error);
            }
        }

        debug!(
            trace_id = ?TraceId::current().map(|id| id.to_string()),
            method = %request.method,
            path = %request.path(),
            "sending request"
        );
        let response = self
            .transport
            .send(&request)
            .await
            .map_err(map_transport_error)?;
        debug!(
            method = %request.method,
            path = %request.path(),
            status = response.status,
            bytes = response.body.len(),
            "received response"
        );

        for hook in &self.response_hooks {
            if let HookFlow::Halt(error) = hook.on_response(&request, &response) {
                return Err(error);
            }
        }

        if response.is_success() {
            Ok(response)
        } else {
            Err(Error::rejected(response.status, response.message()))
        }
    }
}

fn map_transport_error(error: TransportError) -> Error {
    debug!(kind = error.kind(), %error, "exchange produced no response");
    Error::transport(error.to_string())
}

#[cfg(test)]
mod tests;
