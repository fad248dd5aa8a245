//! Request and response hooks.
//!
//! Purpose: define the ordered hook chain the client runs around every
//! exchange. Request hooks decorate the outgoing request; response hooks
//! inspect the answer. Any hook may halt the chain with an [`Error`].

pub mod bearer;
pub mod session_expiry;
pub mod trace;

pub use bearer::BearerAuth;
pub use session_expiry::SessionExpiry;
pub use trace::Trace;

use crate::domain::Error;
use crate::domain::ports::{ApiRequest, ApiResponse};

/// Outcome of running one hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookFlow {
    /// Hand over to the next hook.
    Continue,
    /// Stop the chain and fail the exchange.
    Halt(Error),
}

/// Hook run before a request is sent.
#[cfg_attr(test, mockall::automock)]
pub trait RequestHook: Send + Sync {
    /// Inspect or decorate `request`.
    fn on_request(&self, request: &mut ApiRequest) -> HookFlow;
}

/// Hook run after a response is received.
#[cfg_attr(test, mockall::automock)]
pub trait ResponseHook: Send + Sync {
    /// Inspect `response` to `request`.
    fn on_response(&self, request: &ApiRequest, response: &ApiResponse) -> HookFlow;
}
