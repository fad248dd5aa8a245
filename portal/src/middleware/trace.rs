//! Trace identifier hook.
//!
//! Stamps each outgoing request with an `X-Trace-Id` header so client and
//! service logs can be correlated. The identifier in scope (see
//! [`TraceId::scope`]) is reused; otherwise a fresh one is generated.

use super::{HookFlow, RequestHook};
use crate::domain::TraceId;
use crate::domain::ports::ApiRequest;

/// Name of the correlation header.
pub const TRACE_HEADER: &str = "x-trace-id";

/// Request hook adding the trace identifier header.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl RequestHook for Trace {
    fn on_request(&self, request: &mut ApiRequest) -> HookFlow {
        let trace_id = TraceId::current().unwrap_or_else(TraceId::generate);
        request.set_header(TRACE_HEADER, trace_id.to_string());
        HookFlow::Continue
    }
}
