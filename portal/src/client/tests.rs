//! Tests for the hook chain in [`ApiClient`].

use std::sync::Arc;

use rstest::{fixture, rstest};
use serde_json::json;

use super::*;
use crate::domain::ports::{
    CredentialStore, InMemoryCredentialStore, MockHttpTransport, RecordingNavigator,
    RecordingNotifier,
};
use crate::domain::{ErrorCode, GENERIC_FAILURE_MESSAGE, Route, SessionToken};
use crate::middleware::{MockRequestHook, MockResponseHook};

struct Session {
    store: Arc<InMemoryCredentialStore>,
    navigator: Arc<RecordingNavigator>,
    notifier: Arc<RecordingNotifier>,
    context: SessionContext,
}

#[fixture]
fn session() -> Session {
    let store = Arc::new(InMemoryCredentialStore::with_token(
        SessionToken::new("stored-token").expect("token"),
    ));
    let navigator = Arc::new(RecordingNavigator::new());
    let notifier = Arc::new(RecordingNotifier::new());
    let context = SessionContext::new(store.clone(), navigator.clone(), notifier.clone());
    Session {
        store,
        navigator,
        notifier,
        context,
    }
}

fn transport_answering(response: ApiResponse) -> MockHttpTransport {
    let mut transport = MockHttpTransport::new();
    transport
        .expect_send()
        .times(1)
        .return_once(move |_| Ok(response));
    transport
}

#[rstest]
#[tokio::test]
async fn request_hooks_run_in_order_before_sending() {
    let mut first = MockRequestHook::new();
    first.expect_on_request().times(1).returning(|request| {
        request.set_header("x-order", "first");
        HookFlow::Continue
    });
    let mut second = MockRequestHook::new();
    second.expect_on_request().times(1).returning(|request| {
        let seen = request.header("x-order").unwrap_or_default().to_owned();
        request.set_header("x-order", format!("{seen},second"));
        HookFlow::Continue
    });
    let mut transport = MockHttpTransport::new();
    transport
        .expect_send()
        .withf(|request| request.header("x-order") == Some("first,second"))
        .times(1)
        .return_once(|_| Ok(ApiResponse::empty(204)));

    let client = ApiClient::new(Arc::new(transport))
        .with_request_hook(first)
        .with_request_hook(second);

    client
        .send(ApiRequest::get(["residencies"]))
        .await
        .expect("exchange succeeds");
}

#[rstest]
#[tokio::test]
async fn halting_request_hook_skips_the_transport() {
    let mut hook = MockRequestHook::new();
    hook.expect_on_request()
        .times(1)
        .returning(|_| HookFlow::Halt(Error::invalid_request("blocked")));
    let mut transport = MockHttpTransport::new();
    transport.expect_send().never();

    let client = ApiClient::new(Arc::new(transport)).with_request_hook(hook);
    let err = client
        .send(ApiRequest::get(["residencies"]))
        .await
        .expect_err("hook halts");

    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn halting_response_hook_wins_over_status_mapping() {
    let mut hook = MockResponseHook::new();
    hook.expect_on_response()
        .times(1)
        .returning(|_, response| HookFlow::Halt(Error::session_expired(response.status, None)));

    let client = ApiClient::new(Arc::new(transport_answering(ApiResponse::empty(403))))
        .with_response_hook(hook);
    let err = client
        .send(ApiRequest::get(["reviews"]))
        .await
        .expect_err("hook halts");

    assert_eq!(err, Error::session_expired(403, None));
}

#[rstest]
#[tokio::test]
async fn standard_chain_attaches_bearer_and_trace_headers(session: Session) {
    let mut transport = MockHttpTransport::new();
    transport
        .expect_send()
        .withf(|request| {
            request.header("authorization") == Some("Bearer stored-token")
                && request.header("x-trace-id").is_some()
        })
        .times(1)
        .return_once(|_| Ok(ApiResponse::json(200, &json!([]))));

    let client = ApiClient::with_session(Arc::new(transport), &session.context);
    let listed: Vec<serde_json::Value> = client
        .send_json(ApiRequest::get(["residencies"]))
        .await
        .expect("exchange succeeds");

    assert!(listed.is_empty());
}

#[rstest]
#[case(401)]
#[case(403)]
#[tokio::test]
async fn auth_failures_expire_the_session(session: Session, #[case] status: u16) {
    let client = ApiClient::with_session(
        Arc::new(transport_answering(ApiResponse::json(
            status,
            &json!({"message": "jwt expired"}),
        ))),
        &session.context,
    );

    let err = client
        .send(ApiRequest::get(["residencies"]))
        .await
        .expect_err("session expired");

    assert!(err.is_session_expired());
    assert_eq!(session.store.load(), Ok(None));
    assert_eq!(session.navigator.current(), Some(Route::Entry));
    assert_eq!(session.notifier.notices().len(), 1);
}

#[rstest]
#[case(json!({"message": "Residency not found"}), "Residency not found")]
#[case(json!({"error": "boom"}), GENERIC_FAILURE_MESSAGE)]
#[tokio::test]
async fn other_failures_are_rejected_and_keep_the_credential(
    session: Session,
    #[case] body: serde_json::Value,
    #[case] expected_message: &str,
) {
    let client = ApiClient::with_session(
        Arc::new(transport_answering(ApiResponse::json(404, &body))),
        &session.context,
    );

    let err = client
        .send(ApiRequest::get(["residencies", "missing"]))
        .await
        .expect_err("rejected");

    assert_eq!(err.code(), ErrorCode::Rejected);
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message(), expected_message);
    assert!(session.store.load().expect("load").is_some());
    assert_eq!(session.navigator.current(), None);
    assert!(session.notifier.notices().is_empty());
}

#[rstest]
#[tokio::test]
async fn transport_failures_never_redirect(session: Session) {
    let mut transport = MockHttpTransport::new();
    transport
        .expect_send()
        .times(1)
        .return_once(|_| Err(TransportError::connect("connection refused")));

    let client = ApiClient::with_session(Arc::new(transport), &session.context);
    let err = client
        .send(ApiRequest::get(["residencies"]))
        .await
        .expect_err("transport failure");

    assert_eq!(err.code(), ErrorCode::Transport);
    assert!(session.store.load().expect("load").is_some());
    assert_eq!(session.navigator.current(), None);
}

#[rstest]
#[tokio::test]
async fn undecodable_success_bodies_are_decode_errors() {
    let client = ApiClient::new(Arc::new(transport_answering(ApiResponse {
        status: 200,
        body: b"not json".to_vec(),
    })));

    let err = client
        .send_json::<Vec<serde_json::Value>>(ApiRequest::get(["reviews"]))
        .await
        .expect_err("decode failure");

    assert_eq!(err.code(), ErrorCode::Decode);
}
