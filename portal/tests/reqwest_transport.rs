//! Wire-level coverage for the reqwest transport.
//!
//! These tests run the real adapter against an Actix server on a loopback
//! socket so header, body and status handling are exercised end to end.

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::header;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use portal::client::{ApiClient, PortalApi};
use portal::domain::ports::{
    ApiRequest, CredentialStore, HttpTransport, InMemoryCredentialStore, RecordingNavigator,
    RecordingNotifier,
};
use portal::domain::{ErrorCode, LoginCredentials, ResidencyId, Route, SessionToken};
use portal::outbound::ReqwestTransport;
use portal::session::SessionContext;
use rstest::rstest;
use serde_json::{Value, json};
use url::Url;
use uuid::Uuid;

const GOOD_TOKEN: &str = "good.token";

fn header_value(req: &HttpRequest, name: header::HeaderName) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
}

async fn echo(req: HttpRequest, body: Option<web::Json<Value>>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "method": req.method().as_str(),
        "path": req.path(),
        "authorization": header_value(&req, header::AUTHORIZATION),
        "trace_id": header_value(&req, header::HeaderName::from_static("x-trace-id")),
        "body": body.map(web::Json::into_inner),
    }))
}

async fn residency(req: HttpRequest, id: web::Path<String>) -> HttpResponse {
    let expected = format!("Bearer {GOOD_TOKEN}");
    match header_value(&req, header::AUTHORIZATION) {
        Some(value) if value == expected => HttpResponse::Ok().json(json!({
            "_id": id.into_inner(),
            "Residency-Type": "Public University Residency",
            "City": "Cairo",
            "Residency": "Hall A",
            "Address": "1 Nile St",
            "Telephone": "123",
        })),
        Some(_) => HttpResponse::Unauthorized().json(json!({ "message": "Invalid token" })),
        None => HttpResponse::Forbidden().json(json!({ "message": "No token provided" })),
    }
}

async fn wrong_password() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "message": "Invalid username or password" }))
}

async fn conflict() -> HttpResponse {
    HttpResponse::Conflict().json(json!({ "message": "Already applied" }))
}

async fn spawn_server() -> (Url, ServerHandle) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
    let addr = listener.local_addr().expect("local addr");
    let server = HttpServer::new(|| {
        App::new().service(
            web::scope("/api")
                .route("/echo", web::get().to(echo))
                .route("/echo", web::post().to(echo))
                .route("/auth/login", web::post().to(wrong_password))
                .route("/residencies/apply", web::post().to(conflict))
                .route("/residencies/{id}", web::get().to(residency)),
        )
    })
    .disable_signals()
    .workers(1)
    .listen(listener)
    .expect("listen")
    .run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    let base = Url::parse(&format!("http://{addr}/api")).expect("base url");
    (base, handle)
}

struct Wired {
    store: Arc<InMemoryCredentialStore>,
    navigator: Arc<RecordingNavigator>,
    client: ApiClient,
}

fn wire(base: Url, token: Option<&str>) -> Wired {
    let transport = ReqwestTransport::new(base, Duration::from_secs(5)).expect("transport");
    let store = Arc::new(match token {
        Some(raw) => InMemoryCredentialStore::with_token(SessionToken::new(raw).expect("token")),
        None => InMemoryCredentialStore::new(),
    });
    let navigator = Arc::new(RecordingNavigator::new());
    let session = SessionContext::new(
        store.clone(),
        navigator.clone(),
        Arc::new(RecordingNotifier::new()),
    );
    let client = ApiClient::with_session(Arc::new(transport), &session);
    Wired {
        store,
        navigator,
        client,
    }
}

fn residency_id(raw: &str) -> ResidencyId {
    ResidencyId::new(raw).expect("residency id")
}

#[rstest]
#[actix_web::test]
async fn stored_token_travels_as_a_bearer_header() {
    let (base, server) = spawn_server().await;
    let wired = wire(base, Some(GOOD_TOKEN));

    let echoed: Value = wired
        .client
        .send_json(ApiRequest::get(["echo"]))
        .await
        .expect("echo");

    assert_eq!(echoed["authorization"], json!(format!("Bearer {GOOD_TOKEN}")));
    assert_eq!(echoed["method"], json!("GET"));
    assert_eq!(echoed["path"], json!("/api/echo"));
    let trace = echoed["trace_id"].as_str().expect("trace header");
    assert!(Uuid::parse_str(trace).is_ok());
    server.stop(true).await;
}

#[rstest]
#[actix_web::test]
async fn anonymous_requests_carry_no_authorization() {
    let (base, server) = spawn_server().await;
    let wired = wire(base, None);

    let echoed: Value = wired
        .client
        .send_json(ApiRequest::post(["echo"], json!({ "username": "amira" })))
        .await
        .expect("echo");

    assert_eq!(echoed["authorization"], Value::Null);
    assert_eq!(echoed["body"], json!({ "username": "amira" }));
    server.stop(true).await;
}

#[rstest]
#[case::unauthorized(Some("stale.token"))]
#[case::forbidden(None)]
#[actix_web::test]
async fn rejected_credentials_expire_the_session(#[case] token: Option<&str>) {
    let (base, server) = spawn_server().await;
    let wired = wire(base, token);
    let api = PortalApi::new(wired.client.clone());

    let error = api
        .get_residency(&residency_id("h1"))
        .await
        .expect_err("expired");

    assert_eq!(error.code(), ErrorCode::SessionExpired);
    assert_eq!(wired.store.load(), Ok(None));
    assert_eq!(wired.navigator.current(), Some(Route::Entry));
    server.stop(true).await;
}

#[rstest]
#[actix_web::test]
async fn login_rejection_keeps_the_service_explanation() {
    let (base, server) = spawn_server().await;
    let wired = wire(base, None);
    let api = PortalApi::new(wired.client.clone());
    let credentials = LoginCredentials::try_from_parts("amira", "wrong").expect("credentials");

    let error = api.login(&credentials).await.expect_err("wrong password");

    assert_eq!(error.code(), ErrorCode::SessionExpired);
    assert_eq!(error.status(), Some(401));
    assert_eq!(error.server_message(), Some("Invalid username or password"));
    assert_eq!(wired.navigator.current(), Some(Route::Entry));
    server.stop(true).await;
}

#[rstest]
#[actix_web::test]
async fn other_error_statuses_keep_the_credential() {
    let (base, server) = spawn_server().await;
    let wired = wire(base, Some(GOOD_TOKEN));
    let api = PortalApi::new(wired.client.clone());
    let draft = portal::domain::ApplicationDraft::for_residency(&residency_id("h1"));

    let error = api.apply(&draft).await.expect_err("conflict");

    assert_eq!(error.status(), Some(409));
    assert_eq!(error.server_message(), Some("Already applied"));
    assert!(wired.store.load().expect("load").is_some());
    assert_eq!(wired.navigator.current(), None);
    server.stop(true).await;
}

#[rstest]
#[actix_web::test]
async fn repeated_lookups_return_the_same_record() {
    let (base, server) = spawn_server().await;
    let api = PortalApi::new(wire(base, Some(GOOD_TOKEN)).client);

    let first = api.get_residency(&residency_id("h1")).await.expect("first");
    let second = api.get_residency(&residency_id("h1")).await.expect("second");

    assert_eq!(first, second);
    assert_eq!(first.name, "Hall A");
    server.stop(true).await;
}

#[rstest]
#[actix_web::test]
async fn unreachable_service_is_a_transport_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        listener.local_addr().expect("local addr")
    };
    let base = Url::parse(&format!("http://{addr}/api")).expect("base url");
    let transport = ReqwestTransport::new(base, Duration::from_secs(2)).expect("transport");

    let error = transport
        .send(&ApiRequest::get(["residencies"]))
        .await
        .expect_err("nothing listening");

    assert_eq!(error.kind(), "connect");
}
