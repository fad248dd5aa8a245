//! Test utilities for the portal crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`),
//! which reach it through the `test-support` feature.
//!
//! [`FakePortalService`] implements [`HttpTransport`] by routing requests
//! to in-memory collections, the way the real service would answer them.
//! It records every request so tests can assert on paths, headers and
//! bodies, and it can be told to fail the next exchange.

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! File access goes through `cap_std::fs::Dir` so test suites follow the
    //! same policy as the credential store.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Read a UTF-8 text file through `cap_std`.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures.
    pub fn read_file_to_string(path: &Path) -> io::Result<String> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.read_to_string(Path::new(&file_name))
    }

    /// Write bytes to a file through `cap_std`.
    ///
    /// # Errors
    ///
    /// Propagates I/O failures.
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "path must include a file name")
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};

use crate::domain::ports::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, TransportError};
use crate::domain::{
    Application, ApplicationId, ApplicationStatus, Block, BlockId, DEFAULT_DISEASE_STATUS,
    Residency, ResidencyId, Review, ReviewId, Role, Room, RoomId,
};

/// Username the fake attributes reviews and applications to.
pub const FAKE_USERNAME: &str = "student";

enum Scripted {
    Respond(ApiResponse),
    Drop,
}

#[derive(Default)]
struct FakeState {
    residencies: Vec<Residency>,
    reviews: Vec<Review>,
    applications: Vec<Application>,
    blocks: Vec<Block>,
    rooms: Vec<Room>,
    usernames: Vec<String>,
    login_token: Option<String>,
    required_token: Option<String>,
    scripted: VecDeque<Scripted>,
    requests: Vec<ApiRequest>,
    next_id: u32,
}

impl FakeState {
    fn allocate_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }
}

/// In-memory residency service.
#[derive(Default)]
pub struct FakePortalService {
    state: Mutex<FakeState>,
}

impl FakePortalService {
    /// Service with no data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a residency.
    #[must_use]
    pub fn with_residency(self, residency: Residency) -> Self {
        self.state().residencies.push(residency);
        self
    }

    /// Seed a review.
    #[must_use]
    pub fn with_review(self, review: Review) -> Self {
        self.state().reviews.push(review);
        self
    }

    /// Seed an application.
    #[must_use]
    pub fn with_application(self, application: Application) -> Self {
        self.state().applications.push(application);
        self
    }

    /// Seed a block.
    #[must_use]
    pub fn with_block(self, block: Block) -> Self {
        self.state().blocks.push(block);
        self
    }

    /// Seed a room.
    #[must_use]
    pub fn with_room(self, room: Room) -> Self {
        self.state().rooms.push(room);
        self
    }

    /// Token handed out by `POST /auth/login`. Without one, logins fail
    /// with 401 the way the service rejects a wrong password.
    #[must_use]
    pub fn with_login_token(self, token: &str) -> Self {
        self.state().login_token = Some(token.to_owned());
        self
    }

    /// Answer 401 to any non-auth request not bearing `token`.
    #[must_use]
    pub fn requiring_token(self, token: &str) -> Self {
        self.state().required_token = Some(token.to_owned());
        self
    }

    /// Answer the next request with `status` and `body`.
    pub fn fail_next(&self, status: u16, body: Value) {
        self.state()
            .scripted
            .push_back(Scripted::Respond(ApiResponse::json(status, &body)));
    }

    /// Drop the next request without a response.
    pub fn fail_transport_next(&self) {
        self.state().scripted.push_back(Scripted::Drop);
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state().requests.clone()
    }

    /// Most recent request.
    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state().requests.last().cloned()
    }

    /// Requests matching `method` and `path`.
    pub fn requests_to(&self, method: HttpMethod, path: &str) -> Vec<ApiRequest> {
        self.state()
            .requests
            .iter()
            .filter(|request| request.method == method && request.path() == path)
            .cloned()
            .collect()
    }

    /// Residencies currently stored.
    pub fn residencies(&self) -> Vec<Residency> {
        self.state().residencies.clone()
    }

    /// Reviews currently stored.
    pub fn reviews(&self) -> Vec<Review> {
        self.state().reviews.clone()
    }

    /// Applications currently stored.
    pub fn applications(&self) -> Vec<Application> {
        self.state().applications.clone()
    }

    /// Blocks currently stored.
    pub fn blocks(&self) -> Vec<Block> {
        self.state().blocks.clone()
    }

    /// Rooms currently stored.
    pub fn rooms(&self) -> Vec<Room> {
        self.state().rooms.clone()
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl HttpTransport for FakePortalService {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut state = self.state();
        state.requests.push(request.clone());
        match state.scripted.pop_front() {
            Some(Scripted::Respond(response)) => return Ok(response),
            Some(Scripted::Drop) => return Err(TransportError::connect("connection reset")),
            None => {}
        }
        Ok(route(&mut state, request))
    }
}

fn route(state: &mut FakeState, request: &ApiRequest) -> ApiResponse {
    let segments: Vec<&str> = request.segments.iter().map(String::as_str).collect();
    if segments.first() != Some(&"auth") && !authorised(state, request) {
        return message(401, "Unauthorized");
    }
    match (request.method, segments.as_slice()) {
        (HttpMethod::Post, ["auth", "register"]) => register(state, request),
        (HttpMethod::Post, ["auth", "login"]) => match &state.login_token {
            Some(token) => ApiResponse::json(200, &json!({ "token": token })),
            None => message(401, "Invalid username or password"),
        },
        (HttpMethod::Get, ["residencies"]) => listed(&state.residencies),
        (HttpMethod::Post, ["residencies"]) => create_residency(state, request),
        (HttpMethod::Get, ["residencies", "applications"]) => listed(&state.applications),
        (HttpMethod::Get, ["residencies", "applications", id]) => found(
            state.applications.iter().find(|a| a.id.as_str() == *id),
            "Application",
        ),
        (HttpMethod::Delete, ["residencies", "applications", id]) => {
            remove(&mut state.applications, |a| a.id.as_str() == *id, "Application")
        }
        (HttpMethod::Post, ["residencies", "apply"]) => apply(state, request),
        (HttpMethod::Get, ["residencies", "blocks", id]) => {
            found(state.blocks.iter().find(|b| b.id.as_str() == *id), "Block")
        }
        (HttpMethod::Put, ["residencies", "blocks", id]) => merge(
            state.blocks.iter_mut().find(|b| b.id.as_str() == *id),
            request,
            "Block",
        ),
        (HttpMethod::Delete, ["residencies", "blocks", id]) => {
            remove(&mut state.blocks, |b| b.id.as_str() == *id, "Block")
        }
        (HttpMethod::Get, ["residencies", "rooms", id]) => {
            found(state.rooms.iter().find(|r| r.id.as_str() == *id), "Room")
        }
        (HttpMethod::Put, ["residencies", "rooms", id]) => merge(
            state.rooms.iter_mut().find(|r| r.id.as_str() == *id),
            request,
            "Room",
        ),
        (HttpMethod::Delete, ["residencies", "rooms", id]) => {
            remove(&mut state.rooms, |r| r.id.as_str() == *id, "Room")
        }
        (HttpMethod::Get, ["residencies", parent, "blocks"]) => {
            let blocks: Vec<&Block> = state
                .blocks
                .iter()
                .filter(|b| b.residency_id == *parent)
                .collect();
            listed(&blocks)
        }
        (HttpMethod::Post, ["residencies", parent, "blocks"]) => create_block(state, parent, request),
        (HttpMethod::Get, ["residencies", parent, "rooms"]) => {
            let rooms: Vec<&Room> = state
                .rooms
                .iter()
                .filter(|r| r.block_id == *parent)
                .collect();
            listed(&rooms)
        }
        (HttpMethod::Post, ["residencies", parent, "rooms"]) => create_room(state, parent, request),
        (HttpMethod::Get, ["residencies", id]) => found(
            state.residencies.iter().find(|r| r.id.as_str() == *id),
            "Residency",
        ),
        (HttpMethod::Put, ["residencies", id]) => merge(
            state.residencies.iter_mut().find(|r| r.id.as_str() == *id),
            request,
            "Residency",
        ),
        (HttpMethod::Delete, ["residencies", id]) => {
            remove(&mut state.residencies, |r| r.id.as_str() == *id, "Residency")
        }
        (HttpMethod::Get, ["reviews"]) => listed(&state.reviews),
        (HttpMethod::Post, ["reviews"]) => create_review(state, request),
        (HttpMethod::Get, ["reviews", id]) => {
            found(state.reviews.iter().find(|r| r.id.as_str() == *id), "Review")
        }
        (HttpMethod::Delete, ["reviews", id]) => {
            remove(&mut state.reviews, |r| r.id.as_str() == *id, "Review")
        }
        _ => message(404, "Not found"),
    }
}

fn authorised(state: &FakeState, request: &ApiRequest) -> bool {
    state.required_token.as_ref().is_none_or(|token| {
        request.header("authorization") == Some(format!("Bearer {token}").as_str())
    })
}

fn register(state: &mut FakeState, request: &ApiRequest) -> ApiResponse {
    let Some(username) = request
        .body
        .as_ref()
        .and_then(|body| body.get("username"))
        .and_then(Value::as_str)
    else {
        return message(400, "Username is required");
    };
    if state.usernames.iter().any(|known| known == username) {
        return message(400, "User already exists");
    }
    state.usernames.push(username.to_owned());
    message(201, "User registered successfully")
}

fn create_residency(state: &mut FakeState, request: &ApiRequest) -> ApiResponse {
    let id = state.allocate_id("res");
    match with_fields(request, [("_id", json!(id))]) {
        Ok(residency) => {
            state.residencies.push(residency);
            ApiResponse::json(
                201,
                &json!({ "message": "Residency added successfully", "residency_id": id }),
            )
        }
        Err(response) => response,
    }
}

fn create_block(state: &mut FakeState, residency_id: &str, request: &ApiRequest) -> ApiResponse {
    let id = state.allocate_id("blk");
    match with_fields(
        request,
        [("block_id", json!(id)), ("residency_id", json!(residency_id))],
    ) {
        Ok(block) => {
            state.blocks.push(block);
            ApiResponse::json(
                201,
                &json!({ "message": "Block created successfully", "block_id": id }),
            )
        }
        Err(response) => response,
    }
}

fn create_room(state: &mut FakeState, block_id: &str, request: &ApiRequest) -> ApiResponse {
    let id = state.allocate_id("room");
    match with_fields(
        request,
        [("room_id", json!(id)), ("block_id", json!(block_id))],
    ) {
        Ok(room) => {
            state.rooms.push(room);
            ApiResponse::json(
                201,
                &json!({ "message": "Room created successfully", "room_id": id }),
            )
        }
        Err(response) => response,
    }
}

fn apply(state: &mut FakeState, request: &ApiRequest) -> ApiResponse {
    let id = state.allocate_id("app");
    match with_fields(
        request,
        [
            ("_id", json!(id)),
            ("username", json!(FAKE_USERNAME)),
            ("status", json!("pending")),
        ],
    ) {
        Ok(application) => {
            state.applications.push(application);
            ApiResponse::json(
                201,
                &json!({ "message": "Application submitted", "application_id": id }),
            )
        }
        Err(response) => response,
    }
}

fn create_review(state: &mut FakeState, request: &ApiRequest) -> ApiResponse {
    let id = state.allocate_id("rev");
    match with_fields(
        request,
        [
            ("_id", json!(id)),
            ("username", json!(FAKE_USERNAME)),
            ("timestamp", json!(chrono::Utc::now().to_rfc3339())),
        ],
    ) {
        Ok(review) => {
            state.reviews.push(review);
            ApiResponse::json(
                201,
                &json!({ "message": "Review added successfully", "review_id": id }),
            )
        }
        Err(response) => response,
    }
}

/// Decode the request body as `T` after adding the server-assigned fields.
fn with_fields<T: DeserializeOwned, const N: usize>(
    request: &ApiRequest,
    fields: [(&str, Value); N],
) -> Result<T, ApiResponse> {
    let mut object = match &request.body {
        Some(Value::Object(object)) => object.clone(),
        _ => Map::new(),
    };
    for (key, value) in fields {
        object.insert(key.to_owned(), value);
    }
    serde_json::from_value(Value::Object(object))
        .map_err(|error| message(400, &format!("invalid body: {error}")))
}

/// Overlay the request body onto a stored record, keeping fields it omits.
fn merge<T: Serialize + DeserializeOwned>(
    slot: Option<&mut T>,
    request: &ApiRequest,
    noun: &str,
) -> ApiResponse {
    let Some(record) = slot else {
        return message(404, &format!("{noun} not found"));
    };
    let Ok(Value::Object(mut object)) = serde_json::to_value(&*record) else {
        return message(500, "stored record is not an object");
    };
    if let Some(Value::Object(changes)) = &request.body {
        for (key, value) in changes {
            object.insert(key.clone(), value.clone());
        }
    }
    match serde_json::from_value(Value::Object(object)) {
        Ok(updated) => {
            *record = updated;
            message(200, &format!("{noun} updated successfully"))
        }
        Err(error) => message(400, &format!("invalid body: {error}")),
    }
}

fn found<T: Serialize>(record: Option<&T>, noun: &str) -> ApiResponse {
    match record {
        Some(record) => ApiResponse::json(200, &json!(record)),
        None => message(404, &format!("{noun} not found")),
    }
}

fn remove<T>(records: &mut Vec<T>, matches: impl Fn(&T) -> bool, noun: &str) -> ApiResponse {
    let before = records.len();
    records.retain(|record| !matches(record));
    if records.len() == before {
        message(404, &format!("{noun} not found"))
    } else {
        message(200, &format!("{noun} deleted successfully"))
    }
}

fn listed<T: Serialize>(items: &[T]) -> ApiResponse {
    ApiResponse::json(200, &json!(items))
}

fn message(status: u16, text: &str) -> ApiResponse {
    ApiResponse::json(status, &json!({ "message": text }))
}

/// Residency fixture with the given id, city and name.
///
/// # Panics
///
/// Panics when `id` is blank.
#[expect(clippy::expect_used, reason = "fixture ids are literals")]
pub fn sample_residency(id: &str, city: &str, name: &str) -> Residency {
    Residency {
        id: ResidencyId::new(id).expect("fixture residency id"),
        residency_type: crate::domain::DEFAULT_RESIDENCY_TYPE.to_owned(),
        city: city.to_owned(),
        name: name.to_owned(),
        address: "1 University Ave".to_owned(),
        telephone: "555-0100".to_owned(),
        available_transportation: None,
    }
}

/// Review fixture by [`FAKE_USERNAME`].
///
/// # Panics
///
/// Panics when `id` is blank.
#[expect(clippy::expect_used, reason = "fixture ids are literals")]
pub fn sample_review(id: &str, residency_id: &str, text: &str) -> Review {
    Review {
        id: ReviewId::new(id).expect("fixture review id"),
        username: FAKE_USERNAME.to_owned(),
        residency_id: residency_id.to_owned(),
        rating: crate::domain::Rating::default(),
        review_text: text.to_owned(),
        timestamp: "2024-03-01T10:00:00Z".to_owned(),
    }
}

/// Pending application fixture by [`FAKE_USERNAME`].
///
/// # Panics
///
/// Panics when `id` is blank.
#[expect(clippy::expect_used, reason = "fixture ids are literals")]
pub fn sample_application(id: &str, residency_id: &str) -> Application {
    Application {
        id: ApplicationId::new(id).expect("fixture application id"),
        username: FAKE_USERNAME.to_owned(),
        residency_id: residency_id.to_owned(),
        preferred_roommate: None,
        disease_status: DEFAULT_DISEASE_STATUS.to_owned(),
        status: ApplicationStatus::Pending,
    }
}

/// Block fixture with three floors of ten rooms.
///
/// # Panics
///
/// Panics when `id` is blank.
#[expect(clippy::expect_used, reason = "fixture ids are literals")]
pub fn sample_block(id: &str, residency_id: &str, name: &str) -> Block {
    Block {
        id: BlockId::new(id).expect("fixture block id"),
        residency_id: residency_id.to_owned(),
        block_name: name.to_owned(),
        number_of_floors: 3,
        total_rooms: 30,
    }
}

/// Available double room fixture on the first floor.
///
/// # Panics
///
/// Panics when `id` is blank.
#[expect(clippy::expect_used, reason = "fixture ids are literals")]
pub fn sample_room(id: &str, block_id: &str, number: &str) -> Room {
    Room {
        id: RoomId::new(id).expect("fixture room id"),
        block_id: block_id.to_owned(),
        room_number: number.to_owned(),
        floor: 1,
        capacity: 2,
        is_available: true,
    }
}

/// Unsigned JWT-shaped token carrying `username` and `role` claims.
pub fn jwt_for(username: &str, role: Role) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(
        json!({ "username": username, "role": role })
            .to_string()
            .as_bytes(),
    );
    format!("{header}.{payload}.unsigned")
}
