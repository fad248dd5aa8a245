//! Typed residency service operations.
//!
//! Each method builds one [`ApiRequest`], hands it to the [`ApiClient`] and
//! decodes the answer. Identifiers travel as single path segments.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiClient;
use crate::domain::ports::ApiRequest;
use crate::domain::{
    ApiResult, Application, ApplicationDraft, ApplicationId, Block, BlockDraft, BlockId, Error,
    LoginCredentials, Registration, Residency, ResidencyDraft, ResidencyId, Review, ReviewDraft,
    ReviewId, Room, RoomDraft, RoomId, SessionToken,
};

/// Keys under which the service reports a created record's identifier.
const ID_KEYS: [&str; 6] = [
    "residency_id",
    "review_id",
    "application_id",
    "block_id",
    "room_id",
    "_id",
];

/// Lenient view of a mutation response.
///
/// The service answers creates and updates with a loose JSON object; only
/// the optional `message` and the created identifier are kept. Each is read
/// on its own, so a malformed field never hides the other. Empty or
/// non-object bodies decode as the empty acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Acknowledgement {
    /// Human-readable confirmation, if provided.
    pub message: Option<String>,
    /// Identifier of the created record, if provided.
    pub id: Option<String>,
}

impl Acknowledgement {
    fn from_body(body: &[u8]) -> Self {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            message: text("message"),
            id: ID_KEYS.into_iter().find_map(text),
        }
    }
}

#[derive(Serialize)]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponseDto {
    token: String,
}

/// Typed operations against the residency service.
#[derive(Clone)]
pub struct PortalApi {
    client: ApiClient,
}

impl PortalApi {
    /// Wrap a configured client.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/register`.
    pub async fn register(&self, registration: &Registration) -> ApiResult<()> {
        let body = to_body(registration)?;
        self.client
            .send(ApiRequest::post(["auth", "register"], body))
            .await?;
        Ok(())
    }

    /// `POST /auth/login`; returns the issued token without storing it.
    pub async fn login(&self, credentials: &LoginCredentials) -> ApiResult<SessionToken> {
        let body = to_body(&LoginRequestDto {
            username: credentials.username(),
            password: credentials.password(),
        })?;
        let dto: LoginResponseDto = self
            .client
            .send_json(ApiRequest::post(["auth", "login"], body))
            .await?;
        SessionToken::new(dto.token)
            .map_err(|error| Error::decode(format!("login response: {error}")))
    }

    /// `GET /residencies`.
    pub async fn list_residencies(&self) -> ApiResult<Vec<Residency>> {
        self.client
            .send_json(ApiRequest::get(["residencies"]))
            .await
    }

    /// `GET /residencies/{id}`.
    pub async fn get_residency(&self, id: &ResidencyId) -> ApiResult<Residency> {
        self.client
            .send_json(ApiRequest::get(["residencies", id.as_str()]))
            .await
    }

    /// `POST /residencies`.
    pub async fn create_residency(&self, draft: &ResidencyDraft) -> ApiResult<Acknowledgement> {
        let body = to_body(draft)?;
        self.acknowledge(ApiRequest::post(["residencies"], body))
            .await
    }

    /// `PUT /residencies/{id}`.
    pub async fn update_residency(
        &self,
        id: &ResidencyId,
        draft: &ResidencyDraft,
    ) -> ApiResult<Acknowledgement> {
        let body = to_body(draft)?;
        self.acknowledge(ApiRequest::put(["residencies", id.as_str()], body))
            .await
    }

    /// `DELETE /residencies/{id}`.
    pub async fn delete_residency(&self, id: &ResidencyId) -> ApiResult<()> {
        self.client
            .send(ApiRequest::delete(["residencies", id.as_str()]))
            .await?;
        Ok(())
    }

    /// `POST /residencies/apply`.
    pub async fn apply(&self, draft: &ApplicationDraft) -> ApiResult<()> {
        let body = to_body(draft)?;
        self.client
            .send(ApiRequest::post(["residencies", "apply"], body))
            .await?;
        Ok(())
    }

    /// `GET /residencies/applications`.
    pub async fn list_applications(&self) -> ApiResult<Vec<Application>> {
        self.client
            .send_json(ApiRequest::get(["residencies", "applications"]))
            .await
    }

    /// `GET /residencies/applications/{id}`.
    pub async fn get_application(&self, id: &ApplicationId) -> ApiResult<Application> {
        self.client
            .send_json(ApiRequest::get(["residencies", "applications", id.as_str()]))
            .await
    }

    /// `DELETE /residencies/applications/{id}`; the student withdraws.
    pub async fn withdraw_application(&self, id: &ApplicationId) -> ApiResult<()> {
        self.client
            .send(ApiRequest::delete([
                "residencies",
                "applications",
                id.as_str(),
            ]))
            .await?;
        Ok(())
    }

    /// `GET /residencies/{id}/blocks`.
    pub async fn list_blocks(&self, residency: &ResidencyId) -> ApiResult<Vec<Block>> {
        self.client
            .send_json(ApiRequest::get(["residencies", residency.as_str(), "blocks"]))
            .await
    }

    /// `GET /residencies/blocks/{id}`.
    pub async fn get_block(&self, id: &BlockId) -> ApiResult<Block> {
        self.client
            .send_json(ApiRequest::get(["residencies", "blocks", id.as_str()]))
            .await
    }

    /// `POST /residencies/{id}/blocks`.
    pub async fn create_block(
        &self,
        residency: &ResidencyId,
        draft: &BlockDraft,
    ) -> ApiResult<Acknowledgement> {
        let body = to_body(draft)?;
        self.acknowledge(ApiRequest::post(
            ["residencies", residency.as_str(), "blocks"],
            body,
        ))
        .await
    }

    /// `PUT /residencies/blocks/{id}`.
    pub async fn update_block(&self, id: &BlockId, draft: &BlockDraft) -> ApiResult<Acknowledgement> {
        let body = to_body(draft)?;
        self.acknowledge(ApiRequest::put(["residencies", "blocks", id.as_str()], body))
            .await
    }

    /// `DELETE /residencies/blocks/{id}`.
    pub async fn delete_block(&self, id: &BlockId) -> ApiResult<()> {
        self.client
            .send(ApiRequest::delete(["residencies", "blocks", id.as_str()]))
            .await?;
        Ok(())
    }

    /// `GET /residencies/{block}/rooms`.
    pub async fn list_rooms(&self, block: &BlockId) -> ApiResult<Vec<Room>> {
        self.client
            .send_json(ApiRequest::get(["residencies", block.as_str(), "rooms"]))
            .await
    }

    /// `GET /residencies/rooms/{id}`.
    pub async fn get_room(&self, id: &RoomId) -> ApiResult<Room> {
        self.client
            .send_json(ApiRequest::get(["residencies", "rooms", id.as_str()]))
            .await
    }

    /// `POST /residencies/{block}/rooms`.
    pub async fn create_room(&self, block: &BlockId, draft: &RoomDraft) -> ApiResult<Acknowledgement> {
        let body = to_body(draft)?;
        self.acknowledge(ApiRequest::post(
            ["residencies", block.as_str(), "rooms"],
            body,
        ))
        .await
    }

    /// `PUT /residencies/rooms/{id}`.
    pub async fn update_room(&self, id: &RoomId, draft: &RoomDraft) -> ApiResult<Acknowledgement> {
        let body = to_body(draft)?;
        self.acknowledge(ApiRequest::put(["residencies", "rooms", id.as_str()], body))
            .await
    }

    /// `DELETE /residencies/rooms/{id}`.
    pub async fn delete_room(&self, id: &RoomId) -> ApiResult<()> {
        self.client
            .send(ApiRequest::delete(["residencies", "rooms", id.as_str()]))
            .await?;
        Ok(())
    }

    /// `GET /reviews`; the service scopes the list to the caller.
    pub async fn list_reviews(&self) -> ApiResult<Vec<Review>> {
        self.client.send_json(ApiRequest::get(["reviews"])).await
    }

    /// `POST /reviews`.
    pub async fn create_review(&self, draft: &ReviewDraft) -> ApiResult<Acknowledgement> {
        let body = to_body(draft)?;
        self.acknowledge(ApiRequest::post(["reviews"], body)).await
    }

    /// `GET /reviews/{id}`.
    pub async fn get_review(&self, id: &ReviewId) -> ApiResult<Review> {
        self.client
            .send_json(ApiRequest::get(["reviews", id.as_str()]))
            .await
    }

    /// `DELETE /reviews/{id}`.
    pub async fn delete_review(&self, id: &ReviewId) -> ApiResult<()> {
        self.client
            .send(ApiRequest::delete(["reviews", id.as_str()]))
            .await?;
        Ok(())
    }

    async fn acknowledge(&self, request: ApiRequest) -> ApiResult<Acknowledgement> {
        let response = self.client.send(request).await?;
        Ok(Acknowledgement::from_body(&response.body))
    }
}

fn to_body(value: &impl Serialize) -> ApiResult<Value> {
    serde_json::to_value(value)
        .map_err(|error| Error::invalid_request(format!("failed to encode request body: {error}")))
}
