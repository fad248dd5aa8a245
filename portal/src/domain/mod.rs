//! Domain primitives and aggregates.
//!
//! Purpose: define the strongly typed records exchanged with the residency
//! service, the local form state that produces them, and the ports the
//! client drives. Wire names are pinned with serde attributes on each type.
//!
//! Public surface:
//! - Error (alias to `error::Error`): client error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Residency, Application, Review and their drafts.
//! - Block and Room: the layout inside a residency.
//! - EditState: single-row edit mode for dashboard tables.

pub mod application;
pub mod auth;
pub mod block;
pub mod edit_state;
pub mod error;
pub mod notice;
pub mod ports;
pub mod residency;
pub mod review;
pub mod trace_id;
pub mod user;

pub use self::application::{
    Application, ApplicationDraft, ApplicationId, ApplicationStatus, ApplicationValidationError,
    DEFAULT_DISEASE_STATUS,
};
pub use self::auth::{
    EmptyTokenError, LoginCredentials, LoginValidationError, SessionToken, TokenClaims,
};
pub use self::block::{
    Block, BlockDraft, BlockId, LayoutValidationError, Room, RoomDraft, RoomId,
};
pub use self::edit_state::{EditState, RowMode};
pub use self::error::{Error, ErrorCode, GENERIC_FAILURE_MESSAGE, SESSION_EXPIRED_MESSAGE};
pub use self::notice::{Notice, NoticeLevel, Route};
pub use self::residency::{
    DEFAULT_RESIDENCY_TYPE, EmptyIdError, Residency, ResidencyDraft, ResidencyId,
    ResidencyValidationError,
};
pub use self::review::{
    RATING_MAX, RATING_MIN, Rating, RatingOutOfRange, Review, ReviewDraft, ReviewId,
    ReviewValidationError,
};
pub use self::trace_id::TraceId;
pub use self::user::{
    Registration, RegistrationForm, RegistrationValidationError, Role, RoleProfile,
    UnknownRoleError,
};

/// Convenient client result alias.
///
/// # Examples
/// ```
/// use portal::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::invalid_request("Please enter a residency ID"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
