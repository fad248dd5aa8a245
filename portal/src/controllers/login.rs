//! Login page controller.
//!
//! Exchanges credentials for a token, persists it and routes the user to
//! the dashboard matching the token's role claim.

use tracing::info;

use super::reject_locally;
use crate::client::PortalApi;
use crate::domain::{ApiResult, LoginCredentials, Role, Route, TokenClaims};
use crate::session::SessionContext;

const SUCCESS_MESSAGE: &str = "Login successful";
const FAILURE_MESSAGE: &str = "Login failed";

/// Submits login credentials.
pub struct LoginController {
    api: PortalApi,
    session: SessionContext,
}

impl LoginController {
    /// Controller bound to `session`.
    pub fn new(api: PortalApi, session: SessionContext) -> Self {
        Self { api, session }
    }

    /// Log in and navigate to the matching dashboard.
    ///
    /// Returns the route navigated to.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Route> {
        let credentials = LoginCredentials::try_from_parts(username, password)
            .map_err(|error| reject_locally(&self.session, &error))?;

        let token = match self.api.login(&credentials).await {
            Ok(token) => token,
            Err(error) => {
                // Bad credentials come back as 401, so this may be SessionExpired.
                self.session.error(error.server_message_or(FAILURE_MESSAGE));
                return Err(error);
            }
        };
        if let Err(error) = self.session.persist_token(&token) {
            self.session.error(FAILURE_MESSAGE);
            return Err(error);
        }

        let claims = token.claims();
        let route = landing_route(claims.as_ref());
        let expires_at = claims.as_ref().and_then(TokenClaims::expires_at);
        info!(
            username = credentials.username(),
            route = %route,
            expires_at = ?expires_at,
            "logged in"
        );
        self.session.success(SUCCESS_MESSAGE);
        self.session.navigate(route);
        Ok(route)
    }
}

/// Dashboard for the token's role claim; the entry page when unreadable.
fn landing_route(claims: Option<&TokenClaims>) -> Route {
    match claims.and_then(|claims| claims.role) {
        Some(Role::Admin) => Route::Admin,
        Some(Role::Student) => Route::Student,
        None => Route::Entry,
    }
}
