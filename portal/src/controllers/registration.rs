//! Registration page controller.

use tracing::info;

use super::reject_locally;
use crate::client::PortalApi;
use crate::domain::{ApiResult, RegistrationForm, Role, Route};
use crate::session::SessionContext;

const SUCCESS_MESSAGE: &str = "Registration successful";
const FAILURE_MESSAGE: &str = "Registration failed";

/// Holds the registration form and submits it.
pub struct RegistrationController {
    api: PortalApi,
    session: SessionContext,
    form: RegistrationForm,
    loading: bool,
}

impl RegistrationController {
    /// Controller with an empty student form.
    pub fn new(api: PortalApi, session: SessionContext) -> Self {
        Self {
            api,
            session,
            form: RegistrationForm::default(),
            loading: false,
        }
    }

    /// Current form values.
    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    /// Mutable form, for applying user input.
    pub fn form_mut(&mut self) -> &mut RegistrationForm {
        &mut self.form
    }

    /// Switch role; every field except username and password resets.
    pub fn set_role(&mut self, role: Role) {
        self.form.set_role(role);
    }

    /// Whether a submission is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Validate and submit the form.
    ///
    /// Invalid forms never reach the network. On success the user is sent
    /// to the login page.
    pub async fn submit(&mut self) -> ApiResult<()> {
        let registration = self
            .form
            .validate()
            .map_err(|error| reject_locally(&self.session, &error))?;

        self.loading = true;
        let result = self.api.register(&registration).await;
        self.loading = false;

        match result {
            Ok(()) => {
                info!(username = registration.username(), role = %registration.role(), "registered");
                self.session.success(SUCCESS_MESSAGE);
                self.session.navigate(Route::Entry);
                Ok(())
            }
            Err(error) => {
                self.session
                    .report(&error, error.server_message_or(FAILURE_MESSAGE));
                Err(error)
            }
        }
    }
}
