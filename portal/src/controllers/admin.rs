//! Admin dashboard controller.
//!
//! Manages the residency table: list, search, add, inline edit and delete,
//! plus read-only views of submitted applications and reviews. Every mutation is
//! followed by a full re-fetch; the table never changes optimistically.

use tracing::debug;

use super::{FETCH_RESIDENCIES_FAILED, reject_locally, search_residency};
use crate::client::PortalApi;
use crate::domain::{
    ApiResult, Application, ApplicationId, EditState, Error, Residency, ResidencyDraft,
    ResidencyId, Review, ReviewId, RowMode,
};
use crate::session::SessionContext;

const FETCHED_MESSAGE: &str = "Residencies fetched successfully";
const ADDED_MESSAGE: &str = "Residency added successfully";
const ADD_FAILED: &str = "Failed to add residency";
const UPDATED_MESSAGE: &str = "Residency updated successfully";
const UPDATE_FAILED: &str = "Failed to update residency";
const DELETED_MESSAGE: &str = "Residency deleted successfully";
const DELETE_FAILED: &str = "Failed to delete residency";
const FETCH_APPLICATIONS_FAILED: &str = "Failed to fetch applications";
const APPLICATION_FOUND: &str = "Application found";
const APPLICATION_NOT_FOUND: &str = "Application not found";
const REVIEW_FOUND: &str = "Review found";
const REVIEW_NOT_FOUND: &str = "Review not found";

/// State behind the admin dashboard.
pub struct AdminDashboard {
    api: PortalApi,
    session: SessionContext,
    residencies: Vec<Residency>,
    applications: Vec<Application>,
    application_detail: Option<Application>,
    review_detail: Option<Review>,
    search_id: String,
    draft: ResidencyDraft,
    edit: EditState<ResidencyId, ResidencyDraft>,
}

impl AdminDashboard {
    /// Empty dashboard; call [`AdminDashboard::mount`] to populate it.
    pub fn new(api: PortalApi, session: SessionContext) -> Self {
        Self {
            api,
            session,
            residencies: Vec::new(),
            applications: Vec::new(),
            application_detail: None,
            review_detail: None,
            search_id: String::new(),
            draft: ResidencyDraft::default(),
            edit: EditState::default(),
        }
    }

    /// Residencies currently listed.
    pub fn residencies(&self) -> &[Residency] {
        &self.residencies
    }

    /// Applications fetched by [`AdminDashboard::list_applications`].
    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    /// Application opened by [`AdminDashboard::view_application`].
    pub fn application_detail(&self) -> Option<&Application> {
        self.application_detail.as_ref()
    }

    /// Review opened by [`AdminDashboard::view_review`].
    pub fn review_detail(&self) -> Option<&Review> {
        self.review_detail.as_ref()
    }

    /// Replace the search box text.
    pub fn set_search_id(&mut self, id: impl Into<String>) {
        self.search_id = id.into();
    }

    /// The add-residency form.
    pub fn draft(&self) -> &ResidencyDraft {
        &self.draft
    }

    /// Mutable add-residency form.
    pub fn draft_mut(&mut self) -> &mut ResidencyDraft {
        &mut self.draft
    }

    /// Table edit state.
    pub fn edit_state(&self) -> &EditState<ResidencyId, ResidencyDraft> {
        &self.edit
    }

    /// How the row for `id` should be shown.
    pub fn row_mode(&self, id: &ResidencyId) -> RowMode<'_, ResidencyDraft> {
        self.edit.row_mode(id)
    }

    /// Scratch form of the row being edited.
    pub fn edit_form_mut(&mut self) -> Option<&mut ResidencyDraft> {
        self.edit.scratch_mut()
    }

    /// Initial load.
    pub async fn mount(&mut self) -> ApiResult<()> {
        self.fetch_all().await
    }

    /// Replace the table with every residency.
    pub async fn fetch_all(&mut self) -> ApiResult<()> {
        match self.api.list_residencies().await {
            Ok(residencies) => {
                debug!(count = residencies.len(), "residencies fetched");
                self.residencies = residencies;
                self.session.success(FETCHED_MESSAGE);
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, FETCH_RESIDENCIES_FAILED);
                Err(error)
            }
        }
    }

    /// Replace the table with the residency named in the search box.
    pub async fn search(&mut self) -> ApiResult<()> {
        let residency = search_residency(&self.api, &self.session, &self.search_id).await?;
        self.residencies = vec![residency];
        Ok(())
    }

    /// Create a residency from the add form.
    ///
    /// On success the form resets and the table is re-fetched.
    pub async fn add(&mut self) -> ApiResult<()> {
        self.draft
            .validate()
            .map_err(|error| reject_locally(&self.session, &error))?;
        match self.api.create_residency(&self.draft).await {
            Ok(ack) => {
                debug!(id = ?ack.id, "residency created");
                self.session.success(ADDED_MESSAGE);
                self.draft = ResidencyDraft::default();
                self.refresh().await;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, ADD_FAILED);
                Err(error)
            }
        }
    }

    /// Put the row for `id` into edit mode, seeded from the listed record.
    ///
    /// Returns `false` when no listed residency has that id.
    pub fn start_edit(&mut self, id: &ResidencyId) -> bool {
        let Some(residency) = self.residencies.iter().find(|r| &r.id == id) else {
            return false;
        };
        self.edit
            .start(residency.id.clone(), ResidencyDraft::from(residency));
        true
    }

    /// Leave edit mode, discarding changes.
    pub fn cancel_edit(&mut self) {
        self.edit.cancel();
    }

    /// Submit the row being edited.
    ///
    /// Success returns the table to viewing and re-fetches it; failure
    /// keeps the row in edit mode.
    pub async fn save_edit(&mut self) -> ApiResult<()> {
        let Some((id, scratch)) = self.edit.editing() else {
            return Err(Error::invalid_request("no residency is being edited"));
        };
        scratch
            .validate()
            .map_err(|error| reject_locally(&self.session, &error))?;
        match self.api.update_residency(id, scratch).await {
            Ok(_) => {
                self.session.success(UPDATED_MESSAGE);
                self.edit.cancel();
                self.refresh().await;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, UPDATE_FAILED);
                Err(error)
            }
        }
    }

    /// Delete the residency `id` and re-fetch the table.
    pub async fn delete(&mut self, id: &ResidencyId) -> ApiResult<()> {
        match self.api.delete_residency(id).await {
            Ok(()) => {
                self.session.success(DELETED_MESSAGE);
                if self.edit.editing().is_some_and(|(editing, _)| editing == id) {
                    self.edit.cancel();
                }
                self.refresh().await;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, DELETE_FAILED);
                Err(error)
            }
        }
    }

    /// Load every submitted application.
    pub async fn list_applications(&mut self) -> ApiResult<()> {
        match self.api.list_applications().await {
            Ok(applications) => {
                self.applications = applications;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, FETCH_APPLICATIONS_FAILED);
                Err(error)
            }
        }
    }

    /// Open one application. A failed lookup keeps the previous detail.
    pub async fn view_application(&mut self, id: &ApplicationId) -> ApiResult<()> {
        match self.api.get_application(id).await {
            Ok(application) => {
                self.session.success(APPLICATION_FOUND);
                self.application_detail = Some(application);
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, APPLICATION_NOT_FOUND);
                Err(error)
            }
        }
    }

    /// Open one review. A failed lookup keeps the previous detail.
    pub async fn view_review(&mut self, id: &ReviewId) -> ApiResult<()> {
        match self.api.get_review(id).await {
            Ok(review) => {
                self.session.success(REVIEW_FOUND);
                self.review_detail = Some(review);
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, REVIEW_NOT_FOUND);
                Err(error)
            }
        }
    }

    /// Clear the credential and return to the login page.
    pub fn logout(&self) -> ApiResult<()> {
        self.session.logout()
    }

    /// Re-fetch after a mutation. The mutation already succeeded, so a
    /// failed re-fetch only leaves its own notice.
    async fn refresh(&mut self) {
        if let Err(error) = self.fetch_all().await {
            debug!(%error, "re-fetch after mutation failed");
        }
    }
}
