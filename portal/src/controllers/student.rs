//! Student dashboard controller.
//!
//! Lists residencies, applies for one or withdraws an application, and
//! manages the student's own reviews. Review mutations re-fetch the review
//! list afterwards.

use tracing::debug;

use super::{FETCH_RESIDENCIES_FAILED, reject_locally, search_residency};
use crate::client::PortalApi;
use crate::domain::{
    ApiResult, ApplicationDraft, ApplicationId, Error, Residency, ResidencyId, Review,
    ReviewDraft, ReviewId,
};
use crate::session::SessionContext;

const APPLIED_MESSAGE: &str = "Application submitted successfully";
const APPLY_FAILED: &str = "Failed to submit application";
const WITHDRAWN_MESSAGE: &str = "Application withdrawn successfully";
const WITHDRAW_FAILED: &str = "Failed to withdraw application";
const REVIEWED_MESSAGE: &str = "Review submitted successfully";
const REVIEW_FAILED: &str = "Failed to submit review";
const REVIEW_DELETED_MESSAGE: &str = "Review deleted successfully";
const REVIEW_DELETE_FAILED: &str = "Failed to delete review";
const FETCH_REVIEWS_FAILED: &str = "Failed to fetch reviews";

/// State behind the student dashboard.
pub struct StudentDashboard {
    api: PortalApi,
    session: SessionContext,
    residencies: Vec<Residency>,
    reviews: Vec<Review>,
    search_id: String,
    application: ApplicationDraft,
    review: ReviewDraft,
}

impl StudentDashboard {
    /// Empty dashboard; call [`StudentDashboard::mount`] to populate it.
    pub fn new(api: PortalApi, session: SessionContext) -> Self {
        Self {
            api,
            session,
            residencies: Vec::new(),
            reviews: Vec::new(),
            search_id: String::new(),
            application: ApplicationDraft::default(),
            review: ReviewDraft::default(),
        }
    }

    /// Residencies currently listed.
    pub fn residencies(&self) -> &[Residency] {
        &self.residencies
    }

    /// The student's own reviews.
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Replace the search box text.
    pub fn set_search_id(&mut self, id: impl Into<String>) {
        self.search_id = id.into();
    }

    /// The application form.
    pub fn application(&self) -> &ApplicationDraft {
        &self.application
    }

    /// Mutable application form.
    pub fn application_mut(&mut self) -> &mut ApplicationDraft {
        &mut self.application
    }

    /// The review form.
    pub fn review(&self) -> &ReviewDraft {
        &self.review
    }

    /// Mutable review form.
    pub fn review_mut(&mut self) -> &mut ReviewDraft {
        &mut self.review
    }

    /// Point both forms at `id`.
    pub fn select_residency(&mut self, id: &ResidencyId) {
        self.application.residency_id = id.to_string();
        self.review.residency_id = id.to_string();
    }

    /// Initial load: residencies, then own reviews.
    ///
    /// Both fetches run even when the first fails, unless the session
    /// expired; the first error wins.
    pub async fn mount(&mut self) -> ApiResult<()> {
        let residencies = self.fetch_all().await;
        if residencies.as_ref().is_err_and(Error::is_session_expired) {
            return residencies;
        }
        let reviews = self.fetch_reviews().await;
        residencies.and(reviews)
    }

    /// Replace the list with every residency.
    pub async fn fetch_all(&mut self) -> ApiResult<()> {
        match self.api.list_residencies().await {
            Ok(residencies) => {
                self.residencies = residencies;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, FETCH_RESIDENCIES_FAILED);
                Err(error)
            }
        }
    }

    /// Replace the list with the residency named in the search box.
    pub async fn search(&mut self) -> ApiResult<()> {
        let residency = search_residency(&self.api, &self.session, &self.search_id).await?;
        self.residencies = vec![residency];
        Ok(())
    }

    /// Submit the application form; success resets it.
    pub async fn apply(&mut self) -> ApiResult<()> {
        self.application
            .validate()
            .map_err(|error| reject_locally(&self.session, &error))?;
        match self.api.apply(&self.application).await {
            Ok(()) => {
                debug!(residency_id = %self.application.residency_id, "application submitted");
                self.session.success(APPLIED_MESSAGE);
                self.application = ApplicationDraft::default();
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, APPLY_FAILED);
                Err(error)
            }
        }
    }

    /// Withdraw a submitted application.
    pub async fn withdraw_application(&mut self, id: &ApplicationId) -> ApiResult<()> {
        match self.api.withdraw_application(id).await {
            Ok(()) => {
                debug!(application_id = %id, "application withdrawn");
                self.session.success(WITHDRAWN_MESSAGE);
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, WITHDRAW_FAILED);
                Err(error)
            }
        }
    }

    /// Submit the review form; success resets it and re-fetches reviews.
    pub async fn submit_review(&mut self) -> ApiResult<()> {
        self.review
            .validate()
            .map_err(|error| reject_locally(&self.session, &error))?;
        match self.api.create_review(&self.review).await {
            Ok(ack) => {
                debug!(id = ?ack.id, "review created");
                self.session.success(REVIEWED_MESSAGE);
                self.review = ReviewDraft::default();
                self.refresh_reviews().await;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, REVIEW_FAILED);
                Err(error)
            }
        }
    }

    /// Delete one of the student's reviews and re-fetch the list.
    pub async fn delete_review(&mut self, id: &ReviewId) -> ApiResult<()> {
        match self.api.delete_review(id).await {
            Ok(()) => {
                self.session.success(REVIEW_DELETED_MESSAGE);
                self.refresh_reviews().await;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, REVIEW_DELETE_FAILED);
                Err(error)
            }
        }
    }

    /// Replace the review list.
    pub async fn fetch_reviews(&mut self) -> ApiResult<()> {
        match self.api.list_reviews().await {
            Ok(reviews) => {
                self.reviews = reviews;
                Ok(())
            }
            Err(error) => {
                self.session.report(&error, FETCH_REVIEWS_FAILED);
                Err(error)
            }
        }
    }

    /// Clear the credential and return to the login page.
    pub fn logout(&self) -> ApiResult<()> {
        self.session.logout()
    }

    async fn refresh_reviews(&mut self) {
        if let Err(error) = self.fetch_reviews().await {
            debug!(%error, "re-fetch after mutation failed");
        }
    }
}

#[cfg(test)]
mod tests;
