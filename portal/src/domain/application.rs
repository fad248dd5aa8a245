//! Residency applications submitted by students.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ResidencyId;
use super::residency::string_id;

/// Placeholder health status used by a fresh application draft.
pub const DEFAULT_DISEASE_STATUS: &str = "None";

string_id!(
    /// Service-assigned application identifier (`_id`).
    ApplicationId,
    "application"
);

/// Review status assigned by the residency office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Awaiting a decision.
    #[default]
    Pending,
    /// Accepted.
    Approved,
    /// Declined.
    Rejected,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        })
    }
}

/// An application as stored by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Immutable identity.
    #[serde(rename = "_id")]
    pub id: ApplicationId,
    /// Student who applied.
    pub username: String,
    /// Residency applied for.
    pub residency_id: String,
    /// Optional roommate preference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_roommate: Option<String>,
    /// Free-text health status.
    #[serde(default)]
    pub disease_status: String,
    /// Decision state; set outside the portal.
    #[serde(default)]
    pub status: ApplicationStatus,
}

/// Validation errors returned by [`ApplicationDraft::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationValidationError {
    /// Health status was blank.
    MissingDiseaseStatus,
}

impl fmt::Display for ApplicationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDiseaseStatus => write!(f, "disease status is required"),
        }
    }
}

impl std::error::Error for ApplicationValidationError {}

/// Application form state; the body of `POST /residencies/apply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationDraft {
    /// Residency selected on the form. Empty until one is picked.
    pub residency_id: String,
    /// Optional roommate name; sent as an empty string when unset.
    pub preferred_roommate: String,
    /// Health conditions, `None` by default.
    pub disease_status: String,
}

impl Default for ApplicationDraft {
    fn default() -> Self {
        Self {
            residency_id: String::new(),
            preferred_roommate: String::new(),
            disease_status: DEFAULT_DISEASE_STATUS.to_owned(),
        }
    }
}

impl ApplicationDraft {
    /// Start a draft for the given residency.
    pub fn for_residency(residency_id: &ResidencyId) -> Self {
        Self {
            residency_id: residency_id.to_string(),
            ..Self::default()
        }
    }

    /// Check the fields the application form marks as required.
    pub fn validate(&self) -> Result<(), ApplicationValidationError> {
        if self.disease_status.trim().is_empty() {
            return Err(ApplicationValidationError::MissingDiseaseStatus);
        }
        Ok(())
    }
}
