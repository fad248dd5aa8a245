//! Residency listings and the draft form used to create or edit them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification applied to new drafts.
pub const DEFAULT_RESIDENCY_TYPE: &str = "Public University Residency";

/// Error returned when an identifier is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} id must not be empty")]
pub struct EmptyIdError {
    kind: &'static str,
}

impl EmptyIdError {
    pub(crate) const fn for_kind(kind: &'static str) -> Self {
        Self { kind }
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord,
            ::serde::Serialize, ::serde::Deserialize,
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validate and construct an identifier from borrowed input.
            pub fn new(
                id: impl AsRef<str>,
            ) -> Result<Self, $crate::domain::residency::EmptyIdError> {
                Self::try_from(id.as_ref().to_owned())
            }

            /// Borrow the identifier.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::residency::EmptyIdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err($crate::domain::residency::EmptyIdError::for_kind($kind));
                }
                Ok(Self(trimmed.to_owned()))
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

pub(crate) use string_id;

string_id!(
    /// Service-assigned residency identifier (`_id`).
    ResidencyId,
    "residency"
);

/// A residency as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Residency {
    /// Immutable identity.
    #[serde(rename = "_id")]
    pub id: ResidencyId,
    /// Residency classification.
    #[serde(rename = "Residency-Type", default)]
    pub residency_type: String,
    /// City the residency is in.
    #[serde(rename = "City")]
    pub city: String,
    /// Display name.
    #[serde(rename = "Residency")]
    pub name: String,
    /// Street address.
    #[serde(rename = "Address")]
    pub address: String,
    /// Contact telephone number.
    #[serde(rename = "Telephone")]
    pub telephone: String,
    /// Free-text description of nearby transport.
    #[serde(
        rename = "Available_transportation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub available_transportation: Option<String>,
}

/// Validation errors returned by [`ResidencyDraft::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResidencyValidationError {
    /// A required field was left blank.
    MissingField {
        /// Human-readable field label.
        field: &'static str,
    },
}

impl fmt::Display for ResidencyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "{field} is required"),
        }
    }
}

impl std::error::Error for ResidencyValidationError {}

/// Residency fields without identity; the body of create and update calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidencyDraft {
    /// Residency classification.
    #[serde(rename = "Residency-Type")]
    pub residency_type: String,
    /// City the residency is in.
    #[serde(rename = "City")]
    pub city: String,
    /// Display name.
    #[serde(rename = "Residency")]
    pub name: String,
    /// Street address.
    #[serde(rename = "Address")]
    pub address: String,
    /// Contact telephone number.
    #[serde(rename = "Telephone")]
    pub telephone: String,
    /// Free-text description of nearby transport; may be empty.
    #[serde(rename = "Available_transportation")]
    pub available_transportation: String,
}

impl Default for ResidencyDraft {
    fn default() -> Self {
        Self {
            residency_type: DEFAULT_RESIDENCY_TYPE.to_owned(),
            city: String::new(),
            name: String::new(),
            address: String::new(),
            telephone: String::new(),
            available_transportation: String::new(),
        }
    }
}

impl ResidencyDraft {
    /// Check the fields the add/edit forms mark as required.
    pub fn validate(&self) -> Result<(), ResidencyValidationError> {
        [
            (&self.city, "city"),
            (&self.name, "residency name"),
            (&self.address, "address"),
            (&self.telephone, "telephone"),
        ]
        .into_iter()
        .find(|(value, _)| value.trim().is_empty())
        .map_or(Ok(()), |(_, field)| {
            Err(ResidencyValidationError::MissingField { field })
        })
    }
}

impl From<&Residency> for ResidencyDraft {
    fn from(residency: &Residency) -> Self {
        Self {
            residency_type: residency.residency_type.clone(),
            city: residency.city.clone(),
            name: residency.name.clone(),
            address: residency.address.clone(),
            telephone: residency.telephone.clone(),
            available_transportation: residency
                .available_transportation
                .clone()
                .unwrap_or_default(),
        }
    }
}
