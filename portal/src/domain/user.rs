//! User roles and the registration record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use zeroize::Zeroizing;

/// Account role. Determines which dashboard a user lands on and which
/// registration fields are mandatory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages residency listings.
    Admin,
    /// Browses residencies, applies and writes reviews.
    #[default]
    Student,
}

impl Role {
    /// Wire representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}', expected 'admin' or 'student'")]
pub struct UnknownRoleError(String);

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "student" => Ok(Self::Student),
            _ => Err(UnknownRoleError(s.to_owned())),
        }
    }
}

/// Validation errors returned by [`RegistrationForm::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// A field required for the selected role was left blank.
    MissingField {
        /// Human-readable field label.
        field: &'static str,
    },
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "{field} is required"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Editable registration form state.
///
/// Fields are raw user input; nothing is enforced until
/// [`RegistrationForm::validate`] runs.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    /// Desired username.
    pub username: String,
    /// Desired password. Never displayed.
    pub password: String,
    /// Selected role.
    pub role: Role,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Year of study; students only.
    pub year_of_study: String,
    /// University; students only.
    pub university: String,
}

impl RegistrationForm {
    /// Switch role, keeping only the username and password.
    ///
    /// # Examples
    /// ```
    /// use portal::domain::{RegistrationForm, Role};
    ///
    /// let mut form = RegistrationForm {
    ///     username: "amira".to_owned(),
    ///     first_name: "Amira".to_owned(),
    ///     ..RegistrationForm::default()
    /// };
    /// form.set_role(Role::Admin);
    /// assert_eq!(form.username, "amira");
    /// assert!(form.first_name.is_empty());
    /// ```
    pub fn set_role(&mut self, role: Role) {
        *self = Self {
            username: std::mem::take(&mut self.username),
            password: std::mem::take(&mut self.password),
            role,
            ..Self::default()
        };
    }

    /// Check required fields for the selected role and build the record.
    pub fn validate(&self) -> Result<Registration, RegistrationValidationError> {
        let username = required(&self.username, "username")?;
        if self.password.is_empty() {
            return Err(RegistrationValidationError::MissingField { field: "password" });
        }
        let first_name = required(&self.first_name, "first name")?;
        let last_name = required(&self.last_name, "last name")?;
        let profile = match self.role {
            Role::Admin => RoleProfile::Admin,
            Role::Student => RoleProfile::Student {
                year_of_study: required(&self.year_of_study, "year of study")?,
                university: required(&self.university, "university")?,
            },
        };

        Ok(Registration {
            username,
            password: Zeroizing::new(self.password.clone()),
            first_name,
            last_name,
            profile,
        })
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("password", &"***")
            .field("role", &self.role)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("year_of_study", &self.year_of_study)
            .field("university", &self.university)
            .finish()
    }
}

fn required(value: &str, field: &'static str) -> Result<String, RegistrationValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationValidationError::MissingField { field });
    }
    Ok(trimmed.to_owned())
}

/// Role-conditional registration attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleProfile {
    /// Administrators carry no extra attributes.
    Admin,
    /// Students declare where and what year they study.
    Student {
        /// Year of study, as typed.
        year_of_study: String,
        /// University name.
        university: String,
    },
}

/// Validated user record submitted to `POST /auth/register`.
///
/// ## Invariants
/// - Username, first and last name are trimmed and non-empty.
/// - Student registrations always carry year of study and university.
#[derive(Clone, PartialEq, Eq)]
pub struct Registration {
    username: String,
    password: Zeroizing<String>,
    first_name: String,
    last_name: String,
    profile: RoleProfile,
}

impl Registration {
    /// Registered username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Role implied by the profile.
    pub fn role(&self) -> Role {
        match self.profile {
            RoleProfile::Admin => Role::Admin,
            RoleProfile::Student { .. } => Role::Student,
        }
    }

    /// Role-specific attributes.
    pub fn profile(&self) -> &RoleProfile {
        &self.profile
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("password", &"***")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("profile", &self.profile)
            .finish()
    }
}

#[derive(Serialize)]
struct RegistrationDto<'a> {
    username: &'a str,
    password: &'a str,
    role: Role,
    first_name: &'a str,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    year_of_study: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    university: Option<&'a str>,
}

impl Serialize for Registration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (year_of_study, university) = match &self.profile {
            RoleProfile::Admin => (None, None),
            RoleProfile::Student {
                year_of_study,
                university,
            } => (Some(year_of_study.as_str()), Some(university.as_str())),
        };
        RegistrationDto {
            username: &self.username,
            password: &self.password,
            role: self.role(),
            first_name: &self.first_name,
            last_name: &self.last_name,
            year_of_study,
            university,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests;
