//! User data model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors returned by [`UserName::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameValidationError {
    /// The name was empty or whitespace-only.
    Empty,
    /// The name exceeded [`USER_NAME_MAX`] characters.
    TooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// The name contained characters outside the permitted set.
    InvalidCharacters,
}

impl fmt::Display for UserNameValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "user name must not be empty"),
            Self::TooLong { max } => {
                write!(f, "user name must be at most {max} characters")
            }
            Self::InvalidCharacters => write!(
                f,
                "user name may only contain letters, numbers, underscores, or hyphens",
            ),
        }
    }
}

impl std::error::Error for UserNameValidationError {}

/// Maximum allowed length for a user name.
pub const USER_NAME_MAX: usize = 32;

static USER_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn user_name_regex() -> &'static Regex {
    USER_NAME_RE.get_or_init(|| {
        // Names double as URL path segments, so no spaces are permitted.
        let pattern = "^[A-Za-z0-9_-]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("user name regex failed to compile: {error}"))
    })
}

/// Unique human-readable user name, the external reference key for users.
///
/// Immutable after registration; every endpoint addresses users by this
/// value rather than a database identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName(String);

impl UserName {
    /// Validate and construct a [`UserName`] from owned input.
    pub fn new(name: impl Into<String>) -> Result<Self, UserNameValidationError> {
        Self::from_owned(name.into())
    }

    fn from_owned(name: String) -> Result<Self, UserNameValidationError> {
        if name.trim().is_empty() {
            return Err(UserNameValidationError::Empty);
        }
        if name.chars().count() > USER_NAME_MAX {
            return Err(UserNameValidationError::TooLong { max: USER_NAME_MAX });
        }
        if !user_name_regex().is_match(&name) {
            return Err(UserNameValidationError::InvalidCharacters);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserName> for String {
    fn from(value: UserName) -> Self {
        value.0
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Mutable user attributes: address plus the three allergy flags.
///
/// Everything except the name may change after registration, so the
/// profile is the unit the update endpoint replaces wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// City of residence.
    pub city: String,
    /// State or region of residence.
    pub state: String,
    /// Postal code of residence.
    pub zipcode: i32,
    /// Whether the user tracks the peanut allergy dimension.
    pub has_peanut_allergy: bool,
    /// Whether the user tracks the egg allergy dimension.
    pub has_egg_allergy: bool,
    /// Whether the user tracks the dairy allergy dimension.
    pub has_dairy_allergy: bool,
}

/// Registered platform user.
///
/// ## Invariants
/// - `name` is unique across all users and immutable after registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique, immutable user name.
    pub name: UserName,
    /// Mutable address and allergy attributes.
    #[serde(flatten)]
    pub profile: UserProfile,
}

impl User {
    /// Build a user from validated components.
    pub fn new(name: UserName, profile: UserProfile) -> Self {
        Self { name, profile }
    }
}
