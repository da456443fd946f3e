//! User data model.
//!
//! A user is identified by a server-assigned MongoDB `ObjectId` and carries
//! three descriptive fields. Validation lives on the constructors so a
//! [`UserProfile`] in hand is always fit for persistence.

use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Descriptive fields carried by every user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    /// The user's name.
    Name,
    /// Where the user is based.
    Location,
    /// The user's job title.
    Title,
}

impl UserField {
    /// Field name as it appears in JSON payloads and stored documents.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Location => "location",
            Self::Title => "title",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a string is not a valid [`UserId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UserIdError {
    #[error("user id must not be empty")]
    Empty,
    #[error("user id must be a 24 character hex ObjectId")]
    Invalid,
}

/// Validation errors returned by [`UserProfile::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    MissingField { field: UserField },
    EmptyField { field: UserField },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "missing required field: {field}"),
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier backed by a MongoDB `ObjectId`.
///
/// Serialises as the 24 character lowercase hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(ObjectId);

impl UserId {
    /// Validate and construct a [`UserId`] from its hex representation.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::UserId;
    ///
    /// assert!(UserId::parse("65f1c0ffee0ddba11dea5e11").is_ok());
    /// assert!(UserId::parse("not-an-id").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UserIdError> {
        if raw.is_empty() {
            return Err(UserIdError::Empty);
        }
        ObjectId::parse_str(raw)
            .map(Self)
            .map_err(|_| UserIdError::Invalid)
    }

    /// Generate a fresh identifier for a new user.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Access the underlying `ObjectId`.
    pub fn as_object_id(&self) -> &ObjectId {
        &self.0
    }
}

impl From<ObjectId> for UserId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl FromStr for UserId {
    type Err = UserIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_hex()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Validated descriptive fields of a user.
///
/// ## Invariants
/// - `name`, `location` and `title` are non-empty once trimmed of whitespace.
///   Values are stored as supplied, without trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    name: String,
    location: String,
    title: String,
}

impl UserProfile {
    /// Validate the three descriptive fields.
    ///
    /// Fields are checked in `name`, `location`, `title` order and the first
    /// failure is reported.
    ///
    /// # Examples
    /// ```
    /// use user_service::domain::{UserField, UserProfile, UserValidationError};
    ///
    /// let profile = UserProfile::try_new(
    ///     Some("Ada".into()),
    ///     Some("London".into()),
    ///     Some("Engineer".into()),
    /// )
    /// .expect("valid profile");
    /// assert_eq!(profile.name(), "Ada");
    ///
    /// let err = UserProfile::try_new(Some("Ada".into()), None, Some("Engineer".into()))
    ///     .expect_err("location is missing");
    /// assert_eq!(err, UserValidationError::MissingField { field: UserField::Location });
    /// ```
    pub fn try_new(
        name: Option<String>,
        location: Option<String>,
        title: Option<String>,
    ) -> Result<Self, UserValidationError> {
        let name = require(UserField::Name, name)?;
        let location = require(UserField::Location, location)?;
        let title = require(UserField::Title, title)?;
        Ok(Self {
            name,
            location,
            title,
        })
    }

    /// The user's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the user is based.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The user's job title.
    pub fn title(&self) -> &str {
        &self.title
    }
}

fn require(field: UserField, value: Option<String>) -> Result<String, UserValidationError> {
    match value {
        None => Err(UserValidationError::MissingField { field }),
        Some(value) if value.trim().is_empty() => Err(UserValidationError::EmptyField { field }),
        Some(value) => Ok(value),
    }
}

/// Persisted user.
///
/// ## Invariants
/// - `id` is assigned by the server on creation and never changes.
/// - `profile` satisfies the [`UserProfile`] invariants.
///
/// Serialises as `{"id", "name", "location", "title"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    id: UserId,
    profile: UserProfile,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, profile: UserProfile) -> Self {
        Self { id, profile }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Descriptive fields.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Replace every descriptive field, keeping the identifier.
    #[must_use]
    pub fn with_profile(self, profile: UserProfile) -> Self {
        Self { id: self.id, profile }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDto {
    id: String,
    name: Option<String>,
    location: Option<String>,
    title: Option<String>,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        let User { id, profile } = value;
        let UserProfile {
            name,
            location,
            title,
        } = profile;
        Self {
            id: id.into(),
            name: Some(name),
            location: Some(location),
            title: Some(title),
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum UserDtoError {
    #[error(transparent)]
    Id(#[from] UserIdError),
    #[error(transparent)]
    Profile(#[from] UserValidationError),
}

impl TryFrom<UserDto> for User {
    type Error = UserDtoError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        let id = UserId::parse(&value.id)?;
        let profile = UserProfile::try_new(value.name, value.location, value.title)?;
        Ok(Self::new(id, profile))
    }
}
