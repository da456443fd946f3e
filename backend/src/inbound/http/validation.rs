//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies go through two steps: decode the JSON, then validate the
//! decoded payload into a domain value. Both failures become
//! `invalid_request` errors, and both happen before any persistence call.
//! The `{field, code}` details object is written to the request log only;
//! clients receive the message.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::domain::{Error, UserField, UserId, UserValidationError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidJson,
    MissingField,
    EmptyField,
    InvalidObjectId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidJson => "invalid_json",
            Self::MissingField => "missing_field",
            Self::EmptyField => "empty_field",
            Self::InvalidObjectId => "invalid_object_id",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

impl From<UserField> for FieldName {
    fn from(value: UserField) -> Self {
        Self::new(value.as_str())
    }
}

/// Path parameter naming the addressed user.
pub(crate) const USER_ID_PARAM: FieldName = FieldName::new("userId");

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: &str) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value,
            "code": code.as_str(),
        }))
    }
}

/// A decoded request payload that can be checked into a domain value.
pub trait Validate {
    /// Domain value produced by a successful check.
    type Output;

    /// Check every constraint, reporting the first violation.
    ///
    /// # Errors
    ///
    /// Returns an `invalid_request` [`Error`] describing the violation.
    fn validate(self) -> Result<Self::Output, Error>;
}

/// Decode `body` as JSON, then validate it.
///
/// # Errors
///
/// Returns `invalid_request` with code `invalid_json` when decoding fails, or
/// whatever [`Validate::validate`] reports.
///
/// # Examples
/// ```
/// use user_service::inbound::http::users::UserRequest;
/// use user_service::inbound::http::validation::decode_and_validate;
///
/// let body = br#"{"name":"Ada","location":"London","title":"Engineer"}"#;
/// let profile = decode_and_validate::<UserRequest>(body).expect("valid payload");
/// assert_eq!(profile.title(), "Engineer");
///
/// assert!(decode_and_validate::<UserRequest>(b"{").is_err());
/// ```
pub fn decode_and_validate<T>(body: &[u8]) -> Result<T::Output, Error>
where
    T: DeserializeOwned + Validate,
{
    let payload: T = serde_json::from_slice(body).map_err(|err| {
        Error::invalid_request(format!("request body is not valid JSON: {err}"))
            .with_details(json!({ "code": ErrorCode::InvalidJson.as_str() }))
    })?;
    payload.validate()
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("missing required field: {name}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn empty_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must not be empty"))
        .with_code(ErrorCode::EmptyField)
}

pub(crate) fn invalid_object_id_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be a 24 character hex ObjectId"))
        .with_value(ErrorCode::InvalidObjectId, value)
}

/// Map a domain validation failure onto an HTTP validation error.
pub(crate) fn map_user_validation_error(err: UserValidationError) -> Error {
    match err {
        UserValidationError::MissingField { field } => missing_field_error(field.into()),
        UserValidationError::EmptyField { field } => empty_field_error(field.into()),
    }
}

/// Parse the `userId` path segment; malformed ids are always a client error.
pub(crate) fn parse_user_id(value: &str) -> Result<UserId, Error> {
    UserId::parse(value).map_err(|_| invalid_object_id_error(USER_ID_PARAM, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainErrorCode;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct SingleField {
        value: Option<String>,
    }

    impl Validate for SingleField {
        type Output = String;

        fn validate(self) -> Result<String, Error> {
            self.value
                .ok_or_else(|| missing_field_error(FieldName::new("value")))
        }
    }

    fn detail<'a>(err: &'a Error, key: &str) -> Option<&'a str> {
        err.details()
            .and_then(|details| details.get(key))
            .and_then(serde_json::Value::as_str)
    }

    #[rstest]
    fn decode_then_validate_succeeds() {
        let output = decode_and_validate::<SingleField>(br#"{"value":"x"}"#).expect("valid");
        assert_eq!(output, "x");
    }

    #[rstest]
    #[case(b"not json".as_slice(), "invalid_json")]
    #[case(b"{}".as_slice(), "missing_field")]
    fn failures_are_invalid_requests(#[case] body: &[u8], #[case] code: &str) {
        let err = decode_and_validate::<SingleField>(body).expect_err("invalid");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(detail(&err, "code"), Some(code));
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("65f1c0ffee0ddba11dea5e1z")]
    fn malformed_ids_are_rejected(#[case] raw: &str) {
        let err = parse_user_id(raw).expect_err("malformed id");
        assert_eq!(err.code(), DomainErrorCode::InvalidRequest);
        assert_eq!(detail(&err, "field"), Some("userId"));
        assert_eq!(detail(&err, "value"), Some(raw));
        assert_eq!(detail(&err, "code"), Some("invalid_object_id"));
    }

    #[rstest]
    #[case(UserValidationError::MissingField { field: UserField::Title }, "title", "missing_field")]
    #[case(UserValidationError::EmptyField { field: UserField::Name }, "name", "empty_field")]
    fn field_errors_name_the_field(
        #[case] err: UserValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let err = map_user_validation_error(err);
        assert_eq!(detail(&err, "field"), Some(field));
        assert_eq!(detail(&err, "code"), Some(code));
    }
}
