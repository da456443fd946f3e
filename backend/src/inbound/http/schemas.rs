//! OpenAPI schema definitions for domain types and reply envelopes.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The wrappers mirror the JSON produced by the domain types and
//! [`crate::inbound::http::envelope`]; they are never constructed.

#![expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::User`].
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
pub struct UserSchema {
    /// Server-assigned ObjectId as 24 hex characters.
    #[schema(example = "65f1c0ffee0ddba11dea5e11")]
    id: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "London")]
    location: String,
    #[schema(example = "Analyst")]
    title: String,
}

/// Payload returned by `POST /user`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UserCreatedSchema {
    #[schema(example = "65f1c0ffee0ddba11dea5e11")]
    inserted_id: String,
}

/// Payload returned by `PUT /user/{userId}`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UserUpdatedSchema {
    #[schema(example = 1)]
    matched_count: u64,
    /// 0 when the stored fields already matched the request.
    #[schema(example = 1)]
    modified_count: u64,
    user: UserSchema,
}

/// Payload returned by `DELETE /user/{userId}`.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UserDeletedSchema {
    #[schema(example = 1)]
    deleted_count: u64,
}

/// Envelope around [`UserCreatedSchema`].
#[derive(ToSchema)]
pub struct UserCreatedEnvelope {
    #[schema(example = 201)]
    status: u16,
    #[schema(example = "success")]
    message: String,
    data: UserCreatedSchema,
}

/// Envelope around a single user.
#[derive(ToSchema)]
pub struct UserEnvelope {
    #[schema(example = 200)]
    status: u16,
    #[schema(example = "success")]
    message: String,
    data: UserSchema,
}

/// Envelope around every stored user.
#[derive(ToSchema)]
pub struct UsersEnvelope {
    #[schema(example = 200)]
    status: u16,
    #[schema(example = "success")]
    message: String,
    data: Vec<UserSchema>,
}

/// Envelope around [`UserUpdatedSchema`].
#[derive(ToSchema)]
pub struct UserUpdatedEnvelope {
    #[schema(example = 200)]
    status: u16,
    #[schema(example = "success")]
    message: String,
    data: UserUpdatedSchema,
}

/// Envelope around [`UserDeletedSchema`].
#[derive(ToSchema)]
pub struct UserDeletedEnvelope {
    #[schema(example = 200)]
    status: u16,
    #[schema(example = "success")]
    message: String,
    data: UserDeletedSchema,
}

/// Envelope carrying the textual description of a failure.
#[derive(ToSchema)]
pub struct ErrorEnvelope {
    #[schema(example = 400)]
    status: u16,
    #[schema(example = "error")]
    message: String,
    #[schema(example = "missing required field: name")]
    data: String,
}
