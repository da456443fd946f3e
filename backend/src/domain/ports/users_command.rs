//! Driving port for user mutations.
//!
//! Inbound adapters call this port with already-validated input; the
//! implementation owns id assignment and the not-found policy.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{Error, User, UserId, UserProfile};

/// Outcome of creating a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreated {
    /// Identifier assigned to the new user.
    pub inserted_id: UserId,
}

/// Outcome of replacing a user's descriptive fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdated {
    /// Documents matched by the id filter. Always 1 on success.
    pub matched_count: u64,
    /// Documents whose fields changed; 0 when the update was a no-op.
    pub modified_count: u64,
    /// The user as re-read after the update.
    pub user: User,
}

/// Outcome of deleting a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDeleted {
    /// Documents removed. Always 1 on success.
    pub deleted_count: u64,
}

/// Domain use-case port for creating, updating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Assign a fresh id and persist a new user.
    async fn create_user(&self, profile: UserProfile) -> Result<UserCreated, Error>;

    /// Replace every descriptive field of an existing user.
    async fn update_user(&self, id: &UserId, profile: UserProfile) -> Result<UserUpdated, Error>;

    /// Remove an existing user.
    async fn delete_user(&self, id: &UserId) -> Result<UserDeleted, Error>;
}
