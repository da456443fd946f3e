//! User domain service.
//!
//! Implements the user driving ports on top of a [`UserRepository`]. This is
//! where ids are assigned, updates are confirmed by re-reading the document,
//! and zero-match outcomes become `not_found` errors. Failures are logged by
//! the inbound adapter that reports them.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    UserCreated, UserDeleted, UserPersistenceError, UserRepository, UserUpdated, UsersCommand,
    UsersQuery,
};
use crate::domain::{Error, User, UserId, UserProfile};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::Timeout { operation } => {
            Error::internal(format!("user repository {operation} timed out"))
        }
        UserPersistenceError::Decode { message } => {
            Error::internal(format!("stored user could not be decoded: {message}"))
        }
    }
}

fn user_not_found(id: &UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

/// User service implementing [`UsersCommand`] and [`UsersQuery`].
#[derive(Clone)]
pub struct UserService<R> {
    user_repo: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(user_repo: Arc<R>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, profile: UserProfile) -> Result<UserCreated, Error> {
        let user = User::new(UserId::generate(), profile);
        let inserted_id = self
            .user_repo
            .insert(&user)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %inserted_id, "user created");
        Ok(UserCreated { inserted_id })
    }

    async fn update_user(&self, id: &UserId, profile: UserProfile) -> Result<UserUpdated, Error> {
        let counts = self
            .user_repo
            .replace_profile(id, &profile)
            .await
            .map_err(map_repository_error)?;
        if counts.matched == 0 {
            return Err(user_not_found(id));
        }

        let user = self
            .user_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::internal(format!("user {id} disappeared after update")))?;

        info!(user_id = %id, modified = counts.modified, "user updated");
        Ok(UserUpdated {
            matched_count: counts.matched,
            modified_count: counts.modified,
            user,
        })
    }

    async fn delete_user(&self, id: &UserId) -> Result<UserDeleted, Error> {
        let deleted_count = self
            .user_repo
            .delete_by_id(id)
            .await
            .map_err(map_repository_error)?;
        if deleted_count == 0 {
            return Err(user_not_found(id));
        }

        info!(user_id = %id, "user deleted");
        Ok(UserDeleted { deleted_count })
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn fetch_user(&self, id: &UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| user_not_found(id))
    }

    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.user_repo
            .list_all()
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
