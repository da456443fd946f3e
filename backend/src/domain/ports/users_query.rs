//! Driving port for user reads.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch one user by identifier.
    async fn fetch_user(&self, id: &UserId) -> Result<User, Error>;

    /// Every user, in the order the store returns them.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
