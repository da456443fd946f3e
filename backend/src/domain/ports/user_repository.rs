//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{User, UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The operation did not finish within its time budget.
        Timeout { operation: String } => "user repository {operation} timed out",
        /// A stored document could not be turned back into a user.
        Decode { message: String } => "user repository decode failed: {message}",
    }
}

/// Match and modification counts reported by a field replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateCounts {
    /// Documents matching the filter.
    pub matched: u64,
    /// Documents whose contents actually changed.
    pub modified: u64,
}

/// Port for reading and writing user documents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert exactly one new user and return its stored identifier.
    async fn insert(&self, user: &User) -> Result<UserId, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Overwrite all descriptive fields of the user with `id`.
    ///
    /// Zero matches is not an error; callers inspect [`UpdateCounts::matched`].
    async fn replace_profile(
        &self,
        id: &UserId,
        profile: &UserProfile,
    ) -> Result<UpdateCounts, UserPersistenceError>;

    /// Delete the user with `id`, returning how many documents were removed.
    async fn delete_by_id(&self, id: &UserId) -> Result<u64, UserPersistenceError>;

    /// Every stored user in store order.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;
}
