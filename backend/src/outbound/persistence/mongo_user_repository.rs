//! MongoDB-backed `UserRepository` implementation.
//!
//! Each method is one bounded call from [`super::document_ops`]; documents are
//! converted through validated domain constructors on the way out.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::Collection;
use mongodb::bson::Document;

use crate::domain::ports::{UpdateCounts, UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, UserProfile, UserValidationError};

use super::document_ops::{self, DEFAULT_OPERATION_TIMEOUT, DocumentStoreError};
use super::gateway::MongoGateway;
use super::models::{UserDocument, id_filter, profile_fields};

/// Collection holding user documents.
pub const USERS_COLLECTION: &str = "users";

/// MongoDB-backed implementation of the user repository port.
#[derive(Clone, Debug)]
pub struct MongoUserRepository {
    collection: Collection<UserDocument>,
    operation_timeout: Duration,
}

impl MongoUserRepository {
    /// Create a repository over the gateway's `users` collection.
    pub fn new(gateway: &MongoGateway) -> Self {
        Self {
            collection: gateway.collection(USERS_COLLECTION),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Set the per-call budget applied to every operation.
    #[must_use]
    pub fn with_operation_timeout(mut self, operation_timeout: Duration) -> Self {
        self.operation_timeout = operation_timeout;
        self
    }
}

/// Map document store errors to domain repository errors.
fn map_store_error(error: DocumentStoreError) -> UserPersistenceError {
    match error {
        DocumentStoreError::Timeout { operation, .. } => UserPersistenceError::timeout(operation),
        DocumentStoreError::Unavailable { message, .. } => {
            UserPersistenceError::connection(message)
        }
        DocumentStoreError::Decode { message } => UserPersistenceError::decode(message),
        DocumentStoreError::NotFound | DocumentStoreError::Driver { .. } => {
            UserPersistenceError::query(error.to_string())
        }
    }
}

fn map_decode_error(error: UserValidationError) -> UserPersistenceError {
    UserPersistenceError::decode(error.to_string())
}

fn all_users() -> Document {
    Document::new()
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: &User) -> Result<UserId, UserPersistenceError> {
        let document = UserDocument::from(user);
        let inserted =
            document_ops::insert_one(&self.collection, &document, self.operation_timeout)
                .await
                .map_err(map_store_error)?;
        inserted.as_object_id().map(UserId::from).ok_or_else(|| {
            UserPersistenceError::decode(format!("inserted id {inserted} is not an ObjectId"))
        })
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        match document_ops::find_one(&self.collection, id_filter(id), self.operation_timeout).await
        {
            Ok(document) => User::try_from(document).map(Some).map_err(map_decode_error),
            Err(DocumentStoreError::NotFound) => Ok(None),
            Err(error) => Err(map_store_error(error)),
        }
    }

    async fn replace_profile(
        &self,
        id: &UserId,
        profile: &UserProfile,
    ) -> Result<UpdateCounts, UserPersistenceError> {
        let summary = document_ops::update_one(
            &self.collection,
            id_filter(id),
            profile_fields(profile),
            self.operation_timeout,
        )
        .await
        .map_err(map_store_error)?;
        Ok(UpdateCounts {
            matched: summary.matched_count,
            modified: summary.modified_count,
        })
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<u64, UserPersistenceError> {
        document_ops::delete_one(&self.collection, id_filter(id), self.operation_timeout)
            .await
            .map_err(map_store_error)
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        document_ops::find(&self.collection, all_users(), self.operation_timeout)
            .await
            .map_err(map_store_error)?
            .into_iter()
            .map(|document| User::try_from(document).map_err(map_decode_error))
            .collect()
    }
}
