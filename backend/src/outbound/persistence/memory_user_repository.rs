//! In-memory `UserRepository` used by tests and local tooling.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UpdateCounts, UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, UserProfile};

/// Thread-safe in-memory user store preserving insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.lock().map(|users| users.len()).unwrap_or_default()
    }

    /// Whether no users are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<User>>, UserPersistenceError> {
        self.users
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<UserId, UserPersistenceError> {
        let mut users = self.lock()?;
        if users.iter().any(|existing| existing.id() == user.id()) {
            return Err(UserPersistenceError::query(format!(
                "duplicate key: {}",
                user.id()
            )));
        }
        users.push(user.clone());
        Ok(*user.id())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let users = self.lock()?;
        Ok(users.iter().find(|user| user.id() == id).cloned())
    }

    async fn replace_profile(
        &self,
        id: &UserId,
        profile: &UserProfile,
    ) -> Result<UpdateCounts, UserPersistenceError> {
        let mut users = self.lock()?;
        let Some(slot) = users.iter_mut().find(|user| user.id() == id) else {
            return Ok(UpdateCounts::default());
        };
        if slot.profile() == profile {
            return Ok(UpdateCounts {
                matched: 1,
                modified: 0,
            });
        }
        *slot = slot.clone().with_profile(profile.clone());
        Ok(UpdateCounts {
            matched: 1,
            modified: 1,
        })
    }

    async fn delete_by_id(&self, id: &UserId) -> Result<u64, UserPersistenceError> {
        let mut users = self.lock()?;
        let before = users.len();
        users.retain(|user| user.id() != id);
        Ok(u64::from(users.len() != before))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn profile(name: &str) -> UserProfile {
        UserProfile::try_new(
            Some(name.to_owned()),
            Some("London".to_owned()),
            Some("Engineer".to_owned()),
        )
        .expect("valid profile")
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn inserted_users_are_found(repo: InMemoryUserRepository) {
        let user = User::new(UserId::generate(), profile("Ada"));
        let id = repo.insert(&user).await.expect("insert");

        assert_eq!(repo.find_by_id(&id).await.expect("find"), Some(user));
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_ids_are_rejected(repo: InMemoryUserRepository) {
        let user = User::new(UserId::generate(), profile("Ada"));
        repo.insert(&user).await.expect("first insert");

        let err = repo.insert(&user).await.expect_err("duplicate");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
        assert_eq!(repo.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn identical_replacement_matches_without_modifying(repo: InMemoryUserRepository) {
        let user = User::new(UserId::generate(), profile("Ada"));
        repo.insert(&user).await.expect("insert");

        let first = repo
            .replace_profile(user.id(), &profile("Grace"))
            .await
            .expect("replace");
        let second = repo
            .replace_profile(user.id(), &profile("Grace"))
            .await
            .expect("replace again");

        assert_eq!(first, UpdateCounts { matched: 1, modified: 1 });
        assert_eq!(second, UpdateCounts { matched: 1, modified: 0 });
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_ids_match_nothing(repo: InMemoryUserRepository) {
        let id = UserId::generate();

        assert_eq!(
            repo.replace_profile(&id, &profile("Ada")).await.expect("replace"),
            UpdateCounts::default()
        );
        assert_eq!(repo.delete_by_id(&id).await.expect("delete"), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn list_keeps_insertion_order(repo: InMemoryUserRepository) {
        let first = User::new(UserId::generate(), profile("Ada"));
        let second = User::new(UserId::generate(), profile("Grace"));
        repo.insert(&first).await.expect("insert");
        repo.insert(&second).await.expect("insert");
        repo.delete_by_id(first.id()).await.expect("delete");

        assert_eq!(repo.list_all().await.expect("list"), vec![second]);
    }
}
