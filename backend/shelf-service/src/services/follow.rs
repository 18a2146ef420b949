use crate::error::{AppError, Result};
use crate::repository::FollowRepository;
use std::sync::Arc;
use uuid::Uuid;

/// Follow-graph operations with the invariants the storage layer cannot
/// express: no self-loops, idempotent follow/unfollow.
#[derive(Clone)]
pub struct FollowService {
    repo: Arc<dyn FollowRepository>,
}

impl FollowService {
    pub fn new(repo: Arc<dyn FollowRepository>) -> Self {
        Self { repo }
    }

    /// Follow a user. Following someone already followed is a no-op, not an
    /// error; following yourself is rejected.
    /// Returns true if a new edge was created.
    pub async fn follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        if follower_id == followed_id {
            return Err(AppError::InvalidOperation(
                "cannot follow yourself".to_string(),
            ));
        }

        let created = self.repo.create_follow(follower_id, followed_id).await?;
        if created {
            tracing::debug!(%follower_id, %followed_id, "follow edge created");
        }
        Ok(created)
    }

    /// Unfollow a user. Removing an absent edge is a benign no-op.
    pub async fn unfollow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        let removed = self.repo.delete_follow(follower_id, followed_id).await?;
        Ok(removed)
    }

    pub async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        Ok(self.repo.is_following(follower_id, followed_id).await?)
    }

    pub async fn list_followers(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(self.repo.list_followers(user_id).await?)
    }

    pub async fn list_following(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        Ok(self.repo.list_following(user_id).await?)
    }

    pub async fn follower_count(&self, user_id: Uuid) -> Result<i64> {
        Ok(self.repo.follower_count(user_id).await?)
    }

    pub async fn following_count(&self, user_id: Uuid) -> Result<i64> {
        Ok(self.repo.following_count(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::follows::MockFollowRepository;

    fn user(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[tokio::test]
    async fn self_follow_is_rejected() {
        let repo = MockFollowRepository::new();
        let service = FollowService::new(Arc::new(repo));

        let err = service.follow(user(1), user(1)).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidOperation(_)));
    }

    #[tokio::test]
    async fn self_follow_never_reaches_storage() {
        let mut repo = MockFollowRepository::new();
        repo.expect_create_follow().never();
        let service = FollowService::new(Arc::new(repo));

        let _ = service.follow(user(7), user(7)).await;
    }

    #[tokio::test]
    async fn duplicate_follow_is_a_noop() {
        let mut repo = MockFollowRepository::new();
        let mut first = true;
        repo.expect_create_follow()
            .times(2)
            .returning(move |_, _| {
                let created = first;
                first = false;
                Ok(created)
            });
        let service = FollowService::new(Arc::new(repo));

        assert!(service.follow(user(1), user(2)).await.unwrap());
        assert!(!service.follow(user(1), user(2)).await.unwrap());
    }

    #[tokio::test]
    async fn unfollow_missing_edge_is_a_noop() {
        let mut repo = MockFollowRepository::new();
        repo.expect_delete_follow().returning(|_, _| Ok(false));
        let service = FollowService::new(Arc::new(repo));

        let removed = service.unfollow(user(1), user(2)).await.unwrap();
        assert!(!removed);
    }
}
