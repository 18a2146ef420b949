use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Interface for follow-graph storage.
/// The service layer depends on this trait so graph invariants can be tested
/// without a live database.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait FollowRepository: Send + Sync {
    /// Idempotent insert; returns true if a new edge was created.
    async fn create_follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool>;

    /// Idempotent delete; returns true if an edge was removed.
    async fn delete_follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool>;

    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool>;

    /// Users following `user_id`
    async fn list_followers(&self, user_id: Uuid) -> Result<Vec<Uuid>>;

    /// Users that `user_id` follows
    async fn list_following(&self, user_id: Uuid) -> Result<Vec<Uuid>>;

    async fn follower_count(&self, user_id: Uuid) -> Result<i64>;

    async fn following_count(&self, user_id: Uuid) -> Result<i64>;
}

/// PostgreSQL follow-graph repository (source of truth)
#[derive(Clone)]
pub struct PostgresFollowRepository {
    pool: PgPool,
}

impl PostgresFollowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl FollowRepository for PostgresFollowRepository {
    async fn create_follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        let inserted = sqlx::query_as::<_, (Uuid,)>(
            r#"
            INSERT INTO follows (id, follower_id, followed_id, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (follower_id, followed_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(follower_id)
        .bind(followed_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to create follow edge")?;

        Ok(inserted.is_some())
    }

    async fn delete_follow(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        let affected = sqlx::query(
            r#"
            DELETE FROM follows
            WHERE follower_id = $1 AND followed_id = $2
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .execute(&self.pool)
        .await
        .context("Failed to delete follow edge")?
        .rows_affected();

        Ok(affected > 0)
    }

    async fn is_following(&self, follower_id: Uuid, followed_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM follows
                WHERE follower_id = $1 AND followed_id = $2
            )
            "#,
        )
        .bind(follower_id)
        .bind(followed_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to check follow status")?;

        Ok(exists)
    }

    async fn list_followers(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT follower_id FROM follows
            WHERE followed_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list followers")?;

        Ok(ids)
    }

    async fn list_following(&self, user_id: Uuid) -> Result<Vec<Uuid>> {
        let ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT followed_id FROM follows
            WHERE follower_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list following")?;

        Ok(ids)
    }

    async fn follower_count(&self, user_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM follows
            WHERE followed_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count followers")?;

        Ok(count)
    }

    async fn following_count(&self, user_id: Uuid) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM follows
            WHERE follower_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to count following")?;

        Ok(count)
    }
}
