use crate::domain::models::User;
use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Repository for user profiles (auth itself lives upstream of this service)
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, user_id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, name, bio, profile_picture, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user")?;

        Ok(user)
    }

    /// Users with at least one shelf entry, for the community page
    pub async fn list_active(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT DISTINCT u.id, u.email, u.name, u.bio, u.profile_picture, u.created_at
            FROM users u
            JOIN user_books ub ON ub.user_id = u.id
            ORDER BY u.name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list active users")?;

        Ok(users)
    }

    pub async fn update_profile(
        &self,
        user_id: Uuid,
        name: Option<&str>,
        bio: Option<&str>,
    ) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                bio = COALESCE($3, bio)
            WHERE id = $1
            RETURNING id, email, name, bio, profile_picture, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(bio)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update user profile")?;

        Ok(user)
    }
}
