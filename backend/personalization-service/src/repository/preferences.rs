use crate::domain::{BehaviorProfile, ConsentState, PersonalizationContext, UserPreferences};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Durable per-user personalization storage: one row per user holding the
/// consent flag and the preference/behavior blobs.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn get_consent(&self, user_id: Uuid) -> Result<Option<ConsentState>>;

    async fn put_consent(&self, user_id: Uuid, state: ConsentState) -> Result<()>;

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<BehaviorProfile>>;

    async fn put_profile(&self, user_id: Uuid, profile: &BehaviorProfile) -> Result<()>;

    async fn get_preferences(&self, user_id: Uuid) -> Result<Option<UserPreferences>>;

    async fn put_preferences(&self, user_id: Uuid, prefs: &UserPreferences) -> Result<()>;

    /// Accumulate reading minutes and bump the last-active timestamp.
    /// Returns the new total.
    async fn add_reading_time(&self, user_id: Uuid, additional_minutes: i32) -> Result<i32>;
}

/// Load a full personalization context in one read. A user without active
/// consent gets the empty context regardless of what is stored.
pub async fn load_context(
    repo: &dyn PreferenceRepository,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<PersonalizationContext> {
    let consent = repo.get_consent(user_id).await?;
    if !consent.map(|c| c.is_active(now)).unwrap_or(false) {
        return Ok(PersonalizationContext::without_consent());
    }

    let profile = repo.get_profile(user_id).await?.unwrap_or_default();
    let preferences = repo.get_preferences(user_id).await?.unwrap_or_default();

    Ok(PersonalizationContext {
        consented: true,
        profile,
        preferences,
    })
}

#[derive(sqlx::FromRow)]
struct ConsentRow {
    consent_granted: bool,
    consent_expires_at: DateTime<Utc>,
}

/// PostgreSQL preference repository
#[derive(Clone)]
pub struct PostgresPreferenceRepository {
    pool: PgPool,
}

impl PostgresPreferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PreferenceRepository for PostgresPreferenceRepository {
    async fn get_consent(&self, user_id: Uuid) -> Result<Option<ConsentState>> {
        let row = sqlx::query_as::<_, ConsentRow>(
            r#"
            SELECT consent_granted, consent_expires_at
            FROM user_preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch consent")?;

        Ok(row.map(|r| ConsentState {
            granted: r.consent_granted,
            expires_at: r.consent_expires_at,
        }))
    }

    async fn put_consent(&self, user_id: Uuid, state: ConsentState) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id, consent_granted, consent_expires_at, updated_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                consent_granted = EXCLUDED.consent_granted,
                consent_expires_at = EXCLUDED.consent_expires_at,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(state.granted)
        .bind(state.expires_at)
        .execute(&self.pool)
        .await
        .context("Failed to store consent")?;

        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<BehaviorProfile>> {
        let blob: Option<serde_json::Value> = sqlx::query_scalar(
            r#"
            SELECT behavior FROM user_preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch behavior profile")?
        .flatten();

        match blob {
            Some(value) => Ok(Some(
                serde_json::from_value(value).context("Malformed behavior profile blob")?,
            )),
            None => Ok(None),
        }
    }

    async fn put_profile(&self, user_id: Uuid, profile: &BehaviorProfile) -> Result<()> {
        let blob = serde_json::to_value(profile).context("Failed to encode behavior profile")?;

        sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id, behavior, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                behavior = EXCLUDED.behavior,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(blob)
        .execute(&self.pool)
        .await
        .context("Failed to store behavior profile")?;

        Ok(())
    }

    async fn get_preferences(&self, user_id: Uuid) -> Result<Option<UserPreferences>> {
        let blob: Option<serde_json::Value> = sqlx::query_scalar(
            r#"
            SELECT preferences FROM user_preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch preferences")?
        .flatten();

        match blob {
            Some(value) => Ok(Some(
                serde_json::from_value(value).context("Malformed preferences blob")?,
            )),
            None => Ok(None),
        }
    }

    async fn put_preferences(&self, user_id: Uuid, prefs: &UserPreferences) -> Result<()> {
        let blob = serde_json::to_value(prefs).context("Failed to encode preferences")?;

        sqlx::query(
            r#"
            INSERT INTO user_preferences (user_id, preferences, updated_at)
            VALUES ($1, $2, NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                preferences = EXCLUDED.preferences,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(blob)
        .execute(&self.pool)
        .await
        .context("Failed to store preferences")?;

        Ok(())
    }

    async fn add_reading_time(&self, user_id: Uuid, additional_minutes: i32) -> Result<i32> {
        let total: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO user_preferences (user_id, reading_time, last_active_at, updated_at)
            VALUES ($1, $2, NOW(), NOW())
            ON CONFLICT (user_id) DO UPDATE SET
                reading_time = user_preferences.reading_time + EXCLUDED.reading_time,
                last_active_at = NOW(),
                updated_at = NOW()
            RETURNING reading_time
            "#,
        )
        .bind(user_id)
        .bind(additional_minutes)
        .fetch_one(&self.pool)
        .await
        .context("Failed to accumulate reading time")?;

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[tokio::test]
    async fn load_context_without_consent_row_is_empty() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_get_consent().returning(|_| Ok(None));
        // Profile and preferences must not even be read
        repo.expect_get_profile().never();
        repo.expect_get_preferences().never();

        let ctx = load_context(&repo, user(1), Utc::now()).await.unwrap();
        assert_eq!(ctx, PersonalizationContext::without_consent());
    }

    #[tokio::test]
    async fn load_context_with_expired_consent_is_empty() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_get_consent().returning(|_| {
            Ok(Some(ConsentState {
                granted: true,
                expires_at: Utc::now() - chrono::Duration::days(2),
            }))
        });
        repo.expect_get_profile().never();

        let ctx = load_context(&repo, user(1), Utc::now()).await.unwrap();
        assert!(!ctx.consented);
    }

    #[tokio::test]
    async fn load_context_with_consent_reads_stored_blobs() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_get_consent()
            .returning(|_| Ok(Some(ConsentState::granted_now())));
        repo.expect_get_profile().returning(|_| {
            let mut profile = BehaviorProfile::default();
            profile.record_view(Uuid::from_u128(9), Some("Fiction"), None);
            Ok(Some(profile))
        });
        repo.expect_get_preferences().returning(|_| Ok(None));

        let ctx = load_context(&repo, user(1), Utc::now()).await.unwrap();
        assert!(ctx.consented);
        assert_eq!(ctx.profile.recently_viewed_genres, vec!["Fiction"]);
        assert_eq!(ctx.preferences, UserPreferences::default());
    }
}
