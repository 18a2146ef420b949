use crate::domain::ConsentState;
use crate::error::Result;
use crate::repository::PreferenceRepository;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Gate for all behavior tracking and personalization. Consent is granted
/// for a year at a time; absent or expired consent reads as false.
#[derive(Clone)]
pub struct ConsentService {
    repo: Arc<dyn PreferenceRepository>,
}

impl ConsentService {
    pub fn new(repo: Arc<dyn PreferenceRepository>) -> Self {
        Self { repo }
    }

    /// Whether the user currently consents to tracking. Storage failures
    /// fail closed: personalization is best-effort and a broken store must
    /// read as "not consented", never block the caller.
    pub async fn has_consent(&self, user_id: Uuid) -> bool {
        match self.repo.get_consent(user_id).await {
            Ok(state) => state.map(|c| c.is_active(Utc::now())).unwrap_or(false),
            Err(err) => {
                tracing::warn!(%user_id, error = %err, "consent read failed, treating as denied");
                false
            }
        }
    }

    pub async fn set_consent(&self, user_id: Uuid, granted: bool) -> Result<ConsentState> {
        let state = if granted {
            ConsentState::granted_now()
        } else {
            ConsentState::revoked()
        };
        self.repo.put_consent(user_id, state).await?;

        tracing::info!(%user_id, granted, "tracking consent updated");
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::preferences::MockPreferenceRepository;

    #[tokio::test]
    async fn absent_consent_reads_false() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_get_consent().returning(|_| Ok(None));
        let service = ConsentService::new(Arc::new(repo));

        assert!(!service.has_consent(Uuid::from_u128(1)).await);
    }

    #[tokio::test]
    async fn storage_failure_fails_closed() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_get_consent()
            .returning(|_| Err(anyhow::anyhow!("connection refused")));
        let service = ConsentService::new(Arc::new(repo));

        assert!(!service.has_consent(Uuid::from_u128(1)).await);
    }

    #[tokio::test]
    async fn granted_consent_reads_true() {
        let mut repo = MockPreferenceRepository::new();
        repo.expect_get_consent()
            .returning(|_| Ok(Some(ConsentState::granted_now())));
        let service = ConsentService::new(Arc::new(repo));

        assert!(service.has_consent(Uuid::from_u128(1)).await);
    }
}
