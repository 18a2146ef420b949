use crate::repository::PreferenceRepository;
use crate::services::ConsentService;
use std::sync::Arc;
use uuid::Uuid;

/// Records view and search events into the user's behavior profile.
///
/// Tracking is strictly best-effort: without consent every call is a no-op,
/// and persistence failures are logged and swallowed so they can never fail
/// the user action that triggered the event.
#[derive(Clone)]
pub struct BehaviorTracker {
    repo: Arc<dyn PreferenceRepository>,
    consent: ConsentService,
}

impl BehaviorTracker {
    pub fn new(repo: Arc<dyn PreferenceRepository>, consent: ConsentService) -> Self {
        Self { repo, consent }
    }

    pub async fn track_view(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        genre: Option<&str>,
        author: Option<&str>,
    ) {
        if !self.consent.has_consent(user_id).await {
            return;
        }

        let mut profile = match self.repo.get_profile(user_id).await {
            Ok(profile) => profile.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(%user_id, error = %err, "behavior read failed, view not tracked");
                return;
            }
        };

        profile.record_view(book_id, genre, author);

        if let Err(err) = self.repo.put_profile(user_id, &profile).await {
            tracing::warn!(%user_id, error = %err, "behavior write failed, view not tracked");
        }
    }

    pub async fn track_search(&self, user_id: Uuid, query: &str) {
        if query.trim().is_empty() {
            return;
        }
        if !self.consent.has_consent(user_id).await {
            return;
        }

        let mut profile = match self.repo.get_profile(user_id).await {
            Ok(profile) => profile.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(%user_id, error = %err, "behavior read failed, search not tracked");
                return;
            }
        };

        profile.record_search(query);

        if let Err(err) = self.repo.put_profile(user_id, &profile).await {
            tracing::warn!(%user_id, error = %err, "behavior write failed, search not tracked");
        }
    }
}
