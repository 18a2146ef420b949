use crate::domain::behavior::BehaviorProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How long a granted consent remains valid
pub const CONSENT_VALID_DAYS: i64 = 365;

/// Explicit opt-in settings a user has chosen (as opposed to tracked
/// behavior). Stored as a JSONB blob; absent fields mean "no preference".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    pub theme: Option<String>,
    pub favorite_genres: Option<Vec<String>>,
    pub view_mode: Option<String>,
    pub sort_order: Option<String>,
}

/// Tracking consent with its expiry. Absent or expired means no consent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentState {
    pub granted: bool,
    pub expires_at: DateTime<Utc>,
}

impl ConsentState {
    pub fn granted_now() -> Self {
        Self {
            granted: true,
            expires_at: Utc::now() + chrono::Duration::days(CONSENT_VALID_DAYS),
        }
    }

    pub fn revoked() -> Self {
        Self {
            granted: false,
            expires_at: Utc::now(),
        }
    }

    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.granted && self.expires_at > now
    }
}

/// Everything personalization needs to know about one user, loaded from the
/// durable store at the start of a request and passed explicitly into every
/// scoring operation. There is no ambient per-user state anywhere else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonalizationContext {
    pub consented: bool,
    pub profile: BehaviorProfile,
    pub preferences: UserPreferences,
}

impl PersonalizationContext {
    /// The context of a user who has not opted in: every signal empty.
    pub fn without_consent() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consent_expires() {
        let state = ConsentState {
            granted: true,
            expires_at: Utc::now() - chrono::Duration::days(1),
        };
        assert!(!state.is_active(Utc::now()));
    }

    #[test]
    fn fresh_consent_is_active_for_a_year() {
        let state = ConsentState::granted_now();
        assert!(state.is_active(Utc::now()));
        assert!(state.is_active(Utc::now() + chrono::Duration::days(364)));
        assert!(!state.is_active(Utc::now() + chrono::Duration::days(366)));
    }
}
