use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A successful unlock: the app stays open until `expires_at`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnlockGrant {
    pub id: String,
    pub package_name: String,
    /// Repetitions performed to earn this grant
    pub reps_performed: u32,
    pub granted_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl UnlockGrant {
    /// Create a grant valid for `unlock_minutes` from `granted_at`
    pub fn new(
        package_name: String,
        reps_performed: u32,
        granted_at: DateTime<Utc>,
        unlock_minutes: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            package_name,
            reps_performed,
            granted_at,
            expires_at: granted_at + Duration::minutes(unlock_minutes),
        }
    }

    /// Whether this grant is still in force at `now`
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
