use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An application gated behind a push-up requirement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedApp {
    /// Package identifier, e.g. "com.example.social"
    pub package_name: String,
    /// Human-readable name shown in overlays and listings
    pub display_name: String,
    /// Push-ups required per unlock
    pub required_reps: u32,
    /// How long one unlock lasts
    pub unlock_minutes: i64,
    /// Disabled locks are kept but not enforced
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LockedApp {
    /// Create a new lock with timestamps
    pub fn new(
        package_name: String,
        display_name: String,
        required_reps: u32,
        unlock_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            package_name,
            display_name,
            required_reps,
            unlock_minutes,
            enabled: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update lock fields
    pub fn update(
        &mut self,
        required_reps: Option<u32>,
        unlock_minutes: Option<i64>,
        enabled: Option<bool>,
    ) {
        if let Some(reps) = required_reps {
            self.required_reps = reps;
        }
        if let Some(minutes) = unlock_minutes {
            self.unlock_minutes = minutes;
        }
        if let Some(enabled) = enabled {
            self.enabled = enabled;
        }
        self.updated_at = Utc::now();
    }
}
