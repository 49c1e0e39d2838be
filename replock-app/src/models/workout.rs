use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One completed counting session, kept for stats and log export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    pub total_reps: u32,
    pub duration_seconds: u64,
    /// Package the workout was unlocking, if any
    pub target_package: Option<String>,
}

impl WorkoutRecord {
    /// Create a record with generated ID, dated now
    pub fn new(total_reps: u32, duration_seconds: u64, target_package: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: Utc::now(),
            total_reps,
            duration_seconds,
            target_package,
        }
    }
}
