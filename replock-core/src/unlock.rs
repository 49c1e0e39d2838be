//! The unlock gate: compares a completed-repetition count against a
//! required count. The app-lock policy decides what to do with the
//! outcome; nothing is persisted here.

use serde::{Deserialize, Serialize};

/// Outcome of comparing a rep count against a requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockDecision {
    pub unlocked: bool,
    pub current_count: u32,
    pub required_count: u32,
}

impl UnlockDecision {
    /// Repetitions still owed, zero once unlocked
    pub fn remaining(&self) -> u32 {
        self.required_count.saturating_sub(self.current_count)
    }
}

/// Evaluate the gate. Pure; no side effects, no failure modes.
pub fn evaluate(current_count: u32, required_count: u32) -> UnlockDecision {
    UnlockDecision {
        unlocked: current_count >= required_count,
        current_count,
        required_count,
    }
}
