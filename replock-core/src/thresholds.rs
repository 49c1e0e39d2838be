//! Runtime-adjustable hysteresis thresholds for position classification.
//!
//! Down-entry and up-entry cutoffs are distinct so the classifier does not
//! oscillate around a single boundary value. The store performs no
//! validation: callers may set degenerate values (e.g. `elbow_down >=
//! elbow_up`), and any resulting miscounting is deterministic but may not
//! match user intent. Rejecting such configurations is left to the UI
//! boundary.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

/// Elbow angle below which the body counts as in the down position
pub const DEFAULT_ELBOW_DOWN_DEGREES: f32 = 135.0;
/// Elbow angle above which the body counts as in the up position
pub const DEFAULT_ELBOW_UP_DEGREES: f32 = 160.0;
/// Shoulder angle above which the body counts as in the down position
pub const DEFAULT_SHOULDER_DOWN_DEGREES: f32 = 37.0;
/// Shoulder angle below which the body counts as in the up position
pub const DEFAULT_SHOULDER_UP_DEGREES: f32 = 27.0;

/// Snapshot of the four classification thresholds, all in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub elbow_down: f32,
    pub elbow_up: f32,
    pub shoulder_down: f32,
    pub shoulder_up: f32,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            elbow_down: DEFAULT_ELBOW_DOWN_DEGREES,
            elbow_up: DEFAULT_ELBOW_UP_DEGREES,
            shoulder_down: DEFAULT_SHOULDER_DOWN_DEGREES,
            shoulder_up: DEFAULT_SHOULDER_UP_DEGREES,
        }
    }
}

impl ThresholdConfig {
    /// Whether the down/up cutoffs have the ordering the classifier expects
    /// (`elbow_down < elbow_up` and `shoulder_up < shoulder_down`). Under
    /// this ordering the two position flags can never both be true.
    pub fn is_ordered(&self) -> bool {
        self.elbow_down < self.elbow_up && self.shoulder_up < self.shoulder_down
    }
}

/// One of the four mutable threshold fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdField {
    ElbowDown,
    ElbowUp,
    ShoulderDown,
    ShoulderUp,
}

/// Shared threshold store with independent per-field atomic access.
///
/// A UI control thread may write while the frame pipeline reads; no lock
/// is taken and no transactional snapshot is provided, so a reader can
/// observe fields from different update generations. Each field alone is
/// never torn.
#[derive(Debug)]
pub struct ThresholdStore {
    elbow_down: AtomicU32,
    elbow_up: AtomicU32,
    shoulder_down: AtomicU32,
    shoulder_up: AtomicU32,
}

impl ThresholdStore {
    /// Create a store seeded with the given configuration
    pub fn new(config: ThresholdConfig) -> Self {
        Self {
            elbow_down: AtomicU32::new(config.elbow_down.to_bits()),
            elbow_up: AtomicU32::new(config.elbow_up.to_bits()),
            shoulder_down: AtomicU32::new(config.shoulder_down.to_bits()),
            shoulder_up: AtomicU32::new(config.shoulder_up.to_bits()),
        }
    }

    /// Read all four fields. Fields are loaded independently; see the
    /// struct documentation for the consistency contract.
    pub fn get(&self) -> ThresholdConfig {
        ThresholdConfig {
            elbow_down: f32::from_bits(self.elbow_down.load(Ordering::Relaxed)),
            elbow_up: f32::from_bits(self.elbow_up.load(Ordering::Relaxed)),
            shoulder_down: f32::from_bits(self.shoulder_down.load(Ordering::Relaxed)),
            shoulder_up: f32::from_bits(self.shoulder_up.load(Ordering::Relaxed)),
        }
    }

    /// Set one field. Takes effect on the next frame evaluated; already
    /// processed frames are never reclassified. No validation is applied.
    pub fn set(&self, field: ThresholdField, value: f32) {
        let bits = value.to_bits();
        match field {
            ThresholdField::ElbowDown => self.elbow_down.store(bits, Ordering::Relaxed),
            ThresholdField::ElbowUp => self.elbow_up.store(bits, Ordering::Relaxed),
            ThresholdField::ShoulderDown => self.shoulder_down.store(bits, Ordering::Relaxed),
            ThresholdField::ShoulderUp => self.shoulder_up.store(bits, Ordering::Relaxed),
        }
    }

    /// Restore the documented defaults
    pub fn reset_to_defaults(&self) {
        let defaults = ThresholdConfig::default();
        self.set(ThresholdField::ElbowDown, defaults.elbow_down);
        self.set(ThresholdField::ElbowUp, defaults.elbow_up);
        self.set(ThresholdField::ShoulderDown, defaults.shoulder_down);
        self.set(ThresholdField::ShoulderUp, defaults.shoulder_up);
    }
}

impl Default for ThresholdStore {
    fn default() -> Self {
        Self::new(ThresholdConfig::default())
    }
}
