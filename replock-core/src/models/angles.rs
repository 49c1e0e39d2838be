//! Per-frame angle classification produced by the feature extractor.

use serde::{Deserialize, Serialize};

/// Averaged joint angles for one frame, with the position classification
/// evaluated against the thresholds in force when the frame was processed.
///
/// `valid == false` means the frame contributes nothing to the repetition
/// state machine: required landmarks were missing or low-confidence, or
/// the geometry was degenerate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FrameAngles {
    /// Average of left/right elbow angle in degrees
    pub elbow_angle: f32,
    /// Average of left/right shoulder angle in degrees
    pub shoulder_angle: f32,
    /// Whether this frame carries a usable measurement
    pub valid: bool,
    /// Elbow bent below the down threshold and shoulder opened past it
    pub is_down_position: bool,
    /// Elbow extended past the up threshold and shoulder closed below it
    pub is_up_position: bool,
}

impl FrameAngles {
    /// A frame that could not be measured; skipped by the state machine
    pub fn invalid() -> Self {
        Self {
            elbow_angle: 0.0,
            shoulder_angle: 0.0,
            valid: false,
            is_down_position: false,
            is_up_position: false,
        }
    }

    /// Neither position flag set: the body is between positions
    pub fn is_transitioning(&self) -> bool {
        self.valid && !self.is_down_position && !self.is_up_position
    }
}
