//! Body landmark representation for per-frame pose data.
//!
//! Landmarks are produced fresh each frame by the external pose detector
//! and consumed within that frame; nothing here is persisted.

use serde::{Deserialize, Serialize};

/// A detected body joint with position and confidence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Landmark {
    /// X coordinate (normalized 0-1 or pixel coordinates)
    pub x: f32,
    /// Y coordinate (normalized 0-1 or pixel coordinates)
    pub y: f32,
    /// Detection confidence (0-1)
    pub confidence: f32,
    /// Joint name (e.g., "left_shoulder")
    pub name: String,
    /// Whether this landmark is visible (confidence > threshold)
    pub visible: bool,
}

impl Landmark {
    /// Create a new landmark
    pub fn new(x: f32, y: f32, confidence: f32, name: String) -> Self {
        Self {
            x,
            y,
            confidence,
            name,
            visible: confidence > 0.5,
        }
    }

    /// Check if landmark is usable (sufficient confidence, non-negative coordinates)
    pub fn is_valid(&self, min_confidence: f32) -> bool {
        self.confidence >= min_confidence && self.x >= 0.0 && self.y >= 0.0
    }

    /// Position as a point pair
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

/// The joints the push-up detector requires, left and right variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyJoint {
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
}

impl BodyJoint {
    /// Get joint name
    pub fn name(&self) -> &'static str {
        match self {
            Self::LeftShoulder => "left_shoulder",
            Self::RightShoulder => "right_shoulder",
            Self::LeftElbow => "left_elbow",
            Self::RightElbow => "right_elbow",
            Self::LeftWrist => "left_wrist",
            Self::RightWrist => "right_wrist",
            Self::LeftHip => "left_hip",
            Self::RightHip => "right_hip",
        }
    }

    /// All joints required for push-up classification
    pub fn all() -> Vec<Self> {
        vec![
            Self::LeftShoulder,
            Self::RightShoulder,
            Self::LeftElbow,
            Self::RightElbow,
            Self::LeftWrist,
            Self::RightWrist,
            Self::LeftHip,
            Self::RightHip,
        ]
    }
}

/// One frame's landmark set with temporal information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseFrame {
    /// Frame timestamp in milliseconds
    pub timestamp_ms: u64,
    /// Frame number in sequence
    pub frame_number: u32,
    /// Detected landmarks for this frame
    pub landmarks: Vec<Landmark>,
}

impl PoseFrame {
    /// Create a new pose frame
    pub fn new(timestamp_ms: u64, frame_number: u32, landmarks: Vec<Landmark>) -> Self {
        Self {
            timestamp_ms,
            frame_number,
            landmarks,
        }
    }

    /// Get landmark by name
    pub fn get_landmark(&self, name: &str) -> Option<&Landmark> {
        self.landmarks.iter().find(|lm| lm.name == name)
    }

    /// Get landmark for a body joint
    pub fn joint(&self, joint: BodyJoint) -> Option<&Landmark> {
        self.get_landmark(joint.name())
    }

    /// Check if all listed joints are present with sufficient confidence
    pub fn has_joints(&self, joints: &[BodyJoint], min_confidence: f32) -> bool {
        joints
            .iter()
            .all(|j| self.joint(*j).map_or(false, |lm| lm.is_valid(min_confidence)))
    }
}
