//! Pose feature extraction: one frame of landmarks in, a classified
//! [`FrameAngles`] out.
//!
//! The extractor gates on landmark completeness and confidence, averages
//! the left/right elbow and shoulder angles to stabilize against
//! single-side occlusion, and evaluates the down/up position flags
//! against the thresholds in force for the frame. The elbow and shoulder
//! signals are tested conjunctively: shoulder angle captures the
//! torso-arm relationship that distinguishes a push-up from leaning
//! toward the camera.

use crate::geometry::angle_at;
use crate::models::{BodyJoint, FrameAngles, Landmark, PoseFrame};
use crate::thresholds::ThresholdConfig;

/// Extracts the elbow/shoulder angle pair from a pose frame
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    /// Minimum confidence for a landmark to participate
    min_confidence: f32,
}

impl FeatureExtractor {
    /// Create an extractor with the default confidence threshold (0.5)
    pub fn new() -> Self {
        Self {
            min_confidence: 0.5,
        }
    }

    /// Set the confidence threshold for landmark filtering
    ///
    /// Default: 0.5
    /// Range: 0.0 - 1.0
    pub fn with_confidence_threshold(mut self, threshold: f32) -> Self {
        self.min_confidence = threshold.clamp(0.0, 1.0);
        self
    }

    /// Classify one frame against the given thresholds.
    ///
    /// Returns an invalid [`FrameAngles`] when any required joint is
    /// missing or below the confidence threshold, or when the measured
    /// angles are degenerate. Invalid frames are skipped by the state
    /// machine; they are never an error.
    pub fn extract(&self, frame: &PoseFrame, thresholds: &ThresholdConfig) -> FrameAngles {
        let joints = match self.required_joints(frame) {
            Some(joints) => joints,
            None => {
                tracing::trace!(
                    frame = frame.frame_number,
                    "skipping frame with missing or low-confidence landmarks"
                );
                return FrameAngles::invalid();
            }
        };

        let left_elbow = angle_at(
            joints.left_shoulder.position(),
            joints.left_elbow.position(),
            joints.left_wrist.position(),
        );
        let right_elbow = angle_at(
            joints.right_shoulder.position(),
            joints.right_elbow.position(),
            joints.right_wrist.position(),
        );
        let left_shoulder = angle_at(
            joints.left_elbow.position(),
            joints.left_shoulder.position(),
            joints.left_hip.position(),
        );
        let right_shoulder = angle_at(
            joints.right_elbow.position(),
            joints.right_shoulder.position(),
            joints.right_hip.position(),
        );

        // A 0.0 reading is the zero-length-vector fallback from angle_at:
        // the joint could not be measured, so the frame is dropped rather
        // than averaged into a misleading value.
        let components = [left_elbow, right_elbow, left_shoulder, right_shoulder];
        if components.iter().any(|a| *a == 0.0 || !a.is_finite()) {
            tracing::trace!(
                frame = frame.frame_number,
                "skipping frame with degenerate joint geometry"
            );
            return FrameAngles::invalid();
        }

        let elbow_angle = (left_elbow + right_elbow) / 2.0;
        let shoulder_angle = (left_shoulder + right_shoulder) / 2.0;

        if !elbow_angle.is_finite() || !shoulder_angle.is_finite() {
            return FrameAngles::invalid();
        }

        let is_down_position =
            elbow_angle < thresholds.elbow_down && shoulder_angle > thresholds.shoulder_down;
        let is_up_position =
            elbow_angle > thresholds.elbow_up && shoulder_angle < thresholds.shoulder_up;

        FrameAngles {
            elbow_angle,
            shoulder_angle,
            valid: true,
            is_down_position,
            is_up_position,
        }
    }

    /// Collect the eight required joints, or None if any is unusable
    fn required_joints<'a>(&self, frame: &'a PoseFrame) -> Option<RequiredJoints<'a>> {
        let get = |joint: BodyJoint| {
            frame
                .joint(joint)
                .filter(|lm| lm.is_valid(self.min_confidence))
        };

        Some(RequiredJoints {
            left_shoulder: get(BodyJoint::LeftShoulder)?,
            right_shoulder: get(BodyJoint::RightShoulder)?,
            left_elbow: get(BodyJoint::LeftElbow)?,
            right_elbow: get(BodyJoint::RightElbow)?,
            left_wrist: get(BodyJoint::LeftWrist)?,
            right_wrist: get(BodyJoint::RightWrist)?,
            left_hip: get(BodyJoint::LeftHip)?,
            right_hip: get(BodyJoint::RightHip)?,
        })
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}

struct RequiredJoints<'a> {
    left_shoulder: &'a Landmark,
    right_shoulder: &'a Landmark,
    left_elbow: &'a Landmark,
    right_elbow: &'a Landmark,
    left_wrist: &'a Landmark,
    right_wrist: &'a Landmark,
    left_hip: &'a Landmark,
    right_hip: &'a Landmark,
}
