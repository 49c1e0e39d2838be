//! Shared frame builders for integration tests.
//!
//! Geometry is synthetic but internally consistent: the "up" pose
//! measures ~180deg elbow / ~11deg shoulder, the "down" pose ~72deg
//! elbow / 45deg shoulder, and the "transitioning" pose holds the elbow
//! at ~150deg, between the default cutoffs.

use replock_core::models::{Landmark, PoseFrame};

pub fn lm(name: &str, x: f32, y: f32) -> Landmark {
    Landmark::new(x, y, 0.9, name.to_string())
}

fn bilateral(n: u32, joints: &[(&str, f32, f32)]) -> PoseFrame {
    let mut landmarks = Vec::new();
    for (side, dx) in [("left", 0.0_f32), ("right", 10.0_f32)] {
        for (joint, x, y) in joints {
            landmarks.push(lm(&format!("{side}_{joint}"), dx + x, *y));
        }
    }
    PoseFrame::new(u64::from(n) * 33, n, landmarks)
}

pub fn up_frame(n: u32) -> PoseFrame {
    bilateral(
        n,
        &[
            ("shoulder", 0.0, 0.0),
            ("elbow", 0.0, 1.0),
            ("wrist", 0.0, 2.0),
            ("hip", 0.2, 1.0),
        ],
    )
}

pub fn down_frame(n: u32) -> PoseFrame {
    bilateral(
        n,
        &[
            ("shoulder", 0.0, 0.0),
            ("elbow", 1.0, 1.0),
            ("wrist", 0.0, 1.5),
            ("hip", 0.0, 1.0),
        ],
    )
}

pub fn transitioning_frame(n: u32) -> PoseFrame {
    bilateral(
        n,
        &[
            ("shoulder", 2.0, 1.0),
            ("elbow", 1.0, 1.0),
            ("wrist", 0.134, 1.5),
            ("hip", 2.0, 2.0),
        ],
    )
}

/// A frame missing its wrists: must be skipped entirely
pub fn invalid_frame(n: u32) -> PoseFrame {
    let mut frame = up_frame(n);
    frame.landmarks.retain(|lm| !lm.name.ends_with("wrist"));
    frame
}
