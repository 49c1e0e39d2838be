//! Push-up counting kernel: per-frame pose landmarks in, a debounced,
//! monotonically increasing repetition count out, plus the unlock gate
//! that turns counts into app-unlock decisions.
//!
//! The pose detector itself is an external oracle; this crate starts at
//! the landmark set it produces each frame. There is no wire protocol,
//! file format or CLI surface here; `replock-app` provides the glue.

pub mod counter;
pub mod extractor;
pub mod geometry;
pub mod models;
pub mod pipeline;
pub mod session;
pub mod thresholds;
pub mod unlock;

pub use counter::{Phase, RepCompleted, RepCounter};
pub use extractor::FeatureExtractor;
pub use models::{BodyJoint, FrameAngles, Landmark, PoseFrame};
pub use session::{CountHandle, CounterSession, CounterSnapshot, FrameOutcome};
pub use thresholds::{ThresholdConfig, ThresholdField, ThresholdStore};
pub use unlock::UnlockDecision;
