pub mod angles;
pub mod landmark;

pub use angles::FrameAngles;
pub use landmark::{BodyJoint, Landmark, PoseFrame};
