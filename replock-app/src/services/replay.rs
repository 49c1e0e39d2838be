//! Recorded-frame replay: the CLI's stand-in for the camera and pose
//! detector. A recording is a JSON array of frames, each carrying the
//! raw landmark readings the detector produced.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use replock_core::models::{Landmark, PoseFrame};
use replock_core::pipeline;
use replock_core::session::CounterSession;

/// One landmark reading as stored in a recording file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedLandmark {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub confidence: f32,
}

/// One recorded frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordedFrame {
    pub timestamp_ms: u64,
    pub landmarks: Vec<RecordedLandmark>,
}

/// Load a recording and rebuild the pose frames the detector produced
pub fn load_recording(path: &Path) -> Result<Vec<PoseFrame>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read recording {}", path.display()))?;

    let recorded: Vec<RecordedFrame> =
        serde_json::from_str(&contents).context("Failed to parse recording")?;

    let frames = recorded
        .into_iter()
        .enumerate()
        .map(|(i, frame)| {
            let landmarks = frame
                .landmarks
                .into_iter()
                .map(|lm| Landmark::new(lm.x, lm.y, lm.confidence, lm.name))
                .collect();
            PoseFrame::new(frame.timestamp_ms, i as u32, landmarks)
        })
        .collect();

    Ok(frames)
}

/// Feed recorded frames through the core pipeline and return the session
/// for final inspection
pub async fn replay(session: CounterSession, frames: Vec<PoseFrame>) -> Result<CounterSession> {
    let (tx, rx) = mpsc::channel(pipeline::FRAME_CHANNEL_CAPACITY);
    let pipeline_task = tokio::spawn(pipeline::run(session, rx));

    for frame in frames {
        // A closed channel means the pipeline already exited (stop)
        if tx.send(frame).await.is_err() {
            break;
        }
    }
    drop(tx);

    pipeline_task.await.context("Frame pipeline task failed")
}
