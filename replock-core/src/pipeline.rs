//! The frame pipeline: drives one session from an asynchronous frame
//! source with at-most-one-frame-in-flight semantics.
//!
//! The camera/pose glue owns the sender side of the channel and may run
//! anywhere; frames are marshaled onto this single consumer task before
//! any counter state is touched. Because the transition table is not
//! commutative, frames are applied strictly in arrival order.

use tokio::sync::mpsc;

use crate::models::PoseFrame;
use crate::session::CounterSession;

/// Default bound for frame channels created by callers
pub const FRAME_CHANNEL_CAPACITY: usize = 16;

/// Consume frames until the source closes or the session is stopped,
/// then return the session for final inspection.
///
/// Frame N+1 is never evaluated before frame N's transition has been
/// applied; the sequential receive loop is what enforces it.
pub async fn run(
    mut session: CounterSession,
    mut frames: mpsc::Receiver<PoseFrame>,
) -> CounterSession {
    tracing::info!("frame pipeline started");

    while let Some(frame) = frames.recv().await {
        if !session.is_active() {
            tracing::debug!(frame = frame.frame_number, "dropping frame after stop");
            break;
        }
        session.process_frame(&frame);
    }

    tracing::info!(count = session.current_count(), "frame pipeline finished");
    session
}
