//! A counting session: the single owner of the repetition counter state.
//!
//! One session is constructed per workout, fed frames by exactly one
//! pipeline, and discarded on stop. The running count is published
//! through an atomic so UI observers read it without locking; the full
//! (phase, count) pair is only available from the frame pipeline's own
//! context via [`FrameOutcome`].

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use tokio::sync::broadcast;

use crate::counter::{Phase, RepCompleted, RepCounter};
use crate::extractor::FeatureExtractor;
use crate::models::{FrameAngles, PoseFrame};
use crate::thresholds::{ThresholdConfig, ThresholdField, ThresholdStore};

const EVENT_CHANNEL_CAPACITY: usize = 32;

/// Snapshot of the counter taken inside frame processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub phase: Phase,
    pub count: u32,
}

/// Result of evaluating one camera frame
#[derive(Debug, Clone, Copy)]
pub struct FrameOutcome {
    /// The frame's classification
    pub angles: FrameAngles,
    /// Counter state after the frame was applied
    pub state: CounterSnapshot,
    /// Set when this frame completed a repetition
    pub completed: Option<RepCompleted>,
}

type RepObserver = Box<dyn Fn(RepCompleted) + Send + Sync>;

/// Owns the extractor, the state machine and the shared threshold store
/// for one counting session
pub struct CounterSession {
    extractor: FeatureExtractor,
    counter: RepCounter,
    thresholds: Arc<ThresholdStore>,
    published_count: Arc<AtomicU32>,
    active: Arc<AtomicBool>,
    observers: Vec<RepObserver>,
    events: broadcast::Sender<RepCompleted>,
}

impl CounterSession {
    /// Create a session with default extractor and thresholds
    pub fn new() -> Self {
        Self::with_extractor(FeatureExtractor::new())
    }

    /// Create a session with a configured extractor
    pub fn with_extractor(extractor: FeatureExtractor) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            extractor,
            counter: RepCounter::new(),
            thresholds: Arc::new(ThresholdStore::default()),
            published_count: Arc::new(AtomicU32::new(0)),
            active: Arc::new(AtomicBool::new(true)),
            observers: Vec::new(),
            events,
        }
    }

    /// Seed the threshold store, replacing the defaults
    pub fn with_thresholds(self, config: ThresholdConfig) -> Self {
        Self {
            thresholds: Arc::new(ThresholdStore::new(config)),
            ..self
        }
    }

    /// Register a synchronous observer invoked during frame processing
    /// whenever a repetition completes
    pub fn on_rep_completed<F>(&mut self, observer: F)
    where
        F: Fn(RepCompleted) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Subscribe to repetition events from async consumers
    pub fn subscribe(&self) -> broadcast::Receiver<RepCompleted> {
        self.events.subscribe()
    }

    /// Cloneable lock-free view of the running count for UI threads
    pub fn count_handle(&self) -> CountHandle {
        CountHandle {
            count: Arc::clone(&self.published_count),
            active: Arc::clone(&self.active),
        }
    }

    /// Evaluate one frame: extract, classify, advance the state machine.
    ///
    /// The session-active flag is checked immediately before state
    /// mutation, so a frame already in flight when [`stop`](Self::stop)
    /// is called still classifies but its transition is discarded.
    pub fn process_frame(&mut self, frame: &PoseFrame) -> FrameOutcome {
        let thresholds = self.thresholds.get();
        let angles = self.extractor.extract(frame, &thresholds);

        if !self.active.load(Ordering::SeqCst) {
            return FrameOutcome {
                angles,
                state: self.snapshot(),
                completed: None,
            };
        }

        let completed = self.counter.advance(&angles);
        self.published_count
            .store(self.counter.count(), Ordering::SeqCst);

        if let Some(event) = completed {
            for observer in &self.observers {
                observer(event);
            }
            // Fan-out to async subscribers; a lagging or absent receiver
            // must not stall frame processing
            let _ = self.events.send(event);
        }

        FrameOutcome {
            angles,
            state: self.snapshot(),
            completed,
        }
    }

    /// Completed repetitions since the last reset
    pub fn current_count(&self) -> u32 {
        self.counter.count()
    }

    /// Current phase of the state machine
    pub fn current_phase(&self) -> Phase {
        self.counter.phase()
    }

    /// Snapshot of the thresholds in force
    pub fn current_thresholds(&self) -> ThresholdConfig {
        self.thresholds.get()
    }

    /// Shared handle to the threshold store, e.g. for live UI sliders
    pub fn threshold_store(&self) -> Arc<ThresholdStore> {
        Arc::clone(&self.thresholds)
    }

    /// Set one threshold field; applies from the next frame onward
    pub fn set_threshold(&self, field: ThresholdField, value: f32) {
        self.thresholds.set(field, value);
    }

    /// Restore threshold defaults
    pub fn reset_thresholds(&self) {
        self.thresholds.reset_to_defaults();
    }

    /// Return the counter to (Idle, 0). Idempotent.
    pub fn reset(&mut self) {
        self.counter.reset();
        self.published_count.store(0, Ordering::SeqCst);
        tracing::info!("counting session reset");
    }

    /// Stop the session: frames evaluated after this point no longer
    /// mutate counter state
    pub fn stop(&self) {
        self.active.store(false, Ordering::SeqCst);
        tracing::info!(count = self.counter.count(), "counting session stopped");
    }

    /// Whether the session still accepts frames
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            phase: self.counter.phase(),
            count: self.counter.count(),
        }
    }
}

impl Default for CounterSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable, lock-free view of a session's running count
#[derive(Debug, Clone)]
pub struct CountHandle {
    count: Arc<AtomicU32>,
    active: Arc<AtomicBool>,
}

impl CountHandle {
    /// The count as of the most recently applied frame
    pub fn current_count(&self) -> u32 {
        self.count.load(Ordering::SeqCst)
    }

    /// Whether the owning session is still accepting frames
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Landmark, PoseFrame};
    use std::sync::atomic::AtomicUsize;

    fn lm(name: &str, x: f32, y: f32) -> Landmark {
        Landmark::new(x, y, 0.9, name.to_string())
    }

    fn up_frame(n: u32) -> PoseFrame {
        let mut landmarks = Vec::new();
        for (side, dx) in [("left", 0.0), ("right", 10.0)] {
            landmarks.push(lm(&format!("{side}_shoulder"), dx, 0.0));
            landmarks.push(lm(&format!("{side}_elbow"), dx, 1.0));
            landmarks.push(lm(&format!("{side}_wrist"), dx, 2.0));
            landmarks.push(lm(&format!("{side}_hip"), dx + 0.2, 1.0));
        }
        PoseFrame::new(u64::from(n) * 33, n, landmarks)
    }

    fn down_frame(n: u32) -> PoseFrame {
        let mut landmarks = Vec::new();
        for (side, dx) in [("left", 0.0), ("right", 10.0)] {
            landmarks.push(lm(&format!("{side}_shoulder"), dx, 0.0));
            landmarks.push(lm(&format!("{side}_elbow"), dx + 1.0, 1.0));
            landmarks.push(lm(&format!("{side}_wrist"), dx, 1.5));
            landmarks.push(lm(&format!("{side}_hip"), dx, 1.0));
        }
        PoseFrame::new(u64::from(n) * 33, n, landmarks)
    }

    #[test]
    fn test_frame_outcome_carries_snapshot() {
        let mut session = CounterSession::new();

        let outcome = session.process_frame(&up_frame(0));
        assert!(outcome.angles.is_up_position);
        assert_eq!(outcome.state.phase, Phase::Up);
        assert_eq!(outcome.state.count, 0);
        assert!(outcome.completed.is_none());

        session.process_frame(&down_frame(1));
        let outcome = session.process_frame(&up_frame(2));
        assert_eq!(outcome.completed, Some(RepCompleted { count: 1 }));
        assert_eq!(outcome.state.count, 1);
    }

    #[test]
    fn test_observer_fires_synchronously() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut session = CounterSession::new();
        let observed = Arc::clone(&fired);
        session.on_rep_completed(move |event| {
            assert_eq!(event.count, 1);
            observed.fetch_add(1, Ordering::SeqCst);
        });

        session.process_frame(&up_frame(0));
        session.process_frame(&down_frame(1));
        session.process_frame(&up_frame(2));

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_count_handle_tracks_published_count() {
        let mut session = CounterSession::new();
        let handle = session.count_handle();
        assert_eq!(handle.current_count(), 0);

        session.process_frame(&up_frame(0));
        session.process_frame(&down_frame(1));
        session.process_frame(&up_frame(2));

        assert_eq!(handle.current_count(), 1);
        assert!(handle.is_active());
    }

    #[test]
    fn test_stop_discards_in_flight_frame() {
        let mut session = CounterSession::new();
        session.process_frame(&up_frame(0));
        session.process_frame(&down_frame(1));

        session.stop();

        // The frame still classifies, but the transition is discarded
        let outcome = session.process_frame(&up_frame(2));
        assert!(outcome.angles.is_up_position);
        assert!(outcome.completed.is_none());
        assert_eq!(outcome.state.phase, Phase::Down);
        assert_eq!(session.current_count(), 0);
    }

    #[test]
    fn test_reset_clears_count_and_handle() {
        let mut session = CounterSession::new();
        let handle = session.count_handle();

        session.process_frame(&up_frame(0));
        session.process_frame(&down_frame(1));
        session.process_frame(&up_frame(2));
        assert_eq!(handle.current_count(), 1);

        session.reset();
        assert_eq!(session.current_phase(), Phase::Idle);
        assert_eq!(session.current_count(), 0);
        assert_eq!(handle.current_count(), 0);

        session.reset();
        assert_eq!(session.current_count(), 0);
    }

    #[test]
    fn test_threshold_mutation_applies_to_next_frame_only() {
        let mut session = CounterSession::new();

        // Down geometry measures ~72deg elbow, 45deg shoulder
        let outcome = session.process_frame(&down_frame(0));
        assert!(outcome.angles.is_down_position);
        assert_eq!(outcome.state.phase, Phase::Down);

        // Reshape the up window so the same geometry now reads as up
        session.set_threshold(ThresholdField::ElbowUp, 60.0);
        session.set_threshold(ThresholdField::ShoulderUp, 50.0);

        let outcome = session.process_frame(&down_frame(1));
        assert!(outcome.angles.is_up_position);
        // The earlier frame was not reclassified: the machine was in Down,
        // so this up reading completes a cycle
        assert_eq!(outcome.completed, Some(RepCompleted { count: 1 }));

        session.reset_thresholds();
        assert_eq!(session.current_thresholds(), ThresholdConfig::default());
    }
}
