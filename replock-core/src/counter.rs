//! The repetition state machine: a stream of per-frame position
//! classifications in, a debounced repetition count out.
//!
//! Only the Down -> Up transition increments the count, so a full
//! down-then-up cycle is required per repetition; dithering near the up
//! threshold cannot double-count. Invalid frames and transitional frames
//! (both position flags false) hold the current phase.

use serde::{Deserialize, Serialize};

use crate::models::FrameAngles;

/// Discrete state of the repetition state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No position observed yet this session
    Idle,
    /// Arms extended, top of the movement
    Up,
    /// Elbows bent, bottom of the movement
    Down,
    /// Reserved for a future N-consecutive-frame debounce; nothing routes
    /// into this state yet. Behaves like `Down` if entered.
    GoingUp,
    /// Reserved for a future N-consecutive-frame debounce; nothing routes
    /// into this state yet. Behaves like `Up` if entered.
    GoingDown,
}

/// Emitted when a full down-then-up cycle completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepCompleted {
    /// Running count including this repetition
    pub count: u32,
}

/// Per-session repetition counter. Single owner: exactly one frame
/// pipeline mutates this; concurrent readers go through the session's
/// published count instead.
#[derive(Debug)]
pub struct RepCounter {
    phase: Phase,
    count: u32,
}

impl RepCounter {
    /// Create a counter in its initial state (Idle, 0)
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            count: 0,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Completed repetitions since the last reset
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Advance the machine by one classified frame.
    ///
    /// Invalid frames are dropped with no transition. Within a phase the
    /// flags are checked in a fixed priority order, so a frame where both
    /// flags are true (possible only under degenerate thresholds) resolves
    /// deterministically: `Up` examines the down flag first, `Down`
    /// examines the up flag first.
    pub fn advance(&mut self, angles: &FrameAngles) -> Option<RepCompleted> {
        if !angles.valid {
            return None;
        }

        match self.phase {
            Phase::Idle => {
                if angles.is_up_position {
                    self.transition(Phase::Up);
                } else if angles.is_down_position {
                    // A session may begin at the bottom of the movement;
                    // the down observation still gates the first count.
                    self.transition(Phase::Down);
                }
                None
            }
            Phase::Up | Phase::GoingDown => {
                if angles.is_down_position {
                    self.transition(Phase::Down);
                }
                None
            }
            Phase::Down | Phase::GoingUp => {
                if angles.is_up_position {
                    self.transition(Phase::Up);
                    self.count += 1;
                    tracing::debug!(count = self.count, "repetition completed");
                    Some(RepCompleted { count: self.count })
                } else {
                    None
                }
            }
        }
    }

    /// Return to (Idle, 0). Idempotent, callable at any time.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.count = 0;
    }

    fn transition(&mut self, next: Phase) {
        tracing::trace!(from = ?self.phase, to = ?next, "phase transition");
        self.phase = next;
    }
}

impl Default for RepCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn up() -> FrameAngles {
        FrameAngles {
            elbow_angle: 170.0,
            shoulder_angle: 20.0,
            valid: true,
            is_down_position: false,
            is_up_position: true,
        }
    }

    fn down() -> FrameAngles {
        FrameAngles {
            elbow_angle: 80.0,
            shoulder_angle: 45.0,
            valid: true,
            is_down_position: true,
            is_up_position: false,
        }
    }

    fn transitioning() -> FrameAngles {
        FrameAngles {
            elbow_angle: 150.0,
            shoulder_angle: 30.0,
            valid: true,
            is_down_position: false,
            is_up_position: false,
        }
    }

    fn invalid() -> FrameAngles {
        FrameAngles::invalid()
    }

    fn both() -> FrameAngles {
        FrameAngles {
            elbow_angle: 150.0,
            shoulder_angle: 30.0,
            valid: true,
            is_down_position: true,
            is_up_position: true,
        }
    }

    #[test]
    fn test_initial_state() {
        let counter = RepCounter::new();
        assert_eq!(counter.phase(), Phase::Idle);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_full_cycle_counts_once() {
        let mut counter = RepCounter::new();

        assert!(counter.advance(&up()).is_none());
        assert_eq!(counter.phase(), Phase::Up);

        assert!(counter.advance(&down()).is_none());
        assert_eq!(counter.phase(), Phase::Down);

        let event = counter.advance(&up());
        assert_eq!(event, Some(RepCompleted { count: 1 }));
        assert_eq!(counter.phase(), Phase::Up);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_dwell_in_position_counts_once() {
        let mut counter = RepCounter::new();
        counter.advance(&up());

        // Multi-frame dwell at the bottom, then at the top
        for _ in 0..3 {
            counter.advance(&down());
        }
        for _ in 0..3 {
            counter.advance(&up());
        }

        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_up_without_prior_down_never_counts() {
        let mut counter = RepCounter::new();

        for _ in 0..10 {
            counter.advance(&up());
        }
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.phase(), Phase::Up);

        // A genuine down observation is still required for the first count
        counter.advance(&down());
        counter.advance(&up());
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_transitional_frames_hold_state() {
        let mut counter = RepCounter::new();
        counter.advance(&up());
        counter.advance(&down());

        for _ in 0..5 {
            assert!(counter.advance(&transitioning()).is_none());
        }
        assert_eq!(counter.phase(), Phase::Down);

        assert!(counter.advance(&up()).is_some());
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_invalid_frames_are_dropped() {
        let mut counter = RepCounter::new();
        counter.advance(&up());
        counter.advance(&invalid());
        counter.advance(&down());
        counter.advance(&invalid());
        counter.advance(&invalid());

        assert_eq!(counter.phase(), Phase::Down);
        assert_eq!(counter.count(), 0);

        counter.advance(&up());
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_session_starting_at_the_bottom() {
        let mut counter = RepCounter::new();

        counter.advance(&down());
        assert_eq!(counter.phase(), Phase::Down);

        counter.advance(&up());
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_both_flags_true_priority_order() {
        // Degenerate thresholds can produce both flags at once; the
        // outcome must be deterministic per the phase's priority order.
        let mut counter = RepCounter::new();

        counter.advance(&up());
        counter.advance(&both());
        // In Up the down flag wins
        assert_eq!(counter.phase(), Phase::Down);

        counter.advance(&both());
        // In Down the up flag wins, completing a cycle
        assert_eq!(counter.phase(), Phase::Up);
        assert_eq!(counter.count(), 1);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut counter = RepCounter::new();
        counter.advance(&up());
        counter.advance(&down());
        counter.advance(&up());
        assert_eq!(counter.count(), 1);

        counter.reset();
        assert_eq!(counter.phase(), Phase::Idle);
        assert_eq!(counter.count(), 0);

        counter.reset();
        assert_eq!(counter.phase(), Phase::Idle);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_reserved_phases_route_like_their_counterparts() {
        // GoingUp behaves like Down: an up frame completes the cycle
        let mut counter = RepCounter {
            phase: Phase::GoingUp,
            count: 0,
        };
        let event = counter.advance(&up());
        assert_eq!(event, Some(RepCompleted { count: 1 }));

        // GoingDown behaves like Up: a down frame moves to Down
        let mut counter = RepCounter {
            phase: Phase::GoingDown,
            count: 0,
        };
        counter.advance(&down());
        assert_eq!(counter.phase(), Phase::Down);
    }
}
