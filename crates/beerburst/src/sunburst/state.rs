//! Per-arc view state and transition clock

use std::time::Duration;

use crate::layout::Extent;

/// Geometry bookkeeping for one arc.
///
/// `current` is what is drawn right now. A transition runs from `start` to
/// `target`; `start` is captured from `current` when the transition begins,
/// so a transition interrupted by another click hands over the geometry
/// that was actually on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcView {
    /// Drawn extent
    pub current: Extent,
    /// Extent at the start of the running transition
    pub start: Extent,
    /// Extent at the end of the running transition
    pub target: Extent,
}

impl ArcView {
    /// A view resting on `extent`.
    pub fn at_rest(extent: Extent) -> Self {
        Self {
            current: extent,
            start: extent,
            target: extent,
        }
    }

    /// Begin a new transition from the drawn extent towards `target`.
    pub fn retarget(&mut self, target: Extent) {
        self.start = self.current;
        self.target = target;
    }
}

/// Opacities on screen when the running transition began.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Fade {
    pub(crate) fill: f64,
    pub(crate) label: f64,
}

/// Fixed-duration clock advanced by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    duration: Duration,
    elapsed: Duration,
}

impl Transition {
    /// A transition that has not advanced yet.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Add elapsed time and return the new progress.
    pub fn advance(&mut self, dt: Duration) -> f64 {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
        self.progress()
    }

    /// Linear progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Time left before the transition ends.
    pub fn remaining(&self) -> Duration {
        self.duration.saturating_sub(self.elapsed)
    }

    /// Whether the transition has reached its end.
    pub fn is_done(&self) -> bool {
        self.progress() >= 1.0
    }
}
