//! Fold/unfold state machine.
//!
//! ```text
//!              toggle                      reach 1
//! Idle(Unfolded) ──► Animating(Folded) ──────────► Idle(Folded)
//!       ▲                 │  ▲ toggle                   │
//!       │ reach 0         ▼  │                          │ toggle
//!       └────────── Animating(Unfolded) ◄───────────────┘
//! ```
//!
//! Completion is reported once, as [`FoldTick::Completed`], on the tick
//! that lands on the target.

use serde::{Deserialize, Serialize};

/// Where the fold is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoldTarget {
    Unfolded,
    Folded,
}

impl FoldTarget {
    /// Progress value at rest for this target.
    #[inline]
    pub fn progress(self) -> f32 {
        match self {
            FoldTarget::Unfolded => 0.0,
            FoldTarget::Folded => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            FoldTarget::Unfolded => FoldTarget::Folded,
            FoldTarget::Folded => FoldTarget::Unfolded,
        }
    }
}

/// Animation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldPhase {
    /// Resting at the target's progress.
    Idle(FoldTarget),
    /// Moving toward the target.
    Animating(FoldTarget),
}

impl FoldPhase {
    pub fn target(self) -> FoldTarget {
        match self {
            FoldPhase::Idle(t) | FoldPhase::Animating(t) => t,
        }
    }
}

/// Output of one [`FoldAnimator::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FoldTick {
    /// Nothing in flight. The kernel must not run.
    Idle,
    /// Still moving.
    Advanced { progress: f32 },
    /// Reached the target on this tick.
    Completed { progress: f32 },
}

impl FoldTick {
    /// Progress to deform with, or `None` for an idle frame.
    pub fn progress(&self) -> Option<f32> {
        match *self {
            FoldTick::Idle => None,
            FoldTick::Advanced { progress } | FoldTick::Completed { progress } => Some(progress),
        }
    }
}

/// Drives fold progress toward the current target.
#[derive(Debug, Clone)]
pub struct FoldAnimator {
    progress: f32,
    phase: FoldPhase,
}

impl FoldAnimator {
    /// Starts unfolded and idle.
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            phase: FoldPhase::Idle(FoldTarget::Unfolded),
        }
    }

    /// Flips the target. Mid-animation toggles redirect the motion.
    pub fn toggle(&mut self) -> FoldTarget {
        let target = self.phase.target().flipped();
        self.phase = FoldPhase::Animating(target);
        target
    }

    /// Advances progress by `dt * speed * rate` toward the target.
    ///
    /// Non-finite or negative `dt` counts as zero.
    pub fn tick(&mut self, dt: f32, speed: f32, rate: f32) -> FoldTick {
        let target = match self.phase {
            FoldPhase::Idle(_) => return FoldTick::Idle,
            FoldPhase::Animating(target) => target,
        };

        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let step = dt * speed * rate;
        let goal = target.progress();

        self.progress = if self.progress < goal {
            (self.progress + step).min(goal)
        } else {
            (self.progress - step).max(goal)
        }
        .clamp(0.0, 1.0);

        if self.progress == goal {
            self.phase = FoldPhase::Idle(target);
            FoldTick::Completed {
                progress: self.progress,
            }
        } else {
            FoldTick::Advanced {
                progress: self.progress,
            }
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn phase(&self) -> FoldPhase {
        self.phase
    }

    #[inline]
    pub fn target(&self) -> FoldTarget {
        self.phase.target()
    }

    pub fn is_animating(&self) -> bool {
        matches!(self.phase, FoldPhase::Animating(_))
    }

    /// True when the curtain is heading to (or resting at) folded.
    pub fn is_folded(&self) -> bool {
        self.target() == FoldTarget::Folded
    }
}

impl Default for FoldAnimator {
    fn default() -> Self {
        Self::new()
    }
}
