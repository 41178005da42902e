//! Phase-chained property tweening for the fallback dialog.
//!
//! An [`Animation`] advances a sequence of timed phases, linearly
//! interpolating scale and opacity from accumulated frame time. A phase may
//! tween either property, both, or neither (a pure delay). When the final
//! phase's duration is reached the animation holds its end values and fires
//! its completion signal on the *next* advance, never in the same update
//! pass, so completion handlers cannot re-enter the pass that finished the
//! tween.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MotionPhase
// ---------------------------------------------------------------------------

/// One timed phase of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionPhase {
    pub duration_ms: u64,
    /// Start and end scale, applied uniformly to both axes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<(f64, f64)>,
    /// Start and end opacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<(f64, f64)>,
}

impl MotionPhase {
    /// A phase that tweens nothing, used purely as a delay.
    pub fn delay(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            scale: None,
            opacity: None,
        }
    }

    pub fn scale(duration_ms: u64, from: f64, to: f64) -> Self {
        Self {
            duration_ms,
            scale: Some((from, to)),
            opacity: None,
        }
    }

    pub fn scale_opacity(
        duration_ms: u64,
        scale: (f64, f64),
        opacity: (f64, f64),
    ) -> Self {
        Self {
            duration_ms,
            scale: Some(scale),
            opacity: Some(opacity),
        }
    }

    pub fn opacity(duration_ms: u64, from: f64, to: f64) -> Self {
        Self {
            duration_ms,
            scale: None,
            opacity: Some((from, to)),
        }
    }
}

// ---------------------------------------------------------------------------
// AnimationFrame
// ---------------------------------------------------------------------------

/// Property values sampled by one advance. `None` means the current phase
/// does not drive that property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationFrame {
    pub scale: Option<f64>,
    pub opacity: Option<f64>,
    /// One-shot completion signal; true on exactly one advance.
    pub completed: bool,
}

impl AnimationFrame {
    const IDLE: Self = Self {
        scale: None,
        opacity: None,
        completed: false,
    };
}

// ---------------------------------------------------------------------------
// Animation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnimationState {
    Running,
    /// Final phase finished; completion fires on the next advance.
    CompletionPending,
    Completed,
}

/// A running animation over an ordered phase list.
#[derive(Debug, Clone)]
pub struct Animation {
    phases: Vec<MotionPhase>,
    step: usize,
    time_ms: u64,
    state: AnimationState,
}

impl Animation {
    pub fn new(phases: Vec<MotionPhase>) -> Self {
        let state = if phases.is_empty() {
            AnimationState::CompletionPending
        } else {
            AnimationState::Running
        };
        Self {
            phases,
            step: 0,
            time_ms: 0,
            state,
        }
    }

    /// Whether the completion signal has already fired.
    pub fn is_completed(&self) -> bool {
        self.state == AnimationState::Completed
    }

    /// Sample the current phase without advancing time. Used to apply the
    /// first phase's start values when an animation is attached.
    pub fn sample(&self) -> AnimationFrame {
        match self.state {
            AnimationState::Running => self.frame_at(self.step, self.time_ms, false),
            AnimationState::CompletionPending | AnimationState::Completed => {
                AnimationFrame::IDLE
            }
        }
    }

    /// Advance by `delta_ms` of frame time and sample the driven properties.
    pub fn advance(&mut self, delta_ms: u64) -> AnimationFrame {
        match self.state {
            AnimationState::Completed => AnimationFrame::IDLE,
            AnimationState::CompletionPending => {
                self.state = AnimationState::Completed;
                AnimationFrame {
                    completed: true,
                    ..AnimationFrame::IDLE
                }
            }
            AnimationState::Running => {
                self.time_ms += delta_ms;
                loop {
                    let duration = self.phases[self.step].duration_ms;
                    if self.time_ms < duration {
                        break;
                    }
                    if self.step + 1 < self.phases.len() {
                        // Carry excess time into the next phase.
                        self.time_ms -= duration;
                        self.step += 1;
                    } else {
                        self.time_ms = duration;
                        self.state = AnimationState::CompletionPending;
                        break;
                    }
                }
                self.frame_at(self.step, self.time_ms, false)
            }
        }
    }

    fn frame_at(&self, step: usize, time_ms: u64, completed: bool) -> AnimationFrame {
        let phase = &self.phases[step];
        let fraction = if phase.duration_ms == 0 {
            1.0
        } else {
            (time_ms as f64 / phase.duration_ms as f64).min(1.0)
        };
        AnimationFrame {
            scale: phase.scale.map(|(from, to)| from + (to - from) * fraction),
            opacity: phase
                .opacity
                .map(|(from, to)| from + (to - from) * fraction),
            completed,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
