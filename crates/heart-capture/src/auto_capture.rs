//! Auto-Capture State Machine - one sample per sustained hold
//!
//! INVARIANT: at most one captured sample is pending at a time. While a
//! sample is pending, new detections neither overwrite it nor restart the
//! hold timer.

use std::time::Duration;

use heart_core::{FeatureVector, FrameTime, HeartError, HeartResult, Label, LabeledSample};
use tracing::{debug, info};

/// Default hold before a sample is captured
pub const DEFAULT_HOLD: Duration = Duration::from_secs(3);

/// Auto-capture configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureConfig {
    /// How long two hands must stay visible before capturing
    pub hold: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self { hold: DEFAULT_HOLD }
    }
}

/// Auto-capture state
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureState {
    /// No hold in progress
    Idle,
    /// Two hands visible since `since`
    Accumulating { since: FrameTime },
    /// Frozen snapshot waiting for a label
    Captured { features: FeatureVector },
}

/// What a single observed frame did to the state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CaptureEvent {
    /// Nothing in progress, nothing started
    Idle,
    /// Hold running; `remaining` until capture
    Holding { remaining: Duration },
    /// Hold completed on this frame; a sample is now pending
    Captured,
    /// Hands lost before the hold completed
    Reset,
    /// A sample is already pending; the frame was ignored
    Pending,
}

/// Debounces two-hand presence into a single captured sample
#[derive(Debug)]
pub struct AutoCapture {
    config: CaptureConfig,
    state: CaptureState,
}

impl AutoCapture {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            state: CaptureState::Idle,
        }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// The frozen snapshot, if one is waiting for a label
    pub fn pending(&self) -> Option<&FeatureVector> {
        match &self.state {
            CaptureState::Captured { features } => Some(features),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending().is_some()
    }

    /// Feed one frame. `features` is `None` when fewer than two hands were seen.
    pub fn observe(&mut self, features: Option<&FeatureVector>, now: FrameTime) -> CaptureEvent {
        if self.is_pending() {
            return CaptureEvent::Pending;
        }

        let Some(features) = features else {
            return match self.state {
                CaptureState::Accumulating { since } => {
                    debug!(held = ?(now - since), "auto-capture hold reset");
                    self.state = CaptureState::Idle;
                    CaptureEvent::Reset
                }
                _ => CaptureEvent::Idle,
            };
        };

        let since = match self.state {
            CaptureState::Accumulating { since } => since,
            _ => {
                debug!(?now, "auto-capture hold started");
                self.state = CaptureState::Accumulating { since: now };
                now
            }
        };

        let elapsed = now - since;
        if elapsed >= self.config.hold {
            // Copy out of the frame-local buffer
            self.state = CaptureState::Captured {
                features: *features,
            };
            info!(held = ?elapsed, "auto-capture sample captured");
            CaptureEvent::Captured
        } else {
            CaptureEvent::Holding {
                remaining: self.config.hold - elapsed,
            }
        }
    }

    /// Label the pending snapshot and return to idle.
    ///
    /// Fails with [`HeartError::NoPendingCapture`] when nothing is pending;
    /// the state is left untouched in that case.
    pub fn confirm(&mut self, label: Label) -> HeartResult<LabeledSample> {
        let features = *self.pending().ok_or(HeartError::NoPendingCapture)?;
        self.state = CaptureState::Idle;
        info!(label = label.name(), "auto-capture sample labeled");
        Ok(LabeledSample::new(features, label))
    }

    /// Human-readable status line for the current state
    pub fn status(&self, now: FrameTime) -> String {
        match &self.state {
            CaptureState::Idle => "Show 2 hands to start auto-capture".to_string(),
            CaptureState::Accumulating { since } => {
                let remaining = self.config.hold.saturating_sub(now - *since);
                format!("Hold both hands steady: {:.1}s", remaining.as_secs_f64())
            }
            CaptureState::Captured { .. } => {
                "Sample captured! Confirm as heart or not-heart".to_string()
            }
        }
    }
}

impl Default for AutoCapture {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}
