//! Collection session - frames in, labeled samples out
//!
//! The session owns the auto-capture state machine and the latest frame's
//! feature vector. Controls are applied against a [`SampleSink`]; a control
//! whose precondition fails is rejected without writing anything.

use heart_core::{
    FeatureVector, FrameTime, HeartError, HeartResult, Label, LabeledSample, SampleSink,
};
use tracing::{info, warn};

use crate::{AutoCapture, CaptureConfig, CaptureEvent};

/// User controls available while collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionControl {
    /// End the session
    Quit,
    /// Save the current frame immediately with this label
    LabelNow(Label),
    /// Save the pending auto-captured sample with this label
    ConfirmPending(Label),
}

/// Result of applying a control
#[derive(Debug)]
pub enum ControlOutcome {
    /// A sample was appended to the sink
    Saved { sample: LabeledSample, auto: bool },
    /// The control's precondition was not met; nothing was written
    Rejected(HeartError),
    /// The user asked to stop
    Quit,
}

/// Per-label sample counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounts {
    pub heart: u32,
    pub not_heart: u32,
}

impl SessionCounts {
    fn record(&mut self, label: Label) -> u32 {
        let count = match label {
            Label::Heart => &mut self.heart,
            Label::NotHeart => &mut self.not_heart,
        };
        *count += 1;
        *count
    }

    pub fn total(&self) -> u32 {
        self.heart + self.not_heart
    }
}

/// One data-collection session
#[derive(Debug)]
pub struct CollectionSession {
    capture: AutoCapture,
    /// Feature vector of the latest frame, if it had two hands
    current: Option<FeatureVector>,
    /// Hands detected in the latest frame
    detected: usize,
    /// Time of the latest frame
    now: FrameTime,
    counts: SessionCounts,
    /// Message from the latest control
    notice: Option<String>,
}

impl CollectionSession {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            capture: AutoCapture::new(config),
            current: None,
            detected: 0,
            now: FrameTime::ZERO,
            counts: SessionCounts::default(),
            notice: None,
        }
    }

    /// Record a processed frame and advance auto-capture
    pub fn on_frame(
        &mut self,
        features: Option<FeatureVector>,
        detected: usize,
        now: FrameTime,
    ) -> CaptureEvent {
        self.current = features;
        self.detected = detected;
        self.now = now;
        self.capture.observe(self.current.as_ref(), now)
    }

    /// Apply a user control, appending to `sink` when it produces a sample
    pub fn apply<S: SampleSink>(
        &mut self,
        control: CollectionControl,
        sink: &mut S,
    ) -> HeartResult<ControlOutcome> {
        match control {
            CollectionControl::Quit => Ok(ControlOutcome::Quit),
            CollectionControl::LabelNow(label) => {
                let Some(features) = self.current else {
                    let err = HeartError::NotEnoughHands {
                        detected: self.detected,
                    };
                    warn!("cannot save: {}", err);
                    self.notice = Some("Cannot save: Need 2 hands!".to_string());
                    return Ok(ControlOutcome::Rejected(err));
                };
                let sample = LabeledSample::new(features, label);
                sink.append(&sample)?;
                self.saved(sample, false)
            }
            CollectionControl::ConfirmPending(label) => {
                let Some(features) = self.capture.pending().copied() else {
                    warn!("no auto-captured sample to label");
                    self.notice = Some("No auto-captured sample to label.".to_string());
                    return Ok(ControlOutcome::Rejected(HeartError::NoPendingCapture));
                };
                // Write first: a failed append must not drop the pending sample
                sink.append(&LabeledSample::new(features, label))?;
                let sample = self.capture.confirm(label)?;
                self.saved(sample, true)
            }
        }
    }

    fn saved(&mut self, sample: LabeledSample, auto: bool) -> HeartResult<ControlOutcome> {
        let n = self.counts.record(sample.label);
        let kind = if auto { "AUTO " } else { "" };
        let message = format!("Saved {}{} sample #{}", kind, sample.label.name(), n);
        info!("{}", message);
        self.notice = Some(message);
        Ok(ControlOutcome::Saved { sample, auto })
    }

    pub fn counts(&self) -> SessionCounts {
        self.counts
    }

    pub fn auto_capture(&self) -> &AutoCapture {
        &self.capture
    }

    pub fn has_two_hands(&self) -> bool {
        self.current.is_some()
    }

    /// Detection status line for the latest frame
    pub fn detection_status(&self) -> String {
        if self.has_two_hands() {
            "2 HANDS DETECTED - Ready to capture".to_string()
        } else {
            format!("Need 2 hands (detected: {})", self.detected)
        }
    }

    /// Auto-capture status line for the latest frame
    pub fn capture_status(&self) -> String {
        self.capture.status(self.now)
    }

    /// Message left by the latest control, if any
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }
}

impl Default for CollectionSession {
    fn default() -> Self {
        Self::new(CaptureConfig::default())
    }
}
