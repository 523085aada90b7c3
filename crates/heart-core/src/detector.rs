//! Detector seam
//!
//! The hand-landmark detector is external. Whatever owns the camera and the
//! model hands back one [`Detection`] per frame through [`HandDetector`].

use crate::{Hand, HeartResult};

/// All hands found in one camera frame, in detector enumeration order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    pub hands: Vec<Hand>,
}

impl Detection {
    pub fn new(hands: Vec<Hand>) -> Self {
        Self { hands }
    }

    /// A frame in which nothing was detected
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }
}

/// Per-frame source of hand detections.
///
/// Each call blocks until the next frame has been captured and run through
/// the detector. An error means input is unavailable and the run loop must
/// stop; there are no retries.
pub trait HandDetector {
    fn detect_next(&mut self) -> HeartResult<Detection>;
}
