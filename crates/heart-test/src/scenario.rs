//! Scripted frame scenarios
//!
//! A scenario is a timed sequence of detections at a fixed frame period,
//! built from segments ("hold a heart for 40 frames", "drop to one hand for
//! 3 frames"). It can be iterated with timestamps or replayed through the
//! [`HandDetector`] seam.

use std::collections::VecDeque;
use std::time::Duration;

use heart_core::{Detection, FrameTime, HandDetector, HeartError, HeartResult};

use crate::{HandGenerator, Pose};

/// Default frame period (30 fps)
pub const DEFAULT_FRAME_PERIOD: Duration = Duration::from_micros(33_333);

/// A timed sequence of detections
#[derive(Debug)]
pub struct Scenario {
    generator: HandGenerator,
    period: Duration,
    frames: Vec<Detection>,
}

impl Scenario {
    pub fn new(seed: u64) -> Self {
        Self::with_period(seed, DEFAULT_FRAME_PERIOD)
    }

    pub fn with_period(seed: u64, period: Duration) -> Self {
        Self {
            generator: HandGenerator::with_seed(seed),
            period,
            frames: Vec::new(),
        }
    }

    /// `frames` frames with both hands in `pose`
    pub fn hold(mut self, pose: Pose, frames: usize) -> Self {
        for _ in 0..frames {
            let detection = self.generator.detection(pose, 2);
            self.frames.push(detection);
        }
        self
    }

    /// `frames` frames with fewer than two hands
    pub fn gap(mut self, hands: usize, frames: usize) -> Self {
        let hands = hands.min(1);
        for _ in 0..frames {
            let detection = self.generator.detection(Pose::OpenPalm, hands);
            self.frames.push(detection);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Time of frame `index`
    pub fn time_of(&self, index: usize) -> FrameTime {
        FrameTime::ZERO + self.period * index as u32
    }

    /// Frames with their timestamps
    pub fn timed(&self) -> impl Iterator<Item = (FrameTime, &Detection)> + '_ {
        self.frames
            .iter()
            .enumerate()
            .map(move |(i, d)| (self.time_of(i), d))
    }

    pub fn into_detector(self) -> ScriptedDetector {
        ScriptedDetector::new(self.frames)
    }
}

/// Detector replaying a fixed list of frames, then reporting input loss
#[derive(Debug, Default)]
pub struct ScriptedDetector {
    frames: VecDeque<Detection>,
    served: usize,
}

impl ScriptedDetector {
    pub fn new(frames: impl IntoIterator<Item = Detection>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            served: 0,
        }
    }

    pub fn served(&self) -> usize {
        self.served
    }
}

impl HandDetector for ScriptedDetector {
    fn detect_next(&mut self) -> HeartResult<Detection> {
        let detection = self
            .frames
            .pop_front()
            .ok_or_else(|| HeartError::InputUnavailable("scripted frames exhausted".into()))?;
        self.served += 1;
        Ok(detection)
    }
}
