//! Frame time
//!
//! Frame time is microseconds since the start of a session. Components that
//! measure holds take it as an argument rather than reading a wall clock.

use std::ops::{Add, Sub};
use std::time::{Duration, Instant};

/// Session-relative timestamp of a camera frame
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameTime(pub u64);

impl FrameTime {
    pub const ZERO: FrameTime = FrameTime(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        FrameTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        FrameTime(millis * 1000)
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> u64 {
        self.0 / 1000
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }
}

impl Add<Duration> for FrameTime {
    type Output = FrameTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        FrameTime(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

/// Elapsed time between two frames; zero if `rhs` is later
impl Sub<FrameTime> for FrameTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: FrameTime) -> Self::Output {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

impl std::fmt::Debug for FrameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "frame({:.3}s)", self.as_secs_f64())
    }
}

/// Monotonic session clock producing [`FrameTime`]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        FrameClock {
            start: Instant::now(),
        }
    }

    pub fn now(&self) -> FrameTime {
        FrameTime::from_micros(self.start.elapsed().as_micros() as u64)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
