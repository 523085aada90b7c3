//! Synthetic Hands - seeded landmark generator
//!
//! Hands are drawn from a per-pose template expressed in wrist-relative units
//! (wrist at the origin, middle MCP one unit above it), then jittered, rotated,
//! scaled and placed in the frame. Left hands are the mirror image of right
//! hands.

use heart_core::{Detection, Hand, Handedness, Landmark, LANDMARK_COUNT};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Gesture a synthetic hand is posed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    /// Half of a two-hand heart: fingers curled toward the midline
    Heart,
    /// Fingers extended upward
    OpenPalm,
}

/// Right-hand templates, image y growing downward
const HEART_TEMPLATE: [(f32, f32); LANDMARK_COUNT] = [
    (0.0, 0.0),
    (-0.30, -0.15),
    (-0.55, -0.20),
    (-0.80, -0.15),
    (-1.00, -0.05),
    (-0.30, -0.95),
    (-0.60, -1.35),
    (-0.90, -1.45),
    (-1.15, -1.35),
    (0.0, -1.0),
    (-0.30, -1.40),
    (-0.60, -1.50),
    (-0.85, -1.40),
    (0.25, -0.95),
    (0.00, -1.30),
    (-0.25, -1.40),
    (-0.50, -1.30),
    (0.48, -0.85),
    (0.30, -1.15),
    (0.10, -1.25),
    (-0.10, -1.15),
];

const OPEN_PALM_TEMPLATE: [(f32, f32); LANDMARK_COUNT] = [
    (0.0, 0.0),
    (-0.35, -0.20),
    (-0.60, -0.45),
    (-0.80, -0.70),
    (-0.95, -0.90),
    (-0.30, -0.95),
    (-0.35, -1.40),
    (-0.38, -1.70),
    (-0.40, -1.95),
    (0.0, -1.0),
    (0.00, -1.50),
    (0.00, -1.82),
    (0.00, -2.10),
    (0.25, -0.95),
    (0.30, -1.40),
    (0.33, -1.70),
    (0.35, -1.93),
    (0.48, -0.85),
    (0.58, -1.20),
    (0.63, -1.42),
    (0.68, -1.62),
];

impl Pose {
    fn template(self) -> &'static [(f32, f32); LANDMARK_COUNT] {
        match self {
            Pose::Heart => &HEART_TEMPLATE,
            Pose::OpenPalm => &OPEN_PALM_TEMPLATE,
        }
    }
}

/// Seeded generator of plausible detector output
#[derive(Debug)]
pub struct HandGenerator {
    rng: StdRng,
    /// Per-landmark noise, in wrist-relative units
    jitter: f32,
}

impl HandGenerator {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            jitter: 0.05,
        }
    }

    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter;
        self
    }

    /// One hand at a random position, size and small rotation
    pub fn hand(&mut self, pose: Pose, handedness: Handedness) -> Hand {
        let mirror = match handedness {
            Handedness::Right => 1.0,
            Handedness::Left => -1.0,
        };
        let scale: f32 = self.rng.gen_range(0.06..0.14);
        let angle: f32 = self.rng.gen_range(-0.15..0.15);
        let (sin, cos) = angle.sin_cos();
        let wrist = match handedness {
            Handedness::Left => Landmark::new(
                self.rng.gen_range(0.30..0.45),
                self.rng.gen_range(0.60..0.80),
            ),
            Handedness::Right => Landmark::new(
                self.rng.gen_range(0.55..0.70),
                self.rng.gen_range(0.60..0.80),
            ),
        };

        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (i, (p, (tx, ty))) in points.iter_mut().zip(pose.template()).enumerate() {
            let (jx, jy) = if i == 0 || self.jitter == 0.0 {
                (0.0, 0.0)
            } else {
                (
                    self.rng.gen_range(-self.jitter..self.jitter),
                    self.rng.gen_range(-self.jitter..self.jitter),
                )
            };
            let x = (tx + jx) * mirror;
            let y = ty + jy;
            *p = Landmark::new(
                wrist.x + scale * (x * cos - y * sin),
                wrist.y + scale * (x * sin + y * cos),
            );
        }
        Hand::from_array(points, handedness)
    }

    /// Both hands in `pose`, reported Right first as a detector might
    pub fn pair(&mut self, pose: Pose) -> Vec<Hand> {
        let right = self.hand(pose, Handedness::Right);
        let left = self.hand(pose, Handedness::Left);
        vec![right, left]
    }

    /// A detection with `count` hands (0, 1 or 2) in `pose`
    pub fn detection(&mut self, pose: Pose, count: usize) -> Detection {
        let mut hands = self.pair(pose);
        hands.truncate(count);
        Detection::new(hands)
    }
}
