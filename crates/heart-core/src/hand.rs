//! Hand landmarks as produced by the hand-landmark detector
//!
//! A detected hand is exactly 21 image-fraction points plus the detector's
//! handedness label. Indices follow the standard hand landmark convention.

use crate::{HeartError, HeartResult};

/// Number of landmarks in a detected hand
pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
/// Middle-finger metacarpophalangeal joint
pub const MIDDLE_MCP: usize = 9;

/// A single 2D landmark in image-fraction coordinates.
///
/// Values are nominally in [0, 1] but are not clamped; the detector may
/// report points slightly outside the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another landmark
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Which physical hand the detector believes it saw.
///
/// `Left` orders before `Right`; feature fusion relies on this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    /// Parse the detector's category name ("Left" / "Right")
    pub fn from_label(label: &str) -> HeartResult<Self> {
        match label {
            "Left" => Ok(Handedness::Left),
            "Right" => Ok(Handedness::Right),
            other => Err(HeartError::UnknownHandedness(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }
}

/// A detected hand: 21 landmarks and a handedness label
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    landmarks: [Landmark; LANDMARK_COUNT],
    handedness: Handedness,
}

impl Hand {
    /// Build a hand from detector output.
    ///
    /// Fails when the detector did not report exactly 21 points. Index
    /// semantics (0 = wrist, 9 = middle MCP) are trusted, not checked.
    pub fn new(points: Vec<Landmark>, handedness: Handedness) -> HeartResult<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|points: Vec<Landmark>| HeartError::InvalidHand {
                landmarks: points.len(),
            })?;
        Ok(Self::from_array(landmarks, handedness))
    }

    pub fn from_array(landmarks: [Landmark; LANDMARK_COUNT], handedness: Handedness) -> Self {
        Self {
            landmarks,
            handedness,
        }
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Landmark 0, the translation anchor
    pub fn wrist(&self) -> Landmark {
        self.landmarks[WRIST]
    }

    /// Landmark 9, the scale anchor
    pub fn middle_mcp(&self) -> Landmark {
        self.landmarks[MIDDLE_MCP]
    }

    /// Apply a point transform to every landmark, keeping handedness
    pub fn map_points(&self, f: impl Fn(Landmark) -> Landmark) -> Hand {
        let mut landmarks = self.landmarks;
        for p in &mut landmarks {
            *p = f(*p);
        }
        Hand::from_array(landmarks, self.handedness)
    }

    /// Same points, relabeled
    pub fn with_handedness(&self, handedness: Handedness) -> Hand {
        Hand::from_array(self.landmarks, handedness)
    }
}
