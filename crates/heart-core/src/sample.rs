//! Labeled samples and the sink they are written to

use crate::{FeatureVector, HeartError, HeartResult};

/// Binary gesture label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    /// Not a heart gesture (0)
    NotHeart,
    /// Heart gesture present (1)
    Heart,
}

impl Label {
    pub fn from_u8(value: u8) -> HeartResult<Self> {
        match value {
            0 => Ok(Label::NotHeart),
            1 => Ok(Label::Heart),
            other => Err(HeartError::Dataset(format!("invalid label {}", other))),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Label::NotHeart => 0,
            Label::Heart => 1,
        }
    }

    /// Display name used in status messages
    pub fn name(self) -> &'static str {
        match self {
            Label::NotHeart => "NOT-HEART",
            Label::Heart => "HEART",
        }
    }
}

/// One dataset row: a feature vector and its label.
///
/// Created at capture time and appended once; never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabeledSample {
    pub features: FeatureVector,
    pub label: Label,
}

impl LabeledSample {
    pub fn new(features: FeatureVector, label: Label) -> Self {
        Self { features, label }
    }
}

/// Append-only destination for labeled samples
pub trait SampleSink {
    fn append(&mut self, sample: &LabeledSample) -> HeartResult<()>;
}

impl SampleSink for Vec<LabeledSample> {
    fn append(&mut self, sample: &LabeledSample) -> HeartResult<()> {
        self.push(*sample);
        Ok(())
    }
}
