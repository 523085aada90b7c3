//! Feature vectors - the classifier's view of a frame
//!
//! Layout of a [`FeatureVector`] (84 values):
//! - 0..42: first hand in canonical order, (x0, y0, x1, y1, ..., x20, y20)
//! - 42..84: second hand, same layout
//!
//! The layout is the dataset's column order and the trained model's input
//! order. Changing it invalidates every collected dataset.

use crate::{HeartError, HeartResult, LANDMARK_COUNT};

/// Values per normalized hand (21 landmarks x 2 coordinates)
pub const NORMALIZED_HAND_LEN: usize = LANDMARK_COUNT * 2;

/// Values per fused two-hand feature vector
pub const FEATURE_LEN: usize = NORMALIZED_HAND_LEN * 2;

/// A translation- and scale-invariant hand, flattened
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedHand(pub [f64; NORMALIZED_HAND_LEN]);

impl NormalizedHand {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Normalized coordinates of landmark `index`
    pub fn point(&self, index: usize) -> (f64, f64) {
        (self.0[index * 2], self.0[index * 2 + 1])
    }
}

/// Two normalized hands in canonical order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_LEN]);

impl FeatureVector {
    /// Concatenate two normalized hands, first then second
    pub fn concat(first: &NormalizedHand, second: &NormalizedHand) -> Self {
        let mut values = [0.0; FEATURE_LEN];
        values[..NORMALIZED_HAND_LEN].copy_from_slice(&first.0);
        values[NORMALIZED_HAND_LEN..].copy_from_slice(&second.0);
        FeatureVector(values)
    }

    /// Rebuild a vector from stored values (dataset rows, fixtures)
    pub fn from_slice(values: &[f64]) -> HeartResult<Self> {
        let values: [f64; FEATURE_LEN] = values.try_into().map_err(|_| {
            HeartError::Dataset(format!(
                "expected {} feature values, got {}",
                FEATURE_LEN,
                values.len()
            ))
        })?;
        Ok(FeatureVector(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The first (Left, when present) hand's values
    pub fn first_hand(&self) -> &[f64] {
        &self.0[..NORMALIZED_HAND_LEN]
    }

    /// The second (Right, when present) hand's values
    pub fn second_hand(&self) -> &[f64] {
        &self.0[NORMALIZED_HAND_LEN..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lengths() {
        assert_eq!(NORMALIZED_HAND_LEN, 42);
        assert_eq!(FEATURE_LEN, 84);
    }

    #[test]
    fn test_concat_order() {
        let first = NormalizedHand([1.0; NORMALIZED_HAND_LEN]);
        let second = NormalizedHand([2.0; NORMALIZED_HAND_LEN]);
        let fv = FeatureVector::concat(&first, &second);

        assert!(fv.first_hand().iter().all(|&v| v == 1.0));
        assert!(fv.second_hand().iter().all(|&v| v == 2.0));
        assert_eq!(fv.as_slice().len(), FEATURE_LEN);
    }

    #[test]
    fn test_from_slice_checks_length() {
        assert!(FeatureVector::from_slice(&[0.0; FEATURE_LEN]).is_ok());
        assert!(FeatureVector::from_slice(&[0.0; 83]).is_err());
    }

    #[test]
    fn test_point_accessor() {
        let mut values = [0.0; NORMALIZED_HAND_LEN];
        values[18] = 0.25;
        values[19] = -1.0;
        let hand = NormalizedHand(values);
        assert_eq!(hand.point(9), (0.25, -1.0));
    }
}
