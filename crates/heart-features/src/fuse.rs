//! Feature Fuser - two normalized hands in canonical order
//!
//! Hands are ordered by handedness, Left before Right. The sort is stable, so
//! two hands carrying the same label keep their detection order. Only the
//! first two hands after sorting are used.

use heart_core::{FeatureVector, Hand};

use crate::normalize;

/// Minimum number of hands needed for a feature vector
pub const REQUIRED_HANDS: usize = 2;

/// Fuse detected hands into one feature vector.
///
/// Returns `None` when fewer than two hands were detected; downstream
/// components treat that as "not enough hands".
pub fn extract_features(hands: &[Hand]) -> Option<FeatureVector> {
    if hands.len() < REQUIRED_HANDS {
        return None;
    }

    let mut ordered: Vec<&Hand> = hands.iter().collect();
    ordered.sort_by_key(|hand| hand.handedness());

    let first = normalize(ordered[0]);
    let second = normalize(ordered[1]);

    Some(FeatureVector::concat(&first, &second))
}
