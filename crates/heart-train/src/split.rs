//! Stratified train/test split

use heart_core::{Label, LabeledSample};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Samples partitioned into training and held-out sets
#[derive(Debug, Clone, Default)]
pub struct Split {
    pub train: Vec<LabeledSample>,
    pub test: Vec<LabeledSample>,
}

/// Held-out count for one class: `ceil(count * ratio)`, leaving at least one
/// sample on each side when the class has two or more
fn test_count(count: usize, ratio: f64) -> usize {
    if count < 2 {
        return 0;
    }
    let n = (count as f64 * ratio).ceil() as usize;
    n.clamp(1, count - 1)
}

/// Split each class separately so both sets keep the class proportions.
///
/// Shuffling is seeded, so the same input and seed give the same split.
pub fn stratified_split(samples: &[LabeledSample], test_ratio: f64, seed: u64) -> Split {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut split = Split::default();

    for label in [Label::NotHeart, Label::Heart] {
        let mut class: Vec<LabeledSample> = samples
            .iter()
            .filter(|s| s.label == label)
            .copied()
            .collect();
        class.shuffle(&mut rng);

        let n_test = test_count(class.len(), test_ratio);
        let train = class.split_off(n_test);
        split.test.extend(class);
        split.train.extend(train);
    }

    // Interleave classes for the optimizer
    split.train.shuffle(&mut rng);
    split
}
