//! Scripted model parts for decision-layer tests

use std::cell::RefCell;
use std::collections::VecDeque;

use heart_core::FeatureVector;
use heart_inference::{FeatureScaler, GestureClassifier};

/// Passes features through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityScaler;

impl FeatureScaler for IdentityScaler {
    fn transform(&self, features: &FeatureVector) -> Vec<f64> {
        features.as_slice().to_vec()
    }
}

/// Returns a fixed sequence of probabilities, one per call.
///
/// Once the script runs out the last value repeats.
#[derive(Debug, Default)]
pub struct ScriptedClassifier {
    script: RefCell<VecDeque<f64>>,
    last: RefCell<f64>,
    calls: RefCell<usize>,
}

impl ScriptedClassifier {
    pub fn new(script: impl IntoIterator<Item = f64>) -> Self {
        Self {
            script: RefCell::new(script.into_iter().collect()),
            last: RefCell::new(0.0),
            calls: RefCell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl GestureClassifier for ScriptedClassifier {
    fn predict_probability(&self, _scaled: &[f64]) -> f64 {
        *self.calls.borrow_mut() += 1;
        if let Some(p) = self.script.borrow_mut().pop_front() {
            *self.last.borrow_mut() = p;
        }
        *self.last.borrow()
    }
}
