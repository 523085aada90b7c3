//! Classifier seams
//!
//! The scaler and classifier are trained together offline and treated as
//! opaque here. Every prediction goes through the scaler first; pairing them
//! in [`GestureModel`] makes skipping that step impossible.

use heart_core::FeatureVector;

/// Feature standardization fitted alongside the classifier
pub trait FeatureScaler {
    fn transform(&self, features: &FeatureVector) -> Vec<f64>;
}

/// Binary classifier over scaled features
pub trait GestureClassifier {
    /// Probability of the positive (heart) class, in [0, 1]
    fn predict_probability(&self, scaled: &[f64]) -> f64;
}

/// A scaler and the classifier trained on its output
#[derive(Debug, Clone)]
pub struct GestureModel<S, C> {
    scaler: S,
    classifier: C,
}

impl<S: FeatureScaler, C: GestureClassifier> GestureModel<S, C> {
    pub fn new(scaler: S, classifier: C) -> Self {
        Self { scaler, classifier }
    }

    /// Scale, classify and clamp to [0, 1]
    pub fn probability(&self, features: &FeatureVector) -> f64 {
        let scaled = self.scaler.transform(features);
        let p = self.classifier.predict_probability(&scaled);
        if p.is_nan() {
            0.0
        } else {
            p.clamp(0.0, 1.0)
        }
    }

    pub fn scaler(&self) -> &S {
        &self.scaler
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}
