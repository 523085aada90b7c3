//! Linear logistic classifier

use heart_core::{HeartError, HeartResult};

use crate::GestureClassifier;

/// Logistic sigmoid, stable for large |z|
#[inline]
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

/// `p(heart) = sigmoid(w . x + b)` over scaled features
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticClassifier {
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticClassifier {
    pub fn new(weights: Vec<f64>, bias: f64) -> HeartResult<Self> {
        if weights.iter().any(|w| !w.is_finite()) || !bias.is_finite() {
            return Err(HeartError::InvalidArtifact(
                "classifier contains non-finite parameters".into(),
            ));
        }
        Ok(Self { weights, bias })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    /// Raw decision value `w . x + b`
    pub fn logit(&self, scaled: &[f64]) -> f64 {
        self.weights
            .iter()
            .zip(scaled)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias
    }
}

impl GestureClassifier for LogisticClassifier {
    fn predict_probability(&self, scaled: &[f64]) -> f64 {
        sigmoid(self.logit(scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_bounds() {
        assert_eq!(sigmoid(0.0), 0.5);
        assert!(sigmoid(1000.0) <= 1.0);
        assert!(sigmoid(-1000.0) >= 0.0);
        assert!(!sigmoid(-1000.0).is_nan());
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_predict_uses_weights_and_bias() {
        let clf = LogisticClassifier::new(vec![1.0, -1.0], 0.5).unwrap();
        assert_eq!(clf.logit(&[2.0, 1.0]), 1.5);
        assert!((clf.predict_probability(&[2.0, 1.0]) - sigmoid(1.5)).abs() < 1e-12);
        assert_eq!(clf.predict_probability(&[0.0, 0.5]), 0.5);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(LogisticClassifier::new(vec![f64::NAN], 0.0).is_err());
        assert!(LogisticClassifier::new(vec![1.0], f64::INFINITY).is_err());
    }
}
