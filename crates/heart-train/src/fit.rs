//! Logistic regression fitting
//!
//! L2-regularised logistic regression solved with L-BFGS by `linfa-logistic`.
//! The fitted weights are oriented so the positive class is always
//! [`Label::Heart`], then handed to the inference-side classifier.

use heart_core::{HeartError, HeartResult, Label};
use heart_inference::LogisticClassifier;
use linfa::traits::Fit;
use linfa::Dataset;
use linfa_logistic::LogisticRegression;
use ndarray::{Array1, ArrayView2};
use tracing::debug;

/// Solver settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitConfig {
    /// L2 penalty strength on the weights
    pub l2: f64,
    pub max_iterations: u64,
    /// Stop once the gradient norm falls below this
    pub gradient_tolerance: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            l2: 1.0,
            max_iterations: 200,
            gradient_tolerance: 1e-4,
        }
    }
}

/// Fit a classifier on already scaled rows
pub fn train_logistic(
    records: ArrayView2<f64>,
    labels: &[Label],
    config: &FitConfig,
) -> HeartResult<LogisticClassifier> {
    if records.nrows() == 0 || records.nrows() != labels.len() {
        return Err(HeartError::InsufficientData(format!(
            "cannot fit on {} rows with {} labels",
            records.nrows(),
            labels.len()
        )));
    }

    let targets: Array1<bool> = labels.iter().map(|l| *l == Label::Heart).collect();
    let dataset = Dataset::new(records.to_owned(), targets);

    let fitted = LogisticRegression::default()
        .alpha(config.l2)
        .max_iterations(config.max_iterations)
        .gradient_tolerance(config.gradient_tolerance)
        .fit(&dataset)
        .map_err(|e| HeartError::Training(e.to_string()))?;

    let mut weights = fitted.params().to_vec();
    let mut bias = fitted.intercept();
    if !fitted.labels().pos.class {
        weights.iter_mut().for_each(|w| *w = -*w);
        bias = -bias;
    }
    debug!(bias, dim = weights.len(), "logistic regression fitted");

    LogisticClassifier::new(weights, bias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heart_inference::GestureClassifier;
    use ndarray::Array2;

    /// Label follows the sign of the first column; the second is constant
    fn symmetric(n: usize) -> (Array2<f64>, Vec<Label>) {
        let records = Array2::from_shape_fn((2 * n, 2), |(i, j)| {
            if j == 1 {
                return 0.5;
            }
            let magnitude = 1.0 + (i % n) as f64 * 0.1;
            if i < n {
                -magnitude
            } else {
                magnitude
            }
        });
        let labels = (0..2 * n)
            .map(|i| if i < n { Label::NotHeart } else { Label::Heart })
            .collect();
        (records, labels)
    }

    #[test]
    fn test_separable_data_is_learned() {
        let (records, labels) = symmetric(10);
        let clf = train_logistic(records.view(), &labels, &FitConfig::default()).unwrap();
        assert!(clf.weights()[0] > 0.0);
        assert!(clf.predict_probability(&[3.0, 0.5]) > 0.9);
        assert!(clf.predict_probability(&[-3.0, 0.5]) < 0.1);
    }

    #[test]
    fn test_positive_class_is_heart_whatever_the_row_order() {
        let (records, labels) = symmetric(10);
        let mut flipped = records.clone();
        flipped.invert_axis(ndarray::Axis(0));
        let flipped_labels: Vec<Label> = labels.iter().rev().copied().collect();

        let a = train_logistic(records.view(), &labels, &FitConfig::default()).unwrap();
        let b = train_logistic(flipped.view(), &flipped_labels, &FitConfig::default()).unwrap();
        assert!(a.predict_probability(&[2.0, 0.5]) > 0.5);
        assert!(b.predict_probability(&[2.0, 0.5]) > 0.5);
    }

    #[test]
    fn test_fitting_is_deterministic() {
        let (records, labels) = symmetric(6);
        let a = train_logistic(records.view(), &labels, &FitConfig::default()).unwrap();
        let b = train_logistic(records.view(), &labels, &FitConfig::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_mismatched_input_rejected() {
        let empty = Array2::<f64>::zeros((0, 2));
        assert!(train_logistic(empty.view(), &[], &FitConfig::default()).is_err());

        let one = Array2::<f64>::zeros((1, 2));
        assert!(train_logistic(one.view(), &[], &FitConfig::default()).is_err());
    }

    #[test]
    fn test_single_class_is_a_training_error() {
        let records = Array2::from_shape_fn((4, 2), |(i, j)| (i + j) as f64);
        let labels = [Label::Heart; 4];
        assert!(matches!(
            train_logistic(records.view(), &labels, &FitConfig::default()),
            Err(HeartError::Training(_))
        ));
    }
}
