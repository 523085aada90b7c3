//! Held-out evaluation

use std::fmt;

use heart_core::Label;

/// Binary confusion matrix, heart as the positive class
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    pub true_negative: usize,
    pub false_positive: usize,
    pub false_negative: usize,
    pub true_positive: usize,
}

impl ConfusionMatrix {
    pub fn record(&mut self, actual: Label, predicted: Label) {
        let cell = match (actual, predicted) {
            (Label::NotHeart, Label::NotHeart) => &mut self.true_negative,
            (Label::NotHeart, Label::Heart) => &mut self.false_positive,
            (Label::Heart, Label::NotHeart) => &mut self.false_negative,
            (Label::Heart, Label::Heart) => &mut self.true_positive,
        };
        *cell += 1;
    }

    pub fn total(&self) -> usize {
        self.true_negative + self.false_positive + self.false_negative + self.true_positive
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    pub fn f1(&self) -> f64 {
        let (p, r) = (self.precision(), self.recall());
        if p + r == 0.0 {
            0.0
        } else {
            2.0 * p * r / (p + r)
        }
    }
}

/// Zero when the denominator is zero
fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Accuracy:  {:.4}\nPrecision: {:.4}\nRecall:    {:.4}\nF1 Score:  {:.4}",
            self.accuracy(),
            self.precision(),
            self.recall(),
            self.f1()
        )?;
        write!(
            f,
            "Confusion Matrix:\n  TN: {}  FP: {}\n  FN: {}  TP: {}",
            self.true_negative, self.false_positive, self.false_negative, self.true_positive
        )
    }
}

/// Predicted label for a probability, 0.5 cut-off
pub fn predict_label(probability: f64) -> Label {
    if probability >= 0.5 {
        Label::Heart
    } else {
        Label::NotHeart
    }
}
