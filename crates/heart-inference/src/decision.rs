//! Smoothed Decision Layer - stable live decisions from noisy probabilities
//!
//! Per-frame probabilities jitter at detection boundaries. Averaging the
//! trailing `window_size` frames costs at most `window_size` frames of
//! latency and removes most flicker between gesture and no-gesture.

use heart_core::{FeatureVector, HeartError, HeartResult};
use tracing::{debug, info};

use crate::{FeatureScaler, GestureClassifier, GestureModel, PredictionWindow};

/// Default minimum smoothed probability to declare the gesture present
pub const DEFAULT_THRESHOLD: f64 = 0.80;

/// Default number of trailing frames averaged
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Decision layer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionConfig {
    /// Minimum smoothed probability to declare the gesture present (inclusive)
    pub threshold: f64,
    /// Number of trailing frames averaged
    pub window_size: usize,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

impl DecisionConfig {
    pub fn validate(&self) -> HeartResult<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(HeartError::Config(format!(
                "threshold must be in [0, 1], got {}",
                self.threshold
            )));
        }
        if self.window_size == 0 {
            return Err(HeartError::Config("window_size must be >= 1".to_string()));
        }
        Ok(())
    }
}

/// Outcome for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    pub is_gesture: bool,
    /// Smoothed probability; `None` when fewer than two hands were seen
    pub confidence: Option<f64>,
}

impl Decision {
    /// The decision for a frame without two hands
    pub fn absent() -> Self {
        Self {
            is_gesture: false,
            confidence: None,
        }
    }
}

/// Owns the prediction window for one inference session
#[derive(Debug)]
pub struct SmoothedDecision<S, C> {
    model: GestureModel<S, C>,
    window: PredictionWindow,
    config: DecisionConfig,
    last: bool,
}

impl<S: FeatureScaler, C: GestureClassifier> SmoothedDecision<S, C> {
    pub fn new(model: GestureModel<S, C>, config: DecisionConfig) -> Self {
        Self {
            model,
            window: PredictionWindow::new(config.window_size),
            config,
            last: false,
        }
    }

    /// Feed one frame. `features` is `None` when fewer than two hands were seen.
    pub fn update(&mut self, features: Option<&FeatureVector>) -> Decision {
        let Some(features) = features else {
            if !self.window.is_empty() {
                debug!(dropped = self.window.len(), "detection gap, window cleared");
                self.window.clear();
            }
            self.transition(false);
            return Decision::absent();
        };

        let p = self.model.probability(features);
        self.window.push(p);

        let avg = self.window.mean().unwrap_or(p);
        let is_gesture = avg >= self.config.threshold;
        debug!(p, avg, frames = self.window.len(), "smoothed probability");
        self.transition(is_gesture);

        Decision {
            is_gesture,
            confidence: Some(avg),
        }
    }

    fn transition(&mut self, is_gesture: bool) {
        if is_gesture != self.last {
            info!(is_gesture, "decision changed");
            self.last = is_gesture;
        }
    }

    pub fn window(&self) -> &PredictionWindow {
        &self.window
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    pub fn model(&self) -> &GestureModel<S, C> {
        &self.model
    }
}
