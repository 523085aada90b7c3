//! Configuration file
//!
//! Every section is optional; missing sections and keys take the defaults
//! below. Values are validated on load.

use std::path::{Path, PathBuf};
use std::time::Duration;

use heart_capture::CaptureConfig;
use heart_core::{HeartError, HeartResult};
use heart_dataset::DEFAULT_DATASET_PATH;
use heart_inference::{
    DecisionConfig, DEFAULT_MODEL_PATH, DEFAULT_SCALER_PATH, DEFAULT_THRESHOLD,
    DEFAULT_WINDOW_SIZE,
};
use heart_train::{FitConfig, TrainConfig};
use serde::{Deserialize, Serialize};

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "heart.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub capture: CaptureSection,
    pub decision: DecisionSection,
    pub detector: DetectorConfig,
    pub train: TrainSection,
}

/// File locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub dataset: PathBuf,
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            dataset: PathBuf::from(DEFAULT_DATASET_PATH),
            model: PathBuf::from(DEFAULT_MODEL_PATH),
            scaler: PathBuf::from(DEFAULT_SCALER_PATH),
        }
    }
}

/// Auto-capture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureSection {
    /// Seconds two hands must stay visible before a sample is captured
    pub hold_secs: f64,
}

impl Default for CaptureSection {
    fn default() -> Self {
        Self { hold_secs: 3.0 }
    }
}

/// Live decision settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionSection {
    pub threshold: f64,
    pub window_size: usize,
}

impl Default for DecisionSection {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }
}

/// Detector confidence floors for one workflow
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorThresholds {
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

/// Detector script shipped with the workspace
pub const DEFAULT_DETECTOR_SCRIPT: &str = "scripts/hand_detector.py";

/// External hand-landmark detector process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Interpreter to launch
    pub program: String,
    /// Detector script, relative to the working directory
    pub script: PathBuf,
    /// Extra arguments passed after the script, e.g. `--camera 1`
    pub args: Vec<String>,
    pub max_hands: u8,
    pub collect: DetectorThresholds,
    pub detect: DetectorThresholds,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            program: "python3".to_string(),
            script: PathBuf::from(DEFAULT_DETECTOR_SCRIPT),
            args: Vec::new(),
            max_hands: 2,
            collect: DetectorThresholds {
                min_detection_confidence: 0.6,
                min_tracking_confidence: 0.4,
            },
            detect: DetectorThresholds {
                min_detection_confidence: 0.7,
                min_tracking_confidence: 0.5,
            },
        }
    }
}

impl DetectorConfig {
    /// The detector script, if it exists
    pub fn checked_script(&self) -> HeartResult<&Path> {
        if self.script.is_file() {
            Ok(&self.script)
        } else {
            Err(HeartError::MissingArtifact {
                what: "Hand detector script",
                path: self.script.clone(),
                hint: "run from the workspace root or set detector.script in heart.toml \
                       (needs `pip install mediapipe opencv-python`)",
            })
        }
    }

    /// Full argument list for one workflow, script first
    pub fn command_args(&self, thresholds: &DetectorThresholds) -> Vec<String> {
        let mut args = vec![self.script.display().to_string()];
        args.extend(self.args.iter().cloned());
        args.extend([
            "--max-hands".to_string(),
            self.max_hands.to_string(),
            "--min-detection-confidence".to_string(),
            thresholds.min_detection_confidence.to_string(),
            "--min-tracking-confidence".to_string(),
            thresholds.min_tracking_confidence.to_string(),
        ]);
        args
    }
}

/// Training settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainSection {
    pub test_ratio: f64,
    pub seed: u64,
    pub min_per_class: usize,
    pub small_dataset_warning: usize,
    pub l2: f64,
    pub max_iterations: u64,
    pub gradient_tolerance: f64,
}

impl Default for TrainSection {
    fn default() -> Self {
        let train = TrainConfig::default();
        Self {
            test_ratio: train.test_ratio,
            seed: train.seed,
            min_per_class: train.min_per_class,
            small_dataset_warning: train.small_dataset_warning,
            l2: train.fit.l2,
            max_iterations: train.fit.max_iterations,
            gradient_tolerance: train.fit.gradient_tolerance,
        }
    }
}

impl AppConfig {
    pub fn capture_config(&self) -> HeartResult<CaptureConfig> {
        let hold = Duration::try_from_secs_f64(self.capture.hold_secs)
            .ok()
            .filter(|hold| !hold.is_zero())
            .ok_or_else(|| {
                HeartError::Config(format!(
                    "capture.hold_secs must be a positive number of seconds, got {}",
                    self.capture.hold_secs
                ))
            })?;
        Ok(CaptureConfig { hold })
    }

    pub fn decision_config(&self) -> DecisionConfig {
        DecisionConfig {
            threshold: self.decision.threshold,
            window_size: self.decision.window_size,
        }
    }

    pub fn train_config(&self) -> TrainConfig {
        TrainConfig {
            test_ratio: self.train.test_ratio,
            seed: self.train.seed,
            min_per_class: self.train.min_per_class,
            small_dataset_warning: self.train.small_dataset_warning,
            fit: FitConfig {
                l2: self.train.l2,
                max_iterations: self.train.max_iterations,
                gradient_tolerance: self.train.gradient_tolerance,
            },
        }
    }

    /// Check value ranges; the first invalid field is reported
    pub fn validate(&self) -> HeartResult<()> {
        self.capture_config()?;
        self.decision_config().validate()?;
        self.train_config().validate()?;

        if self.detector.program.trim().is_empty() {
            return Err(HeartError::Config("detector.program must not be empty".into()));
        }
        if self.detector.max_hands < 2 {
            return Err(HeartError::Config(format!(
                "detector.max_hands must be at least 2, got {}",
                self.detector.max_hands
            )));
        }
        for (name, t) in [
            ("collect", &self.detector.collect),
            ("detect", &self.detector.detect),
        ] {
            let in_range = |v: f32| (0.0..=1.0).contains(&v);
            if !in_range(t.min_detection_confidence) || !in_range(t.min_tracking_confidence) {
                return Err(HeartError::Config(format!(
                    "detector.{} confidences must be in [0, 1]",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> HeartResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| HeartError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, else `heart.toml` if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> HeartResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.decision_config(), DecisionConfig::default());
        assert_eq!(config.capture_config().unwrap(), CaptureConfig::default());
        assert_eq!(config.train_config(), TrainConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heart.toml");
        std::fs::write(
            &path,
            "[decision]\nthreshold = 0.9\n\n[paths]\ndataset = \"data/hands.csv\"\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.decision.threshold, 0.9);
        assert_eq!(config.decision.window_size, DEFAULT_WINDOW_SIZE);
        assert_eq!(config.paths.dataset, PathBuf::from("data/hands.csv"));
        assert_eq!(config.paths.model, PathBuf::from(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heart.toml");
        std::fs::write(&path, "[decision]\nwindow_size = 0\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(HeartError::Config(_))));

        std::fs::write(&path, "[capture]\nhold_secs = -1.0\n").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }

    #[test]
    fn test_unrepresentable_hold_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("heart.toml");
        std::fs::write(&path, "[capture]\nhold_secs = 1e20\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(HeartError::Config(_))));

        let mut config = AppConfig::default();
        config.capture.hold_secs = 1e20;
        assert!(config.capture_config().is_err());
        config.capture.hold_secs = 1e-12;
        assert!(config.capture_config().is_err());
    }

    #[test]
    fn test_serialization_has_sections() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        for section in ["[paths]", "[capture]", "[decision]", "[detector]", "[train]"] {
            assert!(text.contains(section), "missing {section}");
        }
    }

    #[test]
    fn test_detector_args_per_workflow() {
        let detector = DetectorConfig::default();
        let args = detector.command_args(&detector.detect);
        assert_eq!(args[0], DEFAULT_DETECTOR_SCRIPT);
        assert!(args.windows(2).any(|w| w[0] == "--max-hands" && w[1] == "2"));
        assert!(args
            .windows(2)
            .any(|w| w[0] == "--min-detection-confidence" && w[1] == "0.7"));

        let mut detector = DetectorConfig::default();
        detector.args = vec!["--camera".into(), "1".into()];
        let args = detector.command_args(&detector.collect);
        assert_eq!(&args[1..3], ["--camera", "1"]);
        assert!(args
            .windows(2)
            .any(|w| w[0] == "--min-tracking-confidence" && w[1] == "0.4"));
    }

    #[test]
    fn test_detector_script_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let mut detector = DetectorConfig::default();
        detector.script = dir.path().join("absent.py");
        let err = detector.checked_script().unwrap_err();
        assert!(matches!(err, HeartError::MissingArtifact { .. }));
        assert!(err.to_string().contains("absent.py"));

        let script = dir.path().join("hand_detector.py");
        std::fs::write(&script, "print('READY')\n").unwrap();
        detector.script = script.clone();
        assert_eq!(detector.checked_script().unwrap(), script.as_path());
    }

    #[test]
    fn test_bundled_detector_script_is_present() {
        let script = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..").join(DEFAULT_DETECTOR_SCRIPT);
        let text = std::fs::read_to_string(script).unwrap();
        for flag in ["--max-hands", "--min-detection-confidence", "--min-tracking-confidence"] {
            assert!(text.contains(flag), "missing {flag}");
        }
        assert!(text.contains("READY"));
        assert!(text.contains("cv2.flip"));
    }
}
