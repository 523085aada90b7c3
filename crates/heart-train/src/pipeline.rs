//! Training run: dataset in, fitted scaler and classifier out

use std::path::Path;

use heart_core::{HeartError, HeartResult, Label, LabeledSample};
use heart_inference::{
    feature_matrix, save_classifier, save_scaler, FeatureScaler, GestureClassifier,
    GestureModel, LogisticClassifier, StandardScaler,
};
use tracing::{info, warn};

use crate::{predict_label, stratified_split, train_logistic, ConfusionMatrix, FitConfig};

/// Training configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    /// Fraction of each class held out for evaluation
    pub test_ratio: f64,
    /// Shuffle seed for the split
    pub seed: u64,
    /// Minimum samples per class
    pub min_per_class: usize,
    /// Datasets smaller than this train with a warning
    pub small_dataset_warning: usize,
    pub fit: FitConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            test_ratio: 0.2,
            seed: 42,
            min_per_class: 5,
            small_dataset_warning: 20,
            fit: FitConfig::default(),
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> HeartResult<()> {
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(HeartError::Config(format!(
                "test_ratio must be in (0, 1), got {}",
                self.test_ratio
            )));
        }
        if self.min_per_class < 2 {
            return Err(HeartError::Config("min_per_class must be >= 2".into()));
        }
        let fit = &self.fit;
        if fit.max_iterations == 0 || !(fit.gradient_tolerance > 0.0) || !(fit.l2 >= 0.0) {
            return Err(HeartError::Config(
                "max_iterations and gradient_tolerance must be positive, l2 non-negative".into(),
            ));
        }
        Ok(())
    }
}

/// Per-label sample counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub heart: usize,
    pub not_heart: usize,
}

impl ClassCounts {
    pub fn of(samples: &[LabeledSample]) -> Self {
        samples.iter().fold(Self::default(), |mut c, s| {
            match s.label {
                Label::Heart => c.heart += 1,
                Label::NotHeart => c.not_heart += 1,
            }
            c
        })
    }

    pub fn total(&self) -> usize {
        self.heart + self.not_heart
    }
}

/// Summary of one training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub dataset: ClassCounts,
    pub train: ClassCounts,
    pub test: ClassCounts,
    pub evaluation: ConfusionMatrix,
}

/// The fitted pair and how it was obtained
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub scaler: StandardScaler,
    pub classifier: LogisticClassifier,
    pub report: TrainingReport,
}

/// Fit a scaler and classifier on `samples` and evaluate on a held-out split
pub fn run_training(samples: &[LabeledSample], config: &TrainConfig) -> HeartResult<TrainedModel> {
    config.validate()?;

    let dataset = ClassCounts::of(samples);
    if dataset.total() == 0 {
        return Err(HeartError::InsufficientData("dataset is empty".into()));
    }
    info!(
        total = dataset.total(),
        heart = dataset.heart,
        not_heart = dataset.not_heart,
        "dataset summary"
    );
    if dataset.total() < config.small_dataset_warning {
        warn!(
            total = dataset.total(),
            "very small dataset, consider collecting more samples"
        );
    }
    if dataset.heart < config.min_per_class || dataset.not_heart < config.min_per_class {
        return Err(HeartError::InsufficientData(format!(
            "need at least {} samples of each class (heart: {}, not-heart: {})",
            config.min_per_class, dataset.heart, dataset.not_heart
        )));
    }

    let split = stratified_split(samples, config.test_ratio, config.seed);
    let train = ClassCounts::of(&split.train);
    let test = ClassCounts::of(&split.test);
    info!(train = train.total(), test = test.total(), "split dataset");

    // Scaler sees the training split only
    let records = feature_matrix(split.train.iter().map(|s| &s.features));
    let scaler = StandardScaler::fit_records(records.view())?;

    let scaled = scaler.transform_records(records.view());
    let labels: Vec<Label> = split.train.iter().map(|s| s.label).collect();
    let classifier = train_logistic(scaled.view(), &labels, &config.fit)?;

    let model = GestureModel::new(scaler, classifier);
    let evaluation = evaluate(&model, &split.test);
    info!(
        accuracy = evaluation.accuracy(),
        precision = evaluation.precision(),
        recall = evaluation.recall(),
        f1 = evaluation.f1(),
        "model evaluated"
    );

    Ok(TrainedModel {
        scaler: model.scaler().clone(),
        classifier: model.classifier().clone(),
        report: TrainingReport {
            dataset,
            train,
            test,
            evaluation,
        },
    })
}

/// Confusion matrix of `model` over `samples`
pub fn evaluate<S: FeatureScaler, C: GestureClassifier>(
    model: &GestureModel<S, C>,
    samples: &[LabeledSample],
) -> ConfusionMatrix {
    let mut cm = ConfusionMatrix::default();
    for sample in samples {
        cm.record(sample.label, predict_label(model.probability(&sample.features)));
    }
    cm
}

/// Read the dataset, train, and write both artifacts
pub fn train_from_files(
    dataset_path: &Path,
    model_path: &Path,
    scaler_path: &Path,
    config: &TrainConfig,
) -> HeartResult<TrainingReport> {
    let samples = heart_dataset::read_dataset(dataset_path)?;
    let trained = run_training(&samples, config)?;
    save_classifier(model_path, &trained.classifier)?;
    save_scaler(scaler_path, &trained.scaler)?;
    Ok(trained.report)
}
