//! End-to-end Integration Tests
//!
//! Synthetic frames flow through the same stages the binary wires together:
//! - collection: features → auto-capture/labels → CSV dataset
//! - training: CSV → scaler and classifier artifacts
//! - detection: artifacts → smoothed live decision

use std::path::Path;
use std::time::Duration;

use heart_capture::{CaptureEvent, CollectionControl, CollectionSession, ControlOutcome};
use heart_core::{HandDetector, HeartError, Label};
use heart_dataset::{read_dataset, DatasetWriter};
use heart_features::extract_features;
use heart_inference::{
    load_classifier, load_scaler, Decision, DecisionConfig, GestureModel, LogisticClassifier,
    SmoothedDecision, StandardScaler,
};
use heart_train::{train_from_files, TrainConfig};
use proptest::prelude::*;

use crate::{Pose, Scenario};

/// Label every frame of `scenario` immediately, as a user pressing a key
/// on every frame would
fn label_all(scenario: &Scenario, label: Label, dataset: &Path) -> usize {
    let mut session = CollectionSession::default();
    let mut writer = DatasetWriter::open(dataset).unwrap();
    for (now, detection) in scenario.timed() {
        session.on_frame(
            extract_features(&detection.hands),
            detection.hand_count(),
            now,
        );
        session
            .apply(CollectionControl::LabelNow(label), &mut writer)
            .unwrap();
    }
    writer.appended()
}

/// Drive a detector until input runs out, collecting every decision
fn run_detect<D: HandDetector>(
    detector: &mut D,
    layer: &mut SmoothedDecision<StandardScaler, LogisticClassifier>,
) -> Vec<Decision> {
    let mut decisions = Vec::new();
    loop {
        match detector.detect_next() {
            Ok(detection) => {
                decisions.push(layer.update(extract_features(&detection.hands).as_ref()))
            }
            Err(HeartError::InputUnavailable(_)) => break,
            Err(e) => panic!("unexpected detector error: {e}"),
        }
    }
    decisions
}

fn trained_layer(dir: &Path) -> SmoothedDecision<StandardScaler, LogisticClassifier> {
    let dataset = dir.join("dataset.csv");
    let model = dir.join("model.bin");
    let scaler = dir.join("scaler.bin");

    let hearts = label_all(&Scenario::new(11).hold(Pose::Heart, 40), Label::Heart, &dataset);
    let others = label_all(
        &Scenario::new(12).hold(Pose::OpenPalm, 40),
        Label::NotHeart,
        &dataset,
    );
    assert_eq!((hearts, others), (40, 40));

    let report = train_from_files(&dataset, &model, &scaler, &TrainConfig::default()).unwrap();
    assert!(report.evaluation.accuracy() >= 0.9);

    let model = GestureModel::new(
        load_scaler(&scaler).unwrap(),
        load_classifier(&model).unwrap(),
    );
    SmoothedDecision::new(model, DecisionConfig::default())
}

#[test]
fn test_collect_train_detect() {
    let dir = tempfile::tempdir().unwrap();
    let mut layer = trained_layer(dir.path());

    let mut hearts = Scenario::new(21).hold(Pose::Heart, 15).into_detector();
    let decisions = run_detect(&mut hearts, &mut layer);
    let last = decisions.last().copied().unwrap();
    assert!(last.is_gesture);
    assert!(last.confidence.unwrap() >= 0.8);

    let mut palms = Scenario::new(22).hold(Pose::OpenPalm, 15).into_detector();
    let decisions = run_detect(&mut palms, &mut layer);
    assert!(!decisions.last().unwrap().is_gesture);
}

#[test]
fn test_detection_gap_resets_confidence() {
    let dir = tempfile::tempdir().unwrap();
    let mut layer = trained_layer(dir.path());

    let mut detector = Scenario::new(31)
        .hold(Pose::Heart, 12)
        .gap(1, 1)
        .hold(Pose::OpenPalm, 1)
        .into_detector();
    let decisions = run_detect(&mut detector, &mut layer);

    assert!(decisions[11].is_gesture);
    assert_eq!(decisions[12], Decision::absent());
    // One open-palm frame with no history behind it
    assert!(!decisions[13].is_gesture);
    assert_eq!(layer.window().len(), 1);
}

#[test]
fn test_auto_capture_across_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("dataset.csv");
    let mut writer = DatasetWriter::open(&dataset).unwrap();
    let mut session = CollectionSession::default();

    // 2s hold, lose a hand, then a hold long enough to capture
    let scenario = Scenario::new(41)
        .hold(Pose::Heart, 60)
        .gap(1, 2)
        .hold(Pose::Heart, 120);

    let mut captured_at = Vec::new();
    for (i, (now, detection)) in scenario.timed().enumerate() {
        let event = session.on_frame(
            extract_features(&detection.hands),
            detection.hand_count(),
            now,
        );
        if event == CaptureEvent::Captured {
            captured_at.push(i);
        }
    }

    // Hold restarts at frame 62; 3s later is frame 62 + 91
    assert_eq!(captured_at, vec![153]);
    let pending = *session.auto_capture().pending().unwrap();

    let outcome = session
        .apply(CollectionControl::ConfirmPending(Label::Heart), &mut writer)
        .unwrap();
    assert!(matches!(outcome, ControlOutcome::Saved { auto: true, .. }));

    let rows = read_dataset(&dataset).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].label, Label::Heart);
    assert_eq!(rows[0].features, pending);
}

#[test]
fn test_training_without_dataset_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let err = train_from_files(
        &dir.path().join("dataset.csv"),
        &dir.path().join("model.bin"),
        &dir.path().join("scaler.bin"),
        &TrainConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, HeartError::MissingArtifact { .. }));
}

#[test]
fn test_detect_without_artifacts_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        load_classifier(&dir.path().join("model.bin")),
        Err(HeartError::MissingArtifact { .. })
    ));
}

/// Frames of `scenario` that produced a capture
fn captured_frames(scenario: &Scenario) -> Vec<usize> {
    let mut session = CollectionSession::default();
    scenario
        .timed()
        .enumerate()
        .filter_map(|(i, (now, detection))| {
            let event = session.on_frame(
                extract_features(&detection.hands),
                detection.hand_count(),
                now,
            );
            (event == CaptureEvent::Captured).then_some(i)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_unbroken_hold_captures_once(
        seed in any::<u64>(),
        period_ms in 20u64..=100,
        extra in 0usize..40,
    ) {
        // First frame whose offset from frame 0 reaches 3s
        let first = 3000u64.div_ceil(period_ms) as usize;
        let scenario = Scenario::with_period(seed, Duration::from_millis(period_ms))
            .hold(Pose::Heart, first + 1 + extra);
        prop_assert_eq!(captured_frames(&scenario), vec![first]);
    }

    #[test]
    fn prop_short_holds_broken_by_gaps_never_capture(
        seed in any::<u64>(),
        period_ms in 20u64..=100,
        holds in prop::collection::vec((1usize..=30, 1usize..5), 1..6),
    ) {
        // At most 29 periods of 100ms, under 3s
        let mut scenario = Scenario::with_period(seed, Duration::from_millis(period_ms));
        for (held, gap) in holds {
            scenario = scenario.hold(Pose::Heart, held).gap(1, gap);
        }
        prop_assert!(captured_frames(&scenario).is_empty());
    }
}
