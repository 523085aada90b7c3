//! Subcommand runners

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use heart_capture::{CaptureEvent, CollectionControl, CollectionSession, ControlOutcome};
use heart_core::{Detection, HandDetector, HeartError, Label, SampleSink};
use heart_dataset::DatasetWriter;
use heart_features::extract_features;
use heart_inference::{load_classifier, load_scaler, GestureModel, SmoothedDecision};
use heart_train::train_from_files;
use tracing::{error, info, warn};

use crate::config::{AppConfig, DetectorThresholds};
use crate::controls::{collect_control, detect_quit, poll_key, RawMode, COLLECT_HELP, DETECT_HELP};
use crate::display::{collect_lines, detect_lines, StatusView};
use crate::source::{open_replay, FrameTimer, LandmarkSource, SubprocessDetector};

fn open_source(
    config: &AppConfig,
    replay: Option<&Path>,
    thresholds: &DetectorThresholds,
) -> Result<LandmarkSource> {
    let source = match replay {
        Some(path) => LandmarkSource::Replay(open_replay(path)?),
        None => {
            let script = config.detector.checked_script()?;
            info!(script = %script.display(), "using hand detector script");
            LandmarkSource::Live(SubprocessDetector::spawn(
                &config.detector.program,
                &config.detector.command_args(thresholds),
            )?)
        }
    };
    Ok(source)
}

/// Next frame, or `None` once the source has ended normally
fn next_frame(source: &mut LandmarkSource) -> Result<Option<Detection>> {
    match source.detect_next() {
        Ok(detection) => Ok(Some(detection)),
        Err(HeartError::InputUnavailable(reason)) if source.ends_normally() => {
            info!("{}", reason);
            Ok(None)
        }
        Err(e) => {
            error!("input unavailable: {}", e);
            Err(e).context("landmark input failed")
        }
    }
}

/// How a collection run is driven
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectOptions {
    /// No raw terminal and no keys; one status line per frame
    pub headless: bool,
    /// Label applied to every auto-captured sample as soon as it is captured
    pub auto_label: Option<Label>,
    /// Replay frame rate
    pub fps: f64,
}

pub fn run_collect(
    config: &AppConfig,
    replay: Option<PathBuf>,
    dataset: Option<PathBuf>,
    options: CollectOptions,
) -> Result<()> {
    let dataset = dataset.unwrap_or_else(|| config.paths.dataset.clone());
    let mut session = CollectionSession::new(config.capture_config()?);
    let mut writer = DatasetWriter::open(&dataset)
        .with_context(|| format!("cannot open dataset {}", dataset.display()))?;
    let mut source = open_source(config, replay.as_deref(), &config.detector.collect)?;
    let mut timer = FrameTimer::for_source(&source, options.fps)?;

    if options.headless && options.auto_label.is_none() {
        warn!("headless collection without --auto-label cannot save samples");
    }
    info!(dataset = %dataset.display(), "collecting samples");

    let raw = if options.headless {
        None
    } else {
        Some(RawMode::enable().context("cannot switch terminal to raw mode")?)
    };
    let mut view = StatusView::new(io::stdout(), options.headless);
    collect_frames(
        &mut source,
        &mut timer,
        &mut session,
        &mut writer,
        &mut view,
        &options,
    )?;
    drop(raw);

    let counts = session.counts();
    info!(
        heart = counts.heart,
        not_heart = counts.not_heart,
        total = counts.total(),
        dataset = %dataset.display(),
        "data collection complete"
    );
    Ok(())
}

/// Frame loop of a collection run; returns when the source ends or on quit
fn collect_frames<S: SampleSink, W: Write>(
    source: &mut LandmarkSource,
    timer: &mut FrameTimer,
    session: &mut CollectionSession,
    sink: &mut S,
    view: &mut StatusView<W>,
    options: &CollectOptions,
) -> Result<()> {
    while let Some(detection) = next_frame(source)? {
        let event = session.on_frame(
            extract_features(&detection.hands),
            detection.hand_count(),
            timer.tick(),
        );
        if let (CaptureEvent::Captured, Some(label)) = (event, options.auto_label) {
            session.apply(CollectionControl::ConfirmPending(label), sink)?;
        }

        if !options.headless {
            while let Some(key) = poll_key(Duration::ZERO)? {
                let Some(control) = collect_control(&key) else {
                    continue;
                };
                if let ControlOutcome::Quit = session.apply(control, sink)? {
                    return Ok(());
                }
            }
        }

        let mut lines = collect_lines(session);
        if !options.headless {
            lines.push(COLLECT_HELP.to_string());
        }
        view.draw(&lines)?;
    }
    Ok(())
}

pub fn run_train(config: &AppConfig, dataset: Option<PathBuf>) -> Result<()> {
    let dataset = dataset.unwrap_or_else(|| config.paths.dataset.clone());
    let report = train_from_files(
        &dataset,
        &config.paths.model,
        &config.paths.scaler,
        &config.train_config(),
    )
    .context("training failed")?;

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "Total samples: {} (heart: {}, not-heart: {})",
        report.dataset.total(),
        report.dataset.heart,
        report.dataset.not_heart
    )?;
    writeln!(
        out,
        "Training set: {} | Test set: {}",
        report.train.total(),
        report.test.total()
    )?;
    writeln!(out, "{}", report.evaluation)?;
    writeln!(out, "Model saved to: {}", config.paths.model.display())?;
    writeln!(out, "Scaler saved to: {}", config.paths.scaler.display())?;
    writeln!(out, "You can now run `heart detect`.")?;
    Ok(())
}

pub fn run_detect(
    config: &AppConfig,
    replay: Option<PathBuf>,
    headless: bool,
    threshold: Option<f64>,
) -> Result<()> {
    let mut decision_config = config.decision_config();
    if let Some(threshold) = threshold {
        decision_config.threshold = threshold;
    }
    decision_config.validate()?;

    // Both artifacts must exist before the camera starts
    let classifier = load_classifier(&config.paths.model)?;
    let scaler = load_scaler(&config.paths.scaler)?;
    let mut layer = SmoothedDecision::new(GestureModel::new(scaler, classifier), decision_config);

    let mut source = open_source(config, replay.as_deref(), &config.detector.detect)?;
    info!(
        threshold = decision_config.threshold,
        window = decision_config.window_size,
        "detecting"
    );

    let raw = if headless {
        None
    } else {
        Some(RawMode::enable().context("cannot switch terminal to raw mode")?)
    };
    let mut view = StatusView::new(io::stdout(), headless);
    let mut frames = 0u64;
    let mut positives = 0u64;

    'frames: while let Some(detection) = next_frame(&mut source)? {
        let features = extract_features(&detection.hands);
        let decision = layer.update(features.as_ref());
        frames += 1;
        positives += u64::from(decision.is_gesture);

        let mut lines = detect_lines(&decision, detection.hand_count(), decision_config.threshold);
        if !headless {
            lines.push(DETECT_HELP.to_string());
            while let Some(key) = poll_key(Duration::ZERO)? {
                if detect_quit(&key) {
                    break 'frames;
                }
            }
        }
        view.draw(&lines)?;
    }

    drop(raw);
    if frames == 0 {
        warn!("no frames were processed");
    }
    info!(frames, heart_frames = positives, "detection stopped");
    Ok(())
}
