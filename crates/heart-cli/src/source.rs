//! Landmark sources
//!
//! The hand-landmark detector runs out of process and speaks JSON lines, one
//! object per camera frame:
//!
//! ```text
//! {"hands":[{"handedness":"Left","landmarks":[{"x":0.41,"y":0.62}, ...]}],"error":null}
//! ```
//!
//! A live detector owns the camera, mirrors each frame, and prints `READY`
//! once it is set up. A replay file holds previously recorded lines.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};
use std::time::Duration;

use heart_core::{
    Detection, FrameClock, FrameTime, Hand, HandDetector, Handedness, HeartError, HeartResult,
    Landmark,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Deserialize, Debug)]
struct PointJson {
    x: f32,
    y: f32,
}

#[derive(Deserialize, Debug)]
struct HandJson {
    handedness: String,
    landmarks: Vec<PointJson>,
}

#[derive(Deserialize, Debug)]
struct FrameJson {
    #[serde(default)]
    hands: Vec<HandJson>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse one detector line.
///
/// Hands with the wrong number of landmarks or an unknown handedness are
/// dropped with a warning. A detector-reported error yields an empty frame.
/// Malformed JSON means the stream itself is broken.
pub fn parse_frame(line: &str) -> HeartResult<Detection> {
    let frame: FrameJson = serde_json::from_str(line)
        .map_err(|e| HeartError::InputUnavailable(format!("malformed detector output: {}", e)))?;

    if let Some(error) = frame.error {
        warn!("detector error: {}", error);
        return Ok(Detection::empty());
    }

    let mut hands = Vec::with_capacity(frame.hands.len());
    for hand in frame.hands {
        let handedness = match Handedness::from_label(&hand.handedness) {
            Ok(h) => h,
            Err(e) => {
                warn!("skipping hand: {}", e);
                continue;
            }
        };
        let points = hand
            .landmarks
            .iter()
            .map(|p| Landmark::new(p.x, p.y))
            .collect();
        match Hand::new(points, handedness) {
            Ok(hand) => hands.push(hand),
            Err(e) => warn!("skipping hand: {}", e),
        }
    }
    Ok(Detection::new(hands))
}

/// Detections read line by line from any buffered stream
#[derive(Debug)]
pub struct LineDetector<R> {
    reader: R,
    line: String,
    frames: u64,
}

impl<R: BufRead> LineDetector<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            frames: 0,
        }
    }

    /// Frames read so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn next_line(&mut self) -> HeartResult<Option<&str>> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let trimmed = self.line.trim();
            if !trimmed.is_empty() && trimmed != "READY" {
                return Ok(Some(self.line.trim()));
            }
        }
    }
}

impl<R: BufRead> HandDetector for LineDetector<R> {
    fn detect_next(&mut self) -> HeartResult<Detection> {
        let line = self
            .next_line()?
            .ok_or_else(|| HeartError::InputUnavailable("end of landmark stream".into()))?;
        let detection = parse_frame(line)?;
        self.frames += 1;
        Ok(detection)
    }
}

/// Recorded frames from a JSON-lines file
pub type ReplayDetector = LineDetector<BufReader<File>>;

/// Open a replay file
pub fn open_replay(path: &Path) -> HeartResult<ReplayDetector> {
    let file = File::open(path).map_err(|e| {
        HeartError::InputUnavailable(format!("cannot open replay {}: {}", path.display(), e))
    })?;
    info!(path = %path.display(), "replaying landmark frames");
    Ok(LineDetector::new(BufReader::new(file)))
}

/// Read the detector's first line, which must be `READY`
fn await_ready<R: BufRead>(reader: &mut R) -> HeartResult<()> {
    let mut ready = String::new();
    reader.read_line(&mut ready).map_err(|e| {
        HeartError::InputUnavailable(format!("detector handshake failed: {}", e))
    })?;
    if ready.trim() != "READY" {
        return Err(HeartError::InputUnavailable(format!(
            "detector did not signal ready, got {:?}",
            ready.trim()
        )));
    }
    Ok(())
}

/// Live detector subprocess
pub struct SubprocessDetector {
    child: Child,
    lines: LineDetector<BufReader<ChildStdout>>,
}

impl SubprocessDetector {
    /// Start the detector and wait for its `READY` line
    pub fn spawn(program: &str, args: &[String]) -> HeartResult<Self> {
        info!(program, ?args, "starting hand detector");
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                HeartError::InputUnavailable(format!("cannot start detector {}: {}", program, e))
            })?;

        let Some(stdout) = child.stdout.take() else {
            let _ = child.kill();
            return Err(HeartError::InputUnavailable("detector stdout unavailable".into()));
        };
        let mut reader = BufReader::new(stdout);

        if let Err(e) = await_ready(&mut reader) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(e);
        }
        info!("hand detector ready");

        Ok(Self {
            child,
            lines: LineDetector::new(reader),
        })
    }
}

impl HandDetector for SubprocessDetector {
    fn detect_next(&mut self) -> HeartResult<Detection> {
        self.lines.detect_next()
    }
}

impl Drop for SubprocessDetector {
    fn drop(&mut self) {
        debug!(frames = self.lines.frames(), "stopping hand detector");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Where frames come from for one run
pub enum LandmarkSource {
    Live(SubprocessDetector),
    Replay(ReplayDetector),
}

impl LandmarkSource {
    /// Running out of frames ends a replay normally; for a live detector it
    /// means the camera or detector failed.
    pub fn ends_normally(&self) -> bool {
        matches!(self, LandmarkSource::Replay(_))
    }
}

impl HandDetector for LandmarkSource {
    fn detect_next(&mut self) -> HeartResult<Detection> {
        match self {
            LandmarkSource::Live(d) => d.detect_next(),
            LandmarkSource::Replay(d) => d.detect_next(),
        }
    }
}

/// Timestamps for frames as they are read
pub enum FrameTimer {
    /// Wall clock; live frames arrive in real time
    Live(FrameClock),
    /// Recorded frames at a fixed spacing
    Replay { period: Duration, frames: u64 },
}

impl FrameTimer {
    /// Replay timing at `fps` frames per second
    pub fn replay(fps: f64) -> HeartResult<Self> {
        let period = Duration::try_from_secs_f64(1.0 / fps)
            .ok()
            .filter(|period| !period.is_zero())
            .ok_or_else(|| HeartError::Config(format!("fps must be positive, got {}", fps)))?;
        Ok(FrameTimer::Replay { period, frames: 0 })
    }

    pub fn for_source(source: &LandmarkSource, fps: f64) -> HeartResult<Self> {
        match source {
            LandmarkSource::Live(_) => Ok(FrameTimer::Live(FrameClock::new())),
            LandmarkSource::Replay(_) => Self::replay(fps),
        }
    }

    /// Time of the frame just read
    pub fn tick(&mut self) -> FrameTime {
        match self {
            FrameTimer::Live(clock) => clock.now(),
            FrameTimer::Replay { period, frames } => {
                let t = FrameTime::from_micros((period.as_micros() as u64).saturating_mul(*frames));
                *frames += 1;
                t
            }
        }
    }
}
