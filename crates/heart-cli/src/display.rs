//! Text rendering of live status

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::terminal::{Clear, ClearType};
use crossterm::{queue, style::Print};
use heart_capture::CollectionSession;
use heart_inference::Decision;

/// Width of the probability bar, in cells
pub const BAR_WIDTH: usize = 30;

/// `[#########.....|....]`: filled up to `probability`, `|` at the threshold
pub fn probability_bar(probability: f64, threshold: f64, width: usize) -> String {
    let cell = |v: f64| ((v.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    let filled = cell(probability);
    let marker = cell(threshold).min(width.saturating_sub(1));

    let body: String = (0..width)
        .map(|i| {
            if i == marker {
                '|'
            } else if i < filled {
                '#'
            } else {
                '.'
            }
        })
        .collect();
    format!("[{}]", body)
}

/// Status lines for one detection frame
pub fn detect_lines(decision: &Decision, detected: usize, threshold: f64) -> Vec<String> {
    match decision.confidence {
        Some(confidence) => {
            let headline = if decision.is_gesture {
                "HEART <3"
            } else {
                "NO HEART"
            };
            vec![
                headline.to_string(),
                format!(
                    "Confidence: {:.1}% {}",
                    confidence * 100.0,
                    probability_bar(confidence, threshold, BAR_WIDTH)
                ),
            ]
        }
        None => vec![
            "NO HEART".to_string(),
            format!("Need 2 hands (detected: {})", detected),
        ],
    }
}

/// Status lines for one collection frame
pub fn collect_lines(session: &CollectionSession) -> Vec<String> {
    let counts = session.counts();
    let mut lines = vec![
        session.detection_status(),
        session.capture_status(),
        format!(
            "Samples - heart: {} | not-heart: {}",
            counts.heart, counts.not_heart
        ),
    ];
    if let Some(notice) = session.notice() {
        lines.push(notice.to_string());
    }
    lines
}

/// Redraws a block of status lines in place
pub struct StatusView<W: Write> {
    out: W,
    /// Plain line-per-frame output, no cursor control
    plain: bool,
}

impl<W: Write> StatusView<W> {
    pub fn new(out: W, plain: bool) -> Self {
        Self { out, plain }
    }

    pub fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        if self.plain {
            writeln!(self.out, "{}", lines.join(" | "))?;
        } else {
            queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
            for line in lines {
                // Raw mode does not translate \n
                queue!(self.out, Print(line), Print("\r\n"))?;
            }
        }
        self.out.flush()
    }
}
