//! Heart Capture - Label collection workflow
//!
//! Two independent capture paths feed the dataset:
//! - Immediate: "label now" turns the current frame into a sample
//! - Auto: a sustained two-hand hold freezes one sample that waits for a
//!   human to confirm it as heart or not-heart
//!
//! # Auto-capture states
//!
//! ```text
//! Idle ──two hands──▶ Accumulating ──hold ≥ 3s──▶ Captured ──confirm──▶ Idle
//!  ▲                       │
//!  └──────hands lost───────┘
//! ```

pub mod auto_capture;
pub mod session;

pub use auto_capture::*;
pub use session::*;
