//! Heart Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every stage of the pipeline:
//! - Landmarks, hands and handedness (the detector's output)
//! - Normalized hands and fused feature vectors (the classifier's input)
//! - Labels and labeled samples (the dataset's rows)
//! - Frame time and the detector/sink seams
//! - Error types

pub mod detector;
pub mod error;
pub mod feature;
pub mod hand;
pub mod sample;
pub mod time;

pub use detector::*;
pub use error::*;
pub use feature::*;
pub use hand::*;
pub use sample::*;
pub use time::*;
