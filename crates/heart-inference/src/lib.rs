//! Heart Inference - From feature vectors to a stable live decision
//!
//! Per frame: scale → classify → push probability into a trailing window →
//! compare the window mean against the threshold.
//!
//! A detection gap clears the window. History never carries across frames
//! in which fewer than two hands were seen.

pub mod artifact;
pub mod decision;
pub mod logistic;
pub mod model;
pub mod scaler;
pub mod window;

pub use artifact::*;
pub use decision::*;
pub use logistic::*;
pub use model::*;
pub use scaler::*;
pub use window::*;
