//! Heart Features - From detected hands to a classifier input
//!
//! Collection and inference both go through this crate. There is exactly one
//! definition of the feature vector; a training-time and an inference-time
//! variant drifting apart would silently skew the classifier.
//!
//! # Pipeline
//!
//! Hands → [`normalize`] each (wrist at origin, wrist-to-middle-MCP = 1)
//!       → order Left before Right → concatenate → [`FeatureVector`]
//!
//! [`FeatureVector`]: heart_core::FeatureVector

pub mod fuse;
pub mod normalize;

pub use fuse::*;
pub use normalize::*;
