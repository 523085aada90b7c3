//! Heart Test Harness - synthetic input and end-to-end validation
//!
//! This crate provides:
//! - Seeded synthetic hands in heart and non-heart poses
//! - Scripted frame scenarios and a scripted detector
//! - Scripted classifiers for decision-layer tests
//! - End-to-end collect → train → detect tests

pub mod scenario;
pub mod scripted;
pub mod synthetic;

#[cfg(test)]
mod integration;

pub use scenario::*;
pub use scripted::*;
pub use synthetic::*;
