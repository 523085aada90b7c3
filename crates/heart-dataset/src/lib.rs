//! Heart Dataset - labeled feature vectors on disk
//!
//! One CSV file, one row per sample:
//!
//! ```text
//! feature_0,feature_1,...,feature_83,label
//! ```
//!
//! The column order is the [`FeatureVector`](heart_core::FeatureVector)
//! layout. Rows are only ever appended; the trainer reads the whole file.

pub mod reader;
pub mod writer;

pub use reader::*;
pub use writer::*;

use heart_core::FEATURE_LEN;

/// Default dataset path
pub const DEFAULT_DATASET_PATH: &str = "heart_hands_dataset.csv";

/// Name of the label column
pub const LABEL_COLUMN: &str = "label";

/// Header row: `feature_0..feature_83` then `label`
pub fn header() -> Vec<String> {
    (0..FEATURE_LEN)
        .map(|i| format!("feature_{}", i))
        .chain(std::iter::once(LABEL_COLUMN.to_string()))
        .collect()
}

pub(crate) fn csv_error(err: csv::Error) -> heart_core::HeartError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(io) => heart_core::HeartError::Io(io),
            other => heart_core::HeartError::Dataset(format!("{:?}", other)),
        }
    } else {
        heart_core::HeartError::Dataset(err.to_string())
    }
}
