//! Wholesale dataset reader

use std::path::Path;

use heart_core::{FeatureVector, HeartError, HeartResult, Label, LabeledSample, FEATURE_LEN};
use tracing::info;

use crate::{csv_error, header};

/// Load every sample in the dataset.
///
/// A missing file is [`HeartError::MissingArtifact`]; a wrong header or a
/// malformed row is [`HeartError::Dataset`] naming the offending row.
pub fn read_dataset(path: impl AsRef<Path>) -> HeartResult<Vec<LabeledSample>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(HeartError::MissingArtifact {
            what: "Dataset file",
            path: path.to_path_buf(),
            hint: "run `heart collect` first",
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(csv_error)?;

    let expected = header();
    let found = reader.headers().map_err(csv_error)?;
    let matches = found.len() == expected.len()
        && found.iter().zip(&expected).all(|(a, b)| a == b.as_str());
    if !matches {
        return Err(HeartError::Dataset(format!(
            "unexpected header in {}: {} columns, expected {}",
            path.display(),
            found.len(),
            expected.len()
        )));
    }

    let mut samples = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        samples.push(parse_row(&record).map_err(|e| {
            HeartError::Dataset(format!("row {}: {}", i + 1, e))
        })?);
    }

    info!(path = %path.display(), samples = samples.len(), "dataset loaded");
    Ok(samples)
}

fn parse_row(record: &csv::StringRecord) -> Result<LabeledSample, String> {
    if record.len() != FEATURE_LEN + 1 {
        return Err(format!(
            "expected {} fields, got {}",
            FEATURE_LEN + 1,
            record.len()
        ));
    }

    let mut values = [0.0; FEATURE_LEN];
    for (slot, field) in values.iter_mut().zip(record.iter()) {
        *slot = field
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("bad feature value {:?}: {}", field, e))?;
    }

    let raw = record.get(FEATURE_LEN).unwrap_or_default().trim();
    let label = raw
        .parse::<u8>()
        .map_err(|_| format!("bad label {:?}", raw))
        .and_then(|v| Label::from_u8(v).map_err(|e| e.to_string()))?;

    let features = FeatureVector::from_slice(&values).map_err(|e| e.to_string())?;
    Ok(LabeledSample::new(features, label))
}
