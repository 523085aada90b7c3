//! Model artifacts - binary encoding of the fitted scaler and classifier
//!
//! Both artifacts share one layout (all integers and floats little-endian):
//! - Bytes 0-3: Magic (`HHSC` scaler, `HHLR` classifier)
//! - Byte 4: Format version
//! - Bytes 5-8: Dimension `d` (u32)
//! - Payload:
//!   - scaler: `d` means, then `d` scales (f64)
//!   - classifier: bias, then `d` weights (f64)
//!
//! The scaler and classifier are written to separate files and loaded
//! independently. Either one missing is fatal for inference.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use bytes::{Buf, BufMut, Bytes, BytesMut};
use heart_core::{HeartError, HeartResult, FEATURE_LEN};
use tracing::info;

use crate::{LogisticClassifier, StandardScaler};

/// Magic prefix of a scaler artifact
pub const SCALER_MAGIC: [u8; 4] = *b"HHSC";

/// Magic prefix of a classifier artifact
pub const CLASSIFIER_MAGIC: [u8; 4] = *b"HHLR";

/// Current artifact format version
pub const ARTIFACT_VERSION: u8 = 1;

/// Magic + version + dimension
pub const ARTIFACT_HEADER_SIZE: usize = 9;

/// Default classifier artifact path
pub const DEFAULT_MODEL_PATH: &str = "heart_hands_model.bin";

/// Default scaler artifact path
pub const DEFAULT_SCALER_PATH: &str = "heart_hands_scaler.bin";

const TRAIN_HINT: &str = "run `heart train` first";

/// Encode a scaler
pub fn encode_scaler(scaler: &StandardScaler) -> Bytes {
    let dim = scaler.dim();
    let mut buf = BytesMut::with_capacity(ARTIFACT_HEADER_SIZE + dim * 16);
    put_header(&mut buf, SCALER_MAGIC, dim);
    scaler.mean().iter().for_each(|v| buf.put_f64_le(*v));
    scaler.scale().iter().for_each(|v| buf.put_f64_le(*v));
    buf.freeze()
}

/// Decode a scaler
pub fn decode_scaler(mut buf: &[u8]) -> HeartResult<StandardScaler> {
    let dim = take_header(&mut buf, SCALER_MAGIC, "scaler")?;
    expect_payload(buf, dim * 2, "scaler")?;
    let mean = take_f64s(&mut buf, dim);
    let scale = take_f64s(&mut buf, dim);
    StandardScaler::from_parts(mean, scale)
}

/// Encode a classifier
pub fn encode_classifier(classifier: &LogisticClassifier) -> Bytes {
    let dim = classifier.dim();
    let mut buf = BytesMut::with_capacity(ARTIFACT_HEADER_SIZE + (dim + 1) * 8);
    put_header(&mut buf, CLASSIFIER_MAGIC, dim);
    buf.put_f64_le(classifier.bias());
    classifier.weights().iter().for_each(|w| buf.put_f64_le(*w));
    buf.freeze()
}

/// Decode a classifier
pub fn decode_classifier(mut buf: &[u8]) -> HeartResult<LogisticClassifier> {
    let dim = take_header(&mut buf, CLASSIFIER_MAGIC, "classifier")?;
    expect_payload(buf, dim + 1, "classifier")?;
    let bias = buf.get_f64_le();
    let weights = take_f64s(&mut buf, dim);
    LogisticClassifier::new(weights, bias)
}

pub fn save_scaler(path: &Path, scaler: &StandardScaler) -> HeartResult<()> {
    fs::write(path, encode_scaler(scaler))?;
    info!(path = %path.display(), "scaler saved");
    Ok(())
}

pub fn load_scaler(path: &Path) -> HeartResult<StandardScaler> {
    decode_scaler(&read_artifact(path, "Scaler file")?)
}

pub fn save_classifier(path: &Path, classifier: &LogisticClassifier) -> HeartResult<()> {
    fs::write(path, encode_classifier(classifier))?;
    info!(path = %path.display(), "model saved");
    Ok(())
}

pub fn load_classifier(path: &Path) -> HeartResult<LogisticClassifier> {
    decode_classifier(&read_artifact(path, "Model file")?)
}

fn read_artifact(path: &Path, what: &'static str) -> HeartResult<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => HeartError::MissingArtifact {
            what,
            path: path.to_path_buf(),
            hint: TRAIN_HINT,
        },
        _ => HeartError::Io(e),
    })
}

fn put_header(buf: &mut BytesMut, magic: [u8; 4], dim: usize) {
    buf.put_slice(&magic);
    buf.put_u8(ARTIFACT_VERSION);
    buf.put_u32_le(dim as u32);
}

fn take_header(buf: &mut &[u8], magic: [u8; 4], kind: &str) -> HeartResult<usize> {
    if buf.len() < ARTIFACT_HEADER_SIZE {
        return Err(HeartError::InvalidArtifact(format!(
            "{} artifact truncated: {} bytes",
            kind,
            buf.len()
        )));
    }

    let mut found = [0u8; 4];
    buf.copy_to_slice(&mut found);
    if found != magic {
        return Err(HeartError::InvalidArtifact(format!(
            "not a {} artifact (magic {:?})",
            kind, found
        )));
    }

    let version = buf.get_u8();
    if version != ARTIFACT_VERSION {
        return Err(HeartError::InvalidArtifact(format!(
            "unsupported {} artifact version {}",
            kind, version
        )));
    }

    let dim = buf.get_u32_le() as usize;
    if dim != FEATURE_LEN {
        return Err(HeartError::InvalidArtifact(format!(
            "{} artifact has dimension {}, expected {}",
            kind, dim, FEATURE_LEN
        )));
    }
    Ok(dim)
}

fn expect_payload(buf: &[u8], values: usize, kind: &str) -> HeartResult<()> {
    let expected = values * 8;
    if buf.len() != expected {
        return Err(HeartError::InvalidArtifact(format!(
            "{} artifact payload is {} bytes, expected {}",
            kind,
            buf.len(),
            expected
        )));
    }
    Ok(())
}

fn take_f64s(buf: &mut &[u8], n: usize) -> Vec<f64> {
    (0..n).map(|_| buf.get_f64_le()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use heart_core::FeatureVector;

    fn scaler() -> StandardScaler {
        let a = FeatureVector::from_slice(&[0.0; FEATURE_LEN]).unwrap();
        let b = FeatureVector::from_slice(&[2.0; FEATURE_LEN]).unwrap();
        StandardScaler::fit(&[a, b]).unwrap()
    }

    fn classifier() -> LogisticClassifier {
        let weights = (0..FEATURE_LEN).map(|i| i as f64 * 0.01 - 0.4).collect();
        LogisticClassifier::new(weights, -0.25).unwrap()
    }

    #[test]
    fn test_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let scaler_path = dir.path().join(DEFAULT_SCALER_PATH);
        let model_path = dir.path().join(DEFAULT_MODEL_PATH);

        save_scaler(&scaler_path, &scaler()).unwrap();
        save_classifier(&model_path, &classifier()).unwrap();

        assert_eq!(load_scaler(&scaler_path).unwrap(), scaler());
        assert_eq!(load_classifier(&model_path).unwrap(), classifier());
    }

    #[test]
    fn test_missing_file_names_train_step() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_classifier(&dir.path().join("absent.bin")).unwrap_err();
        match err {
            HeartError::MissingArtifact { what, hint, .. } => {
                assert_eq!(what, "Model file");
                assert!(hint.contains("heart train"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(matches!(
            load_scaler(&dir.path().join("absent.bin")),
            Err(HeartError::MissingArtifact { what: "Scaler file", .. })
        ));
    }

    #[test]
    fn test_header_layout() {
        let bytes = encode_classifier(&classifier());
        assert_eq!(&bytes[0..4], b"HHLR");
        assert_eq!(bytes[4], ARTIFACT_VERSION);
        assert_eq!(&bytes[5..9], &(FEATURE_LEN as u32).to_le_bytes());
        assert_eq!(bytes.len(), ARTIFACT_HEADER_SIZE + (FEATURE_LEN + 1) * 8);
    }

    #[test]
    fn test_swapped_artifacts_rejected() {
        let scaler_bytes = encode_scaler(&scaler());
        let model_bytes = encode_classifier(&classifier());
        assert!(matches!(
            decode_classifier(&scaler_bytes),
            Err(HeartError::InvalidArtifact(_))
        ));
        assert!(matches!(
            decode_scaler(&model_bytes),
            Err(HeartError::InvalidArtifact(_))
        ));
    }

    #[test]
    fn test_truncated_and_bad_version_rejected() {
        let bytes = encode_scaler(&scaler());
        assert!(decode_scaler(&bytes[..4]).is_err());
        assert!(decode_scaler(&bytes[..bytes.len() - 1]).is_err());

        let mut bad = bytes.to_vec();
        bad[4] = 99;
        assert!(decode_scaler(&bad).is_err());
    }
}
