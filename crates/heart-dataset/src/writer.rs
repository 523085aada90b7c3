//! Append-only dataset writer

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use heart_core::{HeartResult, LabeledSample, SampleSink};
use tracing::{debug, info};

use crate::{csv_error, header};

/// Appends labeled samples to a CSV file.
///
/// Every append is flushed, so samples survive a crash mid-session.
pub struct DatasetWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
    appended: usize,
}

impl DatasetWriter {
    /// Open `path` for appending, writing the header if the file is new or empty
    pub fn open(path: impl AsRef<Path>) -> HeartResult<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let fresh = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if fresh {
            writer.write_record(header()).map_err(csv_error)?;
            writer.flush()?;
            info!(path = %path.display(), "dataset created");
        } else {
            debug!(path = %path.display(), "appending to existing dataset");
        }

        Ok(Self {
            path,
            writer,
            appended: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Samples appended through this writer
    pub fn appended(&self) -> usize {
        self.appended
    }
}

impl SampleSink for DatasetWriter {
    fn append(&mut self, sample: &LabeledSample) -> HeartResult<()> {
        let row = sample
            .features
            .as_slice()
            .iter()
            .map(|v| v.to_string())
            .chain(std::iter::once(sample.label.as_u8().to_string()));
        self.writer.write_record(row).map_err(csv_error)?;
        self.writer.flush()?;
        self.appended += 1;
        Ok(())
    }
}

impl std::fmt::Debug for DatasetWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetWriter")
            .field("path", &self.path)
            .field("appended", &self.appended)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heart_core::{FeatureVector, Label, FEATURE_LEN};

    fn sample(value: f64, label: Label) -> LabeledSample {
        LabeledSample::new(
            FeatureVector::from_slice(&[value; FEATURE_LEN]).unwrap(),
            label,
        )
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");

        {
            let mut writer = DatasetWriter::open(&path).unwrap();
            writer.append(&sample(0.5, Label::Heart)).unwrap();
        }
        {
            let mut writer = DatasetWriter::open(&path).unwrap();
            writer.append(&sample(-0.5, Label::NotHeart)).unwrap();
            assert_eq!(writer.appended(), 1);
        }

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("feature_0,feature_1,"));
        assert!(lines[0].ends_with(",feature_83,label"));
        assert!(lines[1].ends_with(",1"));
        assert!(lines[2].starts_with("-0.5,"));
        assert!(lines[2].ends_with(",0"));
    }

    #[test]
    fn test_empty_existing_file_gets_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.csv");
        File::create(&path).unwrap();

        DatasetWriter::open(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("feature_0,"));
    }
}
