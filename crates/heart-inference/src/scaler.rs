//! Per-feature standardization

use heart_core::{FeatureVector, HeartError, HeartResult, FEATURE_LEN};
use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::FeatureScaler;

/// Stack feature vectors into a `samples x FEATURE_LEN` matrix
pub fn feature_matrix<'a, I>(samples: I) -> Array2<f64>
where
    I: IntoIterator<Item = &'a FeatureVector>,
{
    let rows: Vec<&FeatureVector> = samples.into_iter().collect();
    Array2::from_shape_fn((rows.len(), FEATURE_LEN), |(i, j)| rows[i].as_slice()[j])
}

/// Zero-mean, unit-variance scaling fitted on training features.
///
/// Features with zero variance get a scale of 1.0 so they pass through
/// centered instead of dividing by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Build from stored parameters. Both vectors must be `FEATURE_LEN` long.
    pub fn from_parts(mean: Vec<f64>, scale: Vec<f64>) -> HeartResult<Self> {
        if mean.len() != FEATURE_LEN || scale.len() != FEATURE_LEN {
            return Err(HeartError::InvalidArtifact(format!(
                "scaler expects {} means and scales, got {} and {}",
                FEATURE_LEN,
                mean.len(),
                scale.len()
            )));
        }
        if scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err(HeartError::InvalidArtifact(
                "scaler contains a zero or non-finite scale".into(),
            ));
        }
        Ok(Self { mean, scale })
    }

    /// Fit mean and population standard deviation per feature
    pub fn fit(samples: &[FeatureVector]) -> HeartResult<Self> {
        Self::fit_records(feature_matrix(samples).view())
    }

    /// Fit on a `samples x FEATURE_LEN` matrix
    pub fn fit_records(records: ArrayView2<f64>) -> HeartResult<Self> {
        if records.ncols() != FEATURE_LEN {
            return Err(HeartError::Dataset(format!(
                "expected {} feature columns, got {}",
                FEATURE_LEN,
                records.ncols()
            )));
        }
        let mean = records.mean_axis(Axis(0)).ok_or_else(|| {
            HeartError::InsufficientData("cannot fit scaler on zero samples".into())
        })?;
        let scale = records
            .std_axis(Axis(0), 0.0)
            .mapv(|std| if std > 0.0 { std } else { 1.0 });

        Ok(Self {
            mean: mean.to_vec(),
            scale: scale.to_vec(),
        })
    }

    /// Scale every row of `records`
    pub fn transform_records(&self, records: ArrayView2<f64>) -> Array2<f64> {
        let mean = ArrayView1::from(self.mean.as_slice());
        let scale = ArrayView1::from(self.scale.as_slice());
        (&records - &mean) / &scale
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    pub fn dim(&self) -> usize {
        self.mean.len()
    }
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> Vec<f64> {
        features
            .as_slice()
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (m, s))| (v - m) / s)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fv(f: impl Fn(usize) -> f64) -> FeatureVector {
        let values: Vec<f64> = (0..FEATURE_LEN).map(f).collect();
        FeatureVector::from_slice(&values).unwrap()
    }

    #[test]
    fn test_fit_centers_and_scales() {
        let samples = [fv(|_| 1.0), fv(|_| 3.0)];
        let scaler = StandardScaler::fit(&samples).unwrap();

        assert_eq!(scaler.dim(), FEATURE_LEN);
        assert!(scaler.mean().iter().all(|m| *m == 2.0));
        assert!(scaler.scale().iter().all(|s| *s == 1.0));

        let low = scaler.transform(&samples[0]);
        let high = scaler.transform(&samples[1]);
        assert!(low.iter().all(|v| *v == -1.0));
        assert!(high.iter().all(|v| *v == 1.0));
    }

    #[test]
    fn test_zero_variance_feature_passes_through_centered() {
        let samples = [fv(|i| i as f64), fv(|i| i as f64)];
        let scaler = StandardScaler::fit(&samples).unwrap();
        assert!(scaler.scale().iter().all(|s| *s == 1.0));
        assert!(scaler.transform(&samples[0]).iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_record_transform_matches_per_vector_transform() {
        let samples = [fv(|i| i as f64), fv(|i| (i * 2) as f64 + 1.0), fv(|_| -4.0)];
        let scaler = StandardScaler::fit(&samples).unwrap();
        let scaled = scaler.transform_records(feature_matrix(&samples).view());

        assert_eq!(scaled.dim(), (3, FEATURE_LEN));
        for (row, sample) in scaled.rows().into_iter().zip(&samples) {
            let expected = scaler.transform(sample);
            for (a, b) in row.iter().zip(&expected) {
                assert!((a - b).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_wrong_width_rejected() {
        let records = Array2::<f64>::zeros((4, 3));
        assert!(matches!(
            StandardScaler::fit_records(records.view()),
            Err(HeartError::Dataset(_))
        ));
    }

    #[test]
    fn test_fit_on_empty_fails() {
        assert!(matches!(
            StandardScaler::fit(&[]),
            Err(HeartError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_from_parts_rejects_bad_shapes() {
        assert!(StandardScaler::from_parts(vec![0.0; 3], vec![1.0; 3]).is_err());
        assert!(StandardScaler::from_parts(vec![0.0; FEATURE_LEN], {
            let mut s = vec![1.0; FEATURE_LEN];
            s[5] = 0.0;
            s
        })
        .is_err());
        assert!(StandardScaler::from_parts(vec![0.0; FEATURE_LEN], vec![1.0; FEATURE_LEN]).is_ok());
    }
}
