//! Standard Scaler (Z-score normalization).
//!
//! Transforms features by removing the mean and scaling to unit variance.
//!
//! The standard score of a sample `x` is calculated as:
//! ```text
//! z = (x - u) / s
//! ```
//! where `u` is the mean of the training samples, and `s` is the population
//! standard deviation. Columns with zero variance keep `s = 1`, so a
//! constant column maps to zero instead of dividing by zero.
//!
//! # Example
//! ```ignore
//! use queue_predictor::preprocessing::{FittedTransformer, StandardScaler, Transformer};
//!
//! let fitted = StandardScaler::new().fit(&training_rows)?;
//! let scaled = fitted.transform(&request_row)?;
//! ```

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array1, Array2, Axis};

/// StandardScaler transformer (unfitted).
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardScaler;

impl StandardScaler {
    pub fn new() -> Self {
        Self
    }
}

impl Transformer for StandardScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Fitted = FittedStandardScaler;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        if data.nrows() == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit StandardScaler on empty data".to_string(),
            ));
        }
        if let Some((row, _)) = data
            .outer_iter()
            .enumerate()
            .find(|(_, r)| r.iter().any(|v| !v.is_finite()))
        {
            return Err(PreprocessingError::MissingValues(format!(
                "non-finite value in row {}",
                row
            )));
        }

        let mean = data.mean_axis(Axis(0)).ok_or_else(|| {
            PreprocessingError::EmptyData("Cannot compute column means".to_string())
        })?;
        // Handle zero std (constant features)
        let std = data
            .std_axis(Axis(0), 0.0)
            .mapv(|s| if s == 0.0 { 1.0 } else { s });

        if std.iter().chain(mean.iter()).any(|v| !v.is_finite()) {
            return Err(PreprocessingError::NumericalError(
                "column statistics overflowed".to_string(),
            ));
        }

        Ok(FittedStandardScaler { mean, std })
    }
}

/// Fitted StandardScaler ready for inference.
#[derive(Clone, Debug)]
pub struct FittedStandardScaler {
    mean: Array1<f64>,
    std: Array1<f64>,
}

impl FittedStandardScaler {
    /// Get the mean values for each feature.
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Get the standard deviation values for each feature.
    pub fn std(&self) -> &Array1<f64> {
        &self.std
    }

    fn check_width(&self, cols: usize) -> Result<(), PreprocessingError> {
        if cols != self.mean.len() {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.mean.len(),
                got_features: cols,
            });
        }
        Ok(())
    }
}

impl FittedTransformer for FittedStandardScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        self.check_width(data.ncols())?;
        Ok((data - &self.mean) / &self.std)
    }

    fn inverse_transform(&self, data: &Self::Output) -> Result<Self::Input, PreprocessingError> {
        self.check_width(data.ncols())?;
        Ok(data * &self.std + &self.mean)
    }

    fn n_features_in(&self) -> usize {
        self.mean.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn create_test_data() -> Array2<f64> {
        array![[0.0, 1.0], [0.0, 1.0], [1.0, 3.0]]
    }

    #[test]
    fn test_standard_scaler_fit() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();

        // Mean: [1/3, 5/3]
        let mean = fitted.mean();
        assert!((mean[0] - 1.0 / 3.0).abs() < 1e-10);
        assert!((mean[1] - 5.0 / 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_standard_scaler_transform() {
        let data = create_test_data();
        let fitted = StandardScaler::new().fit(&data).unwrap();
        let transformed = fitted.transform(&data).unwrap();

        // After standardization, each column should have mean≈0 and std≈1
        let means = transformed.mean_axis(Axis(0)).unwrap();
        let stds = transformed.std_axis(Axis(0), 0.0);
        for col in 0..2 {
            assert!(means[col].abs() < 1e-10, "mean[{}] = {}", col, means[col]);
            assert!((stds[col] - 1.0).abs() < 1e-8, "std[{}] = {}", col, stds[col]);
        }
    }

    #[test]
    fn test_standard_scaler_inverse_transform() {
        let data = create_test_data();
        let fitted = StandardScaler::new().fit(&data).unwrap();

        let recovered = fitted
            .inverse_transform(&fitted.transform(&data).unwrap())
            .unwrap();

        for (o, r) in data.iter().zip(recovered.iter()) {
            assert!((o - r).abs() < 1e-10);
        }
    }

    #[test]
    fn test_standard_scaler_feature_mismatch() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();

        let wrong_data = array![[1.0, 2.0, 3.0]];
        let result = fitted.transform(&wrong_data);

        assert!(matches!(
            result,
            Err(PreprocessingError::FeatureMismatch {
                expected_features: 2,
                got_features: 3
            })
        ));
    }

    #[test]
    fn test_standard_scaler_inverse_feature_mismatch() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();
        let result = fitted.inverse_transform(&array![[1.0]]);
        assert!(matches!(
            result,
            Err(PreprocessingError::FeatureMismatch { .. })
        ));
    }

    #[test]
    fn test_standard_scaler_fit_transform() {
        let transformed = StandardScaler::new()
            .fit_transform(&create_test_data())
            .unwrap();
        let means = transformed.mean_axis(Axis(0)).unwrap();
        assert!(means.iter().all(|m| m.abs() < 1e-10));
    }

    #[test]
    fn test_standard_scaler_empty_data() {
        let data = Array2::<f64>::zeros((0, 2));
        assert!(matches!(
            StandardScaler::new().fit(&data),
            Err(PreprocessingError::EmptyData(_))
        ));
    }

    #[test]
    fn test_standard_scaler_rejects_nan() {
        let data = array![[1.0, 2.0], [f64::NAN, 3.0]];
        assert!(matches!(
            StandardScaler::new().fit(&data),
            Err(PreprocessingError::MissingValues(_))
        ));
    }

    #[test]
    fn test_standard_scaler_n_features_in() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();
        assert_eq!(fitted.n_features_in(), 2);
    }

    #[test]
    fn test_standard_scaler_constant_feature() {
        let data = array![[5.0, 1.0], [5.0, 2.0], [5.0, 3.0]];
        let fitted = StandardScaler::new().fit(&data).unwrap();

        // Std for constant feature should be 1 (handled internally)
        assert!((fitted.std()[0] - 1.0).abs() < 1e-12);
        assert!((fitted.mean()[0] - 5.0).abs() < 1e-12);

        let transformed = fitted.transform(&data).unwrap();
        assert!(transformed.column(0).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_row_fit_is_degenerate() {
        // One sample: every column is constant, so everything maps to zero.
        let row = array![[12.0, 3.0, 50.0, 0.0, 2.0, 3.0]];
        let transformed = StandardScaler::new().fit_transform(&row).unwrap();
        assert!(transformed.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_transform_uses_training_statistics() {
        let fitted = StandardScaler::new().fit(&create_test_data()).unwrap();
        let unseen = array![[1.0 / 3.0, 5.0 / 3.0]];
        let transformed = fitted.transform(&unseen).unwrap();
        assert!(transformed.iter().all(|v| v.abs() < 1e-10));
    }
}
