use crate::dataset::{Dataset, DatasetError};
use crate::features::FeatureVector;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One observed queue length together with the features at that moment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub features: FeatureVector,
    pub queue_length: f64,
}

/// In-memory training data: a feature matrix and its targets.
#[derive(Clone, Debug)]
pub struct TrainingSet {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl TrainingSet {
    /// Builds a set from row-major features and targets.
    ///
    /// # Errors
    /// Empty input, `x`/`y` length mismatch, rows of different widths, or any
    /// non-finite value.
    pub fn new(x: Vec<Vec<f64>>, y: Vec<f64>) -> Result<Self, DatasetError> {
        if x.len() != y.len() {
            return Err(DatasetError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        if x.is_empty() {
            return Err(DatasetError::Empty);
        }
        let n_features = x[0].len();
        for (row, values) in x.iter().enumerate() {
            if values.len() != n_features {
                return Err(DatasetError::RaggedRow {
                    row,
                    expected: n_features,
                    got: values.len(),
                });
            }
            if values.iter().any(|v| !v.is_finite()) || !y[row].is_finite() {
                return Err(DatasetError::NonFinite { row });
            }
        }

        // Rows are checked rectangular above, so indexing cannot go out of range.
        let matrix = Array2::from_shape_fn((x.len(), n_features), |(i, j)| x[i][j]);
        Ok(Self {
            x: matrix,
            y: Array1::from(y),
        })
    }

    /// Builds a set from validated feature vectors and observed queue lengths.
    pub fn from_observations(observations: &[Observation]) -> Result<Self, DatasetError> {
        let (x, y): (Vec<Vec<f64>>, Vec<f64>) = observations
            .iter()
            .map(|o| (o.features.to_array().to_vec(), o.queue_length))
            .unzip();
        Self::new(x, y)
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// The whole feature matrix.
    pub fn features(&self) -> &Array2<f64> {
        &self.x
    }

    pub fn targets(&self) -> &Array1<f64> {
        &self.y
    }

    /// Returns a copy with the feature matrix replaced, keeping targets.
    pub(crate) fn with_features(&self, x: Array2<f64>) -> Self {
        Self {
            x,
            y: self.y.clone(),
        }
    }
}

impl Dataset for TrainingSet {
    type Error = DatasetError;

    fn len(&self) -> Option<usize> {
        Some(self.x.nrows())
    }

    fn get_batch(&self, range: Range<usize>) -> Result<(Array2<f64>, Array1<f64>), Self::Error> {
        let len = self.x.nrows();
        if range.start > range.end || range.end > len {
            return Err(DatasetError::OutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        let x = self.x.slice(ndarray::s![range.clone(), ..]).to_owned();
        let y = self.y.slice(ndarray::s![range]).to_owned();
        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_row_major_layout() {
        let set = TrainingSet::new(
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
            vec![10.0, 20.0],
        )
        .unwrap();
        assert_eq!(set.features().dim(), (2, 3));
        assert_eq!(set.features()[[0, 2]], 3.0);
        assert_eq!(set.features()[[1, 0]], 4.0);
        assert_eq!(set.targets()[1], 20.0);
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let err = TrainingSet::new(vec![vec![1.0]], vec![1.0, 2.0]).unwrap_err();
        assert_eq!(err, DatasetError::LengthMismatch { x: 1, y: 2 });
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(
            TrainingSet::new(vec![], vec![]).unwrap_err(),
            DatasetError::Empty
        );
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        let err = TrainingSet::new(vec![vec![1.0, 2.0], vec![3.0]], vec![0.0, 1.0]).unwrap_err();
        assert_eq!(
            err,
            DatasetError::RaggedRow {
                row: 1,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_new_rejects_non_finite_target() {
        let err = TrainingSet::new(vec![vec![1.0], vec![2.0]], vec![0.0, f64::NAN]).unwrap_err();
        assert_eq!(err, DatasetError::NonFinite { row: 1 });
    }

    #[test]
    fn test_get_batch_slices_rows() {
        let set = TrainingSet::new(
            vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]],
            vec![10.0, 20.0, 30.0],
        )
        .unwrap();

        let (x, y) = set.get_batch(1..3).unwrap();
        assert_eq!(x, ndarray::array![[3.0, 4.0], [5.0, 6.0]]);
        assert_eq!(y, ndarray::array![20.0, 30.0]);
        assert!(set.get_batch(2..4).is_err());
    }

    #[test]
    fn test_from_observations_uses_feature_order() {
        let features = FeatureVector::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let set = TrainingSet::from_observations(&[Observation {
            features,
            queue_length: 7.0,
        }])
        .unwrap();
        assert_eq!(set.n_features(), 6);
        assert_eq!(set.features().row(0).to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(set.targets()[0], 7.0);
    }
}
