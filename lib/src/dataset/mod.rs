//! Dataset abstractions for training the queue model.
//!
//! - **Dataset** — a source of `(X, y)` pairs: `X` is `(n_samples, n_features)`,
//!   `y` is `(n_samples,)`.
//! - **Batch** — a contiguous subset of samples for mini-batch gradient descent.
//!
//! # Example
//!
//! ```rust
//! use queue_predictor::dataset::{Dataset, TrainingSet};
//!
//! let x = vec![vec![1.0], vec![2.0]];
//! let y = vec![0.0, 1.0];
//! let dataset = TrainingSet::new(x, y).unwrap();
//!
//! for batch in dataset.batches(1) {
//!     let (x_batch, y_batch) = batch.unwrap();
//!     assert_eq!(x_batch.nrows(), y_batch.len());
//! }
//! ```

use ndarray::{Array1, Array2};
use std::{fmt::Display, ops::Range};
use thiserror::Error;

pub mod memory;
pub use self::memory::{Observation, TrainingSet};

/// Failure building or reading a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    #[error("x and y must have same length (x: {x}, y: {y})")]
    LengthMismatch { x: usize, y: usize },
    #[error("dataset is empty")]
    Empty,
    #[error("row {row} has {got} features, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        got: usize,
    },
    #[error("row {row} contains a non-finite value")]
    NonFinite { row: usize },
    #[error("batch range {start}..{end} is out of bounds for {len} samples")]
    OutOfBounds { start: usize, end: usize, len: usize },
}

/// Abstract interface for a training dataset.
pub trait Dataset {
    /// Error type returned when accessing data.
    type Error: Display + 'static;

    /// Returns the total number of samples, if known.
    fn len(&self) -> Option<usize>;

    /// Default implementation checks if `len() == Some(0)`.
    fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Creates an iterator over fixed-size batches (last batch may be smaller).
    fn batches(&self, batch_size: usize) -> DatasetBatchIter<'_, Self>
    where
        Self: Sized,
    {
        DatasetBatchIter {
            dataset: self,
            batch_size: batch_size.max(1),
            current: 0,
        }
    }

    /// Loads the samples in `range` as a feature matrix and target vector.
    fn get_batch(&self, range: Range<usize>) -> Result<(Array2<f64>, Array1<f64>), Self::Error>;
}

/// Iterator over dataset batches, created by [`Dataset::batches`].
///
/// Data is fetched lazily; errors from `get_batch` are yielded as
/// `Some(Err(e))`.
pub struct DatasetBatchIter<'a, D: ?Sized> {
    dataset: &'a D,
    batch_size: usize,
    current: usize,
}

impl<'a, D: Dataset> Iterator for DatasetBatchIter<'a, D> {
    type Item = Result<(Array2<f64>, Array1<f64>), D::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let total = self.dataset.len()?;
        if self.current >= total {
            return None;
        }

        let end = (self.current + self.batch_size).min(total);
        let range = self.current..end;
        self.current = end;

        Some(self.dataset.get_batch(range))
    }
}
