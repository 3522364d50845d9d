//! Feature preprocessing for the trained prediction path.
//!
//! Transformers follow a fit/transform split: an unfitted [`Transformer`]
//! learns statistics from training rows and returns a [`FittedTransformer`]
//! that only reads them afterwards.
//!
//! # Example
//!
//! ```ignore
//! use queue_predictor::preprocessing::{FittedTransformer, StandardScaler, Transformer};
//!
//! let fitted = StandardScaler::new().fit(&training_rows)?;
//! let scaled = fitted.transform(&request_row)?;
//! ```

pub mod error;
pub mod scaling;
pub mod traits;

pub use error::PreprocessingError;
pub use scaling::{FittedStandardScaler, StandardScaler};
pub use traits::{FittedTransformer, Transformer};
