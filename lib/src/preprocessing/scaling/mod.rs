//! Scaling transformers for feature normalization.
//!
//! Only z-score scaling is needed here: the trained regression path
//! standardizes every column with statistics learned once at training time.

pub mod standard;

pub use standard::{FittedStandardScaler, StandardScaler};
