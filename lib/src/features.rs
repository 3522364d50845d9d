//! Store-traffic feature vector and input vectorization.
//!
//! A prediction request arrives either as a mapping from feature name to value
//! or as a raw ordered sequence. Both are turned into a [`FeatureVector`] with
//! the column order fixed by [`FEATURE_NAMES`].

use crate::error::ValidationError;
use ndarray::{arr2, Array1, Array2};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of features the predictor consumes.
pub const FEATURE_COUNT: usize = 6;

/// Feature names in column order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "time_of_day",
    "day_of_week",
    "store_traffic",
    "peak_hours",
    "avg_service_time",
    "checkout_counters",
];

/// One fully validated row of features.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub time_of_day: f64,
    pub day_of_week: f64,
    pub store_traffic: f64,
    pub peak_hours: f64,
    pub avg_service_time: f64,
    pub checkout_counters: f64,
}

impl FeatureVector {
    /// Builds a vector from values given in [`FEATURE_NAMES`] order.
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [time_of_day, day_of_week, store_traffic, peak_hours, avg_service_time, checkout_counters] =
            values;
        Self {
            time_of_day,
            day_of_week,
            store_traffic,
            peak_hours,
            avg_service_time,
            checkout_counters,
        }
    }

    /// Values in [`FEATURE_NAMES`] order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.time_of_day,
            self.day_of_week,
            self.store_traffic,
            self.peak_hours,
            self.avg_service_time,
            self.checkout_counters,
        ]
    }

    /// Looks a feature up by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|idx| self.to_array()[idx])
    }

    pub fn to_ndarray(&self) -> Array1<f64> {
        Array1::from(self.to_array().to_vec())
    }

    /// Single-row matrix of shape `(1, FEATURE_COUNT)`.
    pub fn to_row(&self) -> Array2<f64> {
        arr2(&[self.to_array()])
    }
}

/// Raw prediction input before validation.
#[derive(Clone, Copy, Debug)]
pub enum FeatureInput<'a> {
    /// Named features; extra keys are ignored.
    Mapping(&'a Map<String, Value>),
    /// Ordered values of arbitrary JSON type, coerced like mapping values.
    Sequence(&'a [Value]),
    /// Ordered numbers.
    Numbers(&'a [f64]),
}

impl<'a> FeatureInput<'a> {
    /// Validates the input and produces a feature vector.
    ///
    /// # Errors
    /// - [`ValidationError::MissingFeature`] for the first absent key, in column order
    /// - [`ValidationError::InvalidType`] for a value that is not a finite number
    /// - [`ValidationError::WrongFeatureCount`] for a sequence that is not exactly 6 long
    pub fn vectorize(&self) -> Result<FeatureVector, ValidationError> {
        self.collect(None)
    }

    /// Like [`vectorize`](Self::vectorize), but absent mapping keys take their
    /// value from `defaults`. Sequences still need all values; present values
    /// must still be numeric.
    pub fn vectorize_with_defaults(
        &self,
        defaults: &FeatureVector,
    ) -> Result<FeatureVector, ValidationError> {
        self.collect(Some(defaults))
    }

    fn collect(&self, defaults: Option<&FeatureVector>) -> Result<FeatureVector, ValidationError> {
        let mut values = [0.0; FEATURE_COUNT];
        match self {
            FeatureInput::Mapping(map) => {
                for (idx, &name) in FEATURE_NAMES.iter().enumerate() {
                    values[idx] = match (map.get(name), defaults) {
                        (Some(value), _) => coerce(name, value)?,
                        (None, Some(defaults)) => defaults.to_array()[idx],
                        (None, None) => return Err(ValidationError::MissingFeature(name)),
                    };
                }
            }
            FeatureInput::Sequence(items) => {
                check_count(items.len())?;
                for (idx, (&name, value)) in FEATURE_NAMES.iter().zip(items.iter()).enumerate() {
                    values[idx] = coerce(name, value)?;
                }
            }
            FeatureInput::Numbers(items) => {
                check_count(items.len())?;
                for (idx, (&name, &value)) in FEATURE_NAMES.iter().zip(items.iter()).enumerate() {
                    if !value.is_finite() {
                        return Err(ValidationError::InvalidType(name));
                    }
                    values[idx] = value;
                }
            }
        }
        Ok(FeatureVector::from_array(values))
    }
}

impl<'a> From<&'a Map<String, Value>> for FeatureInput<'a> {
    fn from(map: &'a Map<String, Value>) -> Self {
        FeatureInput::Mapping(map)
    }
}

impl<'a> From<&'a [Value]> for FeatureInput<'a> {
    fn from(items: &'a [Value]) -> Self {
        FeatureInput::Sequence(items)
    }
}

impl<'a> From<&'a [f64]> for FeatureInput<'a> {
    fn from(items: &'a [f64]) -> Self {
        FeatureInput::Numbers(items)
    }
}

impl<'a> TryFrom<&'a Value> for FeatureInput<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(FeatureInput::Mapping(map)),
            Value::Array(items) => Ok(FeatureInput::Sequence(items)),
            _ => Err(ValidationError::UnsupportedPayload),
        }
    }
}

fn check_count(got: usize) -> Result<(), ValidationError> {
    if got != FEATURE_COUNT {
        return Err(ValidationError::WrongFeatureCount {
            expected: FEATURE_COUNT,
            got,
        });
    }
    Ok(())
}

/// Numbers pass through, booleans become 0/1, strings are parsed after
/// trimming. Everything else, and any non-finite result, is rejected.
fn coerce(name: &'static str, value: &Value) -> Result<f64, ValidationError> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    };
    number
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::InvalidType(name))
}
