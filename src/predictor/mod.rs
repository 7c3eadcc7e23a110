//! Fitted models behind the dashboard.
//!
//! A [`Predictor`] is an opaque pre-fitted model with a single inference
//! call. The dashboard holds two of them (price and price category) inside a
//! [`PredictionService`]. Two backends exist: the in-process JSON tree
//! ensemble in [`forest`] and, with the `xgboost` feature, libxgboost
//! boosters in `booster`. Both see records through [`encoding`].

#[cfg(feature = "xgboost")]
pub mod booster;
pub mod encoding;
pub mod forest;
pub mod labels;
pub mod service;

use crate::domain::PropertyRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use forest::{ForestClassifier, ForestRegressor};
pub use labels::PriceCategory;
pub use service::{Prediction, PredictionService};

/// Failure of a single prediction call. Always recoverable: the dashboard
/// reports it and keeps serving.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("{field} '{value}' was not seen when the model was fitted")]
    UnseenCategory {
        field: CategoricalField,
        value: String,
    },

    #[error("model returned an unusable value: {0}")]
    InvalidOutput(f64),

    #[error("classifier returned unknown label {0}")]
    UnknownLabel(u8),

    #[error("model error: {0}")]
    Model(String),
}

/// Single-call inference over a [`PropertyRecord`].
pub trait Predictor: Send + Sync {
    type Output;

    fn predict(&self, record: &PropertyRecord) -> Result<Self::Output, PredictionError>;

    /// Category values this model was fitted on, when the backend exposes
    /// them. Used only for the startup coverage report.
    fn known_categories(&self, _field: CategoricalField) -> Option<&[String]> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Bedrooms,
    Bathrooms,
    Toilets,
    ParkingSpace,
}

impl NumericField {
    pub fn read(&self, record: &PropertyRecord) -> f64 {
        let v = match self {
            NumericField::Bedrooms => record.bedrooms,
            NumericField::Bathrooms => record.bathrooms,
            NumericField::Toilets => record.toilets,
            NumericField::ParkingSpace => record.parking_space,
        };
        f64::from(v)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Title,
    Town,
    State,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 3] = [
        CategoricalField::Title,
        CategoricalField::Town,
        CategoricalField::State,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoricalField::Title => "title",
            CategoricalField::Town => "town",
            CategoricalField::State => "state",
        }
    }

    pub fn read<'a>(&self, record: &'a PropertyRecord) -> &'a str {
        match self {
            CategoricalField::Title => record.title.label(),
            CategoricalField::Town => &record.town,
            CategoricalField::State => &record.state,
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
