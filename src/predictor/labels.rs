// src/predictor/labels.rs

use crate::predictor::PredictionError;
use serde::Serialize;
use std::fmt;

/// Classifier label for the cheaper class.
pub const AFFORDABLE_LABEL: u8 = 0;
/// Classifier label for the pricier class.
pub const EXPENSIVE_LABEL: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PriceCategory {
    Affordable,
    Expensive,
}

impl PriceCategory {
    /// Map the classifier's raw label onto a category. The mapping is pinned
    /// here rather than read from the artifact.
    pub fn from_label(label: u8) -> Result<Self, PredictionError> {
        match label {
            AFFORDABLE_LABEL => Ok(PriceCategory::Affordable),
            EXPENSIVE_LABEL => Ok(PriceCategory::Expensive),
            other => Err(PredictionError::UnknownLabel(other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceCategory::Affordable => "Affordable",
            PriceCategory::Expensive => "Expensive",
        }
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
