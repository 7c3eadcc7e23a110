// src/predictor/booster.rs
//
// XGBoost backend: booster files saved by `Booster::save`, scored one row at a
// time through libxgboost. Records are encoded with the shared FeatureLayout.

use crate::domain::PropertyRecord;
use crate::errors::StartupError;
use crate::predictor::encoding::FeatureLayout;
use crate::predictor::{CategoricalField, PredictionError, Predictor};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use xgboost::{Booster, DMatrix, XGBError};

struct Handle(Booster);

// Booster owns a raw libxgboost handle; it is only touched behind the mutex.
unsafe impl Send for Handle {}

pub struct BoostedModel {
    layout: FeatureLayout,
    booster: Mutex<Handle>,
}

impl BoostedModel {
    pub fn load(path: &Path, layout: FeatureLayout) -> Result<Self, StartupError> {
        fs::metadata(path).map_err(|source| StartupError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let booster = Booster::load(path).map_err(|e| StartupError::InvalidArtifact {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            layout,
            booster: Mutex::new(Handle(booster)),
        })
    }

    /// Raw model output for one record.
    fn score(&self, record: &PropertyRecord) -> Result<f64, PredictionError> {
        let row = self.layout.encode(record)?;
        let matrix = DMatrix::from_dense(&row, 1).map_err(model_error)?;

        let booster = self
            .booster
            .lock()
            .map_err(|_| PredictionError::Model("booster lock poisoned".into()))?;
        let scores = booster.0.predict(&matrix).map_err(model_error)?;

        scores
            .first()
            .map(|v| f64::from(*v))
            .ok_or_else(|| PredictionError::Model("booster returned no rows".into()))
    }
}

fn model_error(e: XGBError) -> PredictionError {
    PredictionError::Model(e.to_string())
}

/// Price booster (`reg:squarederror`).
pub struct BoostedRegressor(pub BoostedModel);

impl Predictor for BoostedRegressor {
    type Output = f64;

    fn predict(&self, record: &PropertyRecord) -> Result<f64, PredictionError> {
        self.0.score(record)
    }

    fn known_categories(&self, field: CategoricalField) -> Option<&[String]> {
        Some(self.0.layout.categories.get(field))
    }
}

/// Category booster (`binary:logistic`); outputs P(class 1).
pub struct BoostedClassifier(pub BoostedModel);

impl Predictor for BoostedClassifier {
    type Output = u8;

    fn predict(&self, record: &PropertyRecord) -> Result<u8, PredictionError> {
        let p = self.0.score(record)?;
        if !(0.0..=1.0).contains(&p) {
            return Err(PredictionError::InvalidOutput(p));
        }
        Ok(if p > 0.5 { 1 } else { 0 })
    }

    fn known_categories(&self, field: CategoricalField) -> Option<&[String]> {
        Some(self.0.layout.categories.get(field))
    }
}
