// src/state.rs

use crate::config::Config;
use crate::domain::catalog;
use crate::errors::StartupError;
use crate::geos::ZoneMap;
use crate::predictor::PredictionService;

/// Everything a request handler reads. Built once in `main`, never mutated,
/// handed to the router by reference.
pub struct AppState {
    pub config: Config,
    pub predictions: PredictionService,
    pub zones: ZoneMap,
}

impl AppState {
    pub fn new(config: Config, predictions: PredictionService) -> Result<Self, StartupError> {
        catalog::validate_catalog()?;
        let zones = ZoneMap::standard()?;

        Ok(Self {
            config,
            predictions,
            zones,
        })
    }

    /// Validate the catalog, load both artifacts named in `config`.
    pub fn load(config: Config) -> Result<Self, StartupError> {
        let predictions = PredictionService::load(&config.models)?;
        predictions.report_coverage();
        Self::new(config, predictions)
    }
}
