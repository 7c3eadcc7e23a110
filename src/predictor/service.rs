// src/predictor/service.rs

use crate::config::{Backend, ModelsConfig};
use crate::domain::catalog::{HouseType, TOWNS};
use crate::domain::PropertyRecord;
use crate::errors::StartupError;
use crate::geos::NG_STATES;
use crate::predictor::{
    CategoricalField, ForestClassifier, ForestRegressor, PredictionError, Predictor,
    PriceCategory,
};
use serde::Serialize;
use tracing::{info, warn};

pub type PricePredictor = Box<dyn Predictor<Output = f64>>;
pub type CategoryPredictor = Box<dyn Predictor<Output = u8>>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub price: f64,
    pub category: PriceCategory,
}

/// Both fitted models, loaded once and read-only afterwards.
pub struct PredictionService {
    price: PricePredictor,
    category: CategoryPredictor,
}

impl PredictionService {
    pub fn new(price: PricePredictor, category: CategoryPredictor) -> Self {
        Self { price, category }
    }

    /// Load both artifacts from the configured paths with the configured
    /// backend.
    pub fn load(cfg: &ModelsConfig) -> Result<Self, StartupError> {
        match cfg.backend {
            Backend::Forest => Self::load_forests(cfg),
            Backend::Xgboost => Self::load_boosters(cfg),
        }
    }

    fn load_forests(cfg: &ModelsConfig) -> Result<Self, StartupError> {
        let price = ForestRegressor::load(&cfg.price_regressor)?;
        info!(
            "Loaded price regressor from {} ({} trees)",
            cfg.price_regressor.display(),
            price.0.tree_count()
        );

        let category = ForestClassifier::load(&cfg.category_classifier)?;
        info!(
            "Loaded category classifier from {} ({} trees)",
            cfg.category_classifier.display(),
            category.0.tree_count()
        );

        Ok(Self::new(Box::new(price), Box::new(category)))
    }

    #[cfg(feature = "xgboost")]
    fn load_boosters(cfg: &ModelsConfig) -> Result<Self, StartupError> {
        use crate::predictor::booster::{BoostedClassifier, BoostedModel, BoostedRegressor};
        use crate::predictor::encoding::FeatureLayout;

        let layout = FeatureLayout::load(&cfg.feature_layout)?;
        info!(
            "Loaded feature layout from {} ({} columns)",
            cfg.feature_layout.display(),
            layout.width()
        );

        let price = BoostedRegressor(BoostedModel::load(&cfg.price_regressor, layout.clone())?);
        info!("Loaded price booster from {}", cfg.price_regressor.display());

        let category = BoostedClassifier(BoostedModel::load(&cfg.category_classifier, layout)?);
        info!("Loaded category booster from {}", cfg.category_classifier.display());

        Ok(Self::new(Box::new(price), Box::new(category)))
    }

    #[cfg(not(feature = "xgboost"))]
    fn load_boosters(_cfg: &ModelsConfig) -> Result<Self, StartupError> {
        Err(StartupError::Backend(
            "built without the `xgboost` feature; rebuild with --features xgboost".into(),
        ))
    }

    /// Run both models on one record. Single attempt, no fallback value.
    pub fn predict(&self, record: &PropertyRecord) -> Result<Prediction, PredictionError> {
        let raw_price = self.price.predict(record)?;
        if !raw_price.is_finite() {
            return Err(PredictionError::InvalidOutput(raw_price));
        }
        let price = if raw_price < 0.0 {
            warn!("Price model returned {raw_price}; flooring at 0");
            0.0
        } else {
            raw_price
        };

        let label = self.category.predict(record)?;
        let category = PriceCategory::from_label(label)?;

        Ok(Prediction { price, category })
    }

    /// Selector values each model never saw. Choosing one of these will make
    /// predictions fail, so they are worth a warning at startup.
    pub fn unseen_catalog_values(&self) -> Vec<(&'static str, CategoricalField, String)> {
        let mut missing = Vec::new();

        for field in CategoricalField::ALL {
            let fitted = [
                ("price", self.price.known_categories(field)),
                ("category", self.category.known_categories(field)),
            ];
            for (model, vocab) in fitted {
                let Some(vocab) = vocab else {
                    continue;
                };
                for value in catalog_values(field) {
                    if !vocab.iter().any(|v| v == &value) {
                        missing.push((model, field, value));
                    }
                }
            }
        }

        missing
    }

    pub fn report_coverage(&self) {
        for (model, field, value) in self.unseen_catalog_values() {
            warn!("{model} model was not fitted on {field} '{value}'; predictions using it will fail");
        }
    }
}

fn catalog_values(field: CategoricalField) -> Vec<String> {
    match field {
        CategoricalField::Title => HouseType::ALL.iter().map(|t| t.label().to_string()).collect(),
        CategoricalField::Town => TOWNS.iter().map(|t| t.to_string()).collect(),
        CategoricalField::State => NG_STATES.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::{sample_record, FixedCategory, FixedPrice, Failing};

    #[test]
    fn combines_both_models() {
        let svc = PredictionService::new(
            Box::new(FixedPrice(12_345_678.9)),
            Box::new(FixedCategory(1)),
        );
        let p = svc.predict(&sample_record()).unwrap();
        assert_eq!(p.price, 12_345_678.9);
        assert_eq!(p.category, PriceCategory::Expensive);
    }

    #[test]
    fn negative_price_is_floored() {
        let svc = PredictionService::new(Box::new(FixedPrice(-5.0)), Box::new(FixedCategory(0)));
        let p = svc.predict(&sample_record()).unwrap();
        assert_eq!(p.price, 0.0);
        assert_eq!(p.category, PriceCategory::Affordable);
    }

    #[test]
    fn non_finite_price_is_rejected() {
        let svc = PredictionService::new(
            Box::new(FixedPrice(f64::NAN)),
            Box::new(FixedCategory(0)),
        );
        assert!(matches!(
            svc.predict(&sample_record()),
            Err(PredictionError::InvalidOutput(_))
        ));
    }

    #[test]
    fn unknown_label_and_model_failure_propagate() {
        let svc = PredictionService::new(Box::new(FixedPrice(1.0)), Box::new(FixedCategory(3)));
        assert!(matches!(
            svc.predict(&sample_record()),
            Err(PredictionError::UnknownLabel(3))
        ));

        let svc = PredictionService::new(Box::new(Failing), Box::new(FixedCategory(0)));
        assert!(svc.predict(&sample_record()).is_err());
    }

    #[cfg(not(feature = "xgboost"))]
    #[test]
    fn booster_backend_needs_the_feature() {
        let cfg = ModelsConfig {
            backend: Backend::Xgboost,
            ..ModelsConfig::default()
        };
        assert!(matches!(
            PredictionService::load(&cfg),
            Err(StartupError::Backend(_))
        ));
    }

    #[test]
    fn fakes_expose_no_vocabulary() {
        let svc = PredictionService::new(Box::new(FixedPrice(1.0)), Box::new(FixedCategory(0)));
        assert!(svc.unseen_catalog_values().is_empty());
    }
}
