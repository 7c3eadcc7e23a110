use crate::config::Config;
use crate::domain::{HouseType, PropertyRecord};
use crate::predictor::service::{CategoryPredictor, PricePredictor};
use crate::predictor::{CategoricalField, PredictionError, PredictionService, Predictor};
use crate::state::AppState;
use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;

/// Price model that always answers the same number.
pub struct FixedPrice(pub f64);

impl Predictor for FixedPrice {
    type Output = f64;

    fn predict(&self, _record: &PropertyRecord) -> Result<f64, PredictionError> {
        Ok(self.0)
    }
}

/// Category model that always answers the same raw label.
pub struct FixedCategory(pub u8);

impl Predictor for FixedCategory {
    type Output = u8;

    fn predict(&self, _record: &PropertyRecord) -> Result<u8, PredictionError> {
        Ok(self.0)
    }
}

/// Price model that was never fitted on anything.
pub struct Failing;

impl Predictor for Failing {
    type Output = f64;

    fn predict(&self, record: &PropertyRecord) -> Result<f64, PredictionError> {
        Err(PredictionError::UnseenCategory {
            field: CategoricalField::Town,
            value: record.town.clone(),
        })
    }
}

/// Price model that scores every town except one.
pub struct RejectsTown(pub &'static str);

impl Predictor for RejectsTown {
    type Output = f64;

    fn predict(&self, record: &PropertyRecord) -> Result<f64, PredictionError> {
        if record.town == self.0 {
            return Err(PredictionError::UnseenCategory {
                field: CategoricalField::Town,
                value: record.town.clone(),
            });
        }
        Ok(50_000_000.0 + f64::from(record.bedrooms) * 1_000_000.0)
    }
}

pub fn sample_record() -> PropertyRecord {
    PropertyRecord {
        bedrooms: 4,
        bathrooms: 4,
        toilets: 5,
        parking_space: 3,
        title: HouseType::DetachedDuplex,
        town: "Lekki".into(),
        state: "Lagos".into(),
    }
}

pub fn test_state(price: PricePredictor, category: CategoryPredictor) -> AppState {
    AppState::new(Config::default(), PredictionService::new(price, category))
        .unwrap_or_else(|e| panic!("test state failed: {e}"))
}

/// State whose models always answer ₦12,345,678.9 / Expensive.
pub fn fixed_state() -> AppState {
    test_state(Box::new(FixedPrice(12_345_678.9)), Box::new(FixedCategory(1)))
}

pub fn get(uri: &str) -> Request {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post(uri: &str, content_type: &str, body: impl Into<String>) -> Request {
    http::Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", content_type)
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

pub fn body_bytes(resp: Response) -> Vec<u8> {
    let mut body = Vec::new();
    resp.into_body().reader().read_to_end(&mut body).unwrap();
    body
}
