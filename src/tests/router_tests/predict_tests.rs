use crate::errors::ServerError;
use crate::responses::error_to_response;
use crate::router::handle;
use crate::tests::utils::{
    body_string, fixed_state, get, test_state, FixedCategory, FixedPrice, RejectsTown,
};

#[test]
fn partial_shows_formatted_price_and_category() {
    let state = fixed_state();

    let resp = handle(get("/predict?town=Ajah&state=Lagos"), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Estimated Price"));
    assert!(body.contains("₦12,345,678"));
    assert!(!body.contains("12,345,678.9"));
    assert!(body.contains("Expensive"));
    // Partial, not a full page.
    assert!(!body.contains("<html"));
}

#[test]
fn label_zero_reads_affordable() {
    let state = test_state(Box::new(FixedPrice(8_000_000.0)), Box::new(FixedCategory(0)));

    let body = body_string(handle(get("/predict"), &state).unwrap());
    assert!(body.contains("₦8,000,000"));
    assert!(body.contains("Affordable"));
}

#[test]
fn unseen_category_shows_generic_failure_and_page_stays_usable() {
    let state = test_state(Box::new(RejectsTown("Epe")), Box::new(FixedCategory(0)));

    let resp = handle(get("/predict?town=Epe"), &state).expect("failure is rendered inline");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);
    assert!(body.contains("Prediction failed."));
    assert!(!body.contains("Estimated Price"));

    // The next interaction works as normal.
    let body = body_string(handle(get("/predict?town=Lekki&bedrooms=2"), &state).unwrap());
    assert!(body.contains("₦52,000,000"));
}

#[test]
fn out_of_catalog_input_is_bad_request() {
    let state = fixed_state();

    let err = handle(get("/predict?state=Atlantis"), &state).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
    assert_eq!(error_to_response(err).status(), 400);
}

#[test]
fn out_of_range_numbers_are_clamped() {
    let state = fixed_state();

    let body = body_string(handle(get("/predict?bedrooms=42&parking_space=-3"), &state).unwrap());
    assert!(body.contains("10 bed"));
    assert!(body.contains("0 parking"));
}

#[test]
fn json_api_returns_prediction() {
    let state = fixed_state();

    let resp = handle(get("/api/predict?town=Gbagada&state=Lagos&title=Block+of+Flats"), &state)
        .expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap().to_str().unwrap(),
        "application/json"
    );

    let json: serde_json::Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(json["price_display"], "₦12,345,678");
    assert_eq!(json["category"], "Expensive");
    assert_eq!(json["record"]["title"], "Block of Flats");
    assert_eq!(json["record"]["town"], "Gbagada");
    assert_eq!(json["record"].as_object().unwrap().len(), 7);
    assert!(json["predicted_at"].is_string());
}

#[test]
fn json_api_reports_failure_as_422() {
    let state = test_state(Box::new(RejectsTown("Lekki")), Box::new(FixedCategory(1)));

    let resp = handle(get("/api/predict?town=Lekki"), &state).unwrap();
    assert_eq!(resp.status(), 422);

    let json: serde_json::Value = serde_json::from_str(&body_string(resp)).unwrap();
    assert_eq!(json["error"], "prediction failed");
    assert!(json["detail"].as_str().unwrap().contains("Lekki"));
}
