use crate::router::handle;
use crate::tests::utils::{body_string, fixed_state, get};

#[test]
fn dashboard_renders_form_with_defaults() {
    let state = fixed_state();

    let resp = handle(get("/"), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Nigerian House Price Prediction Dashboard"));
    assert!(body.contains("Property Features"));
    assert!(body.contains(r#"name="bedrooms""#));
    assert!(body.contains(r#"max="10""#));
    assert!(body.contains("Victoria Island (VI)"));
    assert!(body.contains("Semi Detached Bungalow"));
    assert!(body.contains("Explore a dataset"));
    // No prediction until the form is submitted.
    assert!(!body.contains("Estimated Price"));
}

#[test]
fn submitted_form_renders_prediction_inline() {
    let state = fixed_state();

    let resp = handle(
        get("/?bedrooms=4&bathrooms=4&toilets=5&parking_space=3&title=Detached+Duplex&town=Ikoyi&state=Lagos"),
        &state,
    )
    .expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("₦12,345,678"));
    assert!(body.contains("Expensive"));
    assert!(body.contains(r#"<option value="Ikoyi" selected>"#));
}

#[test]
fn unknown_routes_are_404() {
    let state = fixed_state();
    let err = handle(get("/admin"), &state).unwrap_err();
    assert!(matches!(err, crate::errors::ServerError::NotFound));

    let resp = crate::responses::error_to_response(err);
    assert_eq!(resp.status(), 404);
    assert!(body_string(resp).contains("Error 404"));
}

#[test]
fn health_check() {
    let state = fixed_state();
    let resp = handle(get("/health"), &state).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(body_string(resp), "ok");
}
