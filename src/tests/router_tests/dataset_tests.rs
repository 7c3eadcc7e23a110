use crate::router::handle;
use crate::tests::utils::{body_bytes, body_string, fixed_state, post};

const CSV: &str = "text/csv";
const FORM: &str = "application/x-www-form-urlencoded";

#[test]
fn zone_chart_from_raw_csv() {
    let state = fixed_state();
    let csv = "state,price Category\nLagos,Affordable\nLagos,Expensive\nBorno,Affordable\n";

    let resp = handle(post("/dataset?by=zone", CSV, csv), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("<svg"));
    assert!(body.contains("South West / Affordable: 1"));
    assert!(body.contains("South West / Expensive: 1"));
    assert!(body.contains("North East / Affordable: 1"));
    assert_eq!(body.matches("<rect").count(), 3);
    assert!(body.contains("Plotted <strong>3</strong> of 3 rows"));
}

#[test]
fn town_chart_from_pasted_form() {
    let state = fixed_state();
    let form = "by=town&csv=town%2Cprice+Category%0ALekki%2CExpensive%0ALekki%2CExpensive%0AAjah%2CAffordable%0A";

    let body = body_string(handle(post("/dataset", FORM, form), &state).unwrap());
    assert!(body.contains("Lekki / Expensive: 2"));
    assert!(body.contains("Ajah / Affordable: 1"));
}

#[test]
fn missing_category_column_warns_without_chart() {
    let state = fixed_state();

    for csv in ["state,price\n", "state,price\nLagos,1\nKano,2\nOyo,3\n"] {
        let resp = handle(post("/dataset", CSV, csv), &state).expect("warning, not failure");
        assert_eq!(resp.status(), 200);

        let body = body_string(resp);
        assert!(body.contains("Warning"));
        assert!(body.contains("price Category"));
        assert!(!body.contains("<svg"));
    }
}

#[test]
fn empty_upload_renders_empty_chart() {
    let state = fixed_state();

    for csv in ["", "state,price Category\n"] {
        let body = body_string(handle(post("/dataset", CSV, csv), &state).unwrap());
        assert!(body.contains("No rows to plot"));
        assert!(!body.contains("Warning"));
    }
}

#[test]
fn oversized_upload_is_a_warning() {
    let mut state = fixed_state();
    state.config.dataset.max_upload_bytes = 16;

    let csv = "state,price Category\nLagos,Affordable\n";
    let body = body_string(handle(post("/dataset", CSV, csv), &state).unwrap());
    assert!(body.contains("byte limit"));
    assert!(!body.contains("<svg"));
}

#[test]
fn invalid_grouping_is_bad_request() {
    let state = fixed_state();
    let err = handle(post("/dataset?by=county", CSV, "state,price Category\n"), &state).unwrap_err();
    assert!(matches!(err, crate::errors::ServerError::BadRequest(_)));
}

#[test]
fn export_returns_workbook() {
    let state = fixed_state();
    let csv = "state,price Category\nLagos,Affordable\nKano,Expensive\n";

    let resp = handle(post("/dataset/export?by=zone", CSV, csv), &state).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    assert!(resp
        .headers()
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .contains("price_categories_by_zone.xlsx"));
    assert_eq!(&body_bytes(resp)[..2], b"PK");
}

#[test]
fn export_without_required_columns_is_422() {
    let state = fixed_state();
    let err = handle(post("/dataset/export", CSV, "town,price\nLekki,1\n"), &state).unwrap_err();
    assert_eq!(crate::responses::errors::status_of(&err), 422);
}
