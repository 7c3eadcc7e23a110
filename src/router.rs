use crate::dataset::{count_by, Dataset, DatasetError, GroupBy, GroupedCount};
use crate::domain::format_currency;
use crate::domain::record::{self, PropertyRecord};
use crate::errors::{ResultResp, ServerError};
use crate::responses::{html_response, json_response, text_response};
use crate::spreadsheets::export_grouped_counts_xlsx;
use crate::state::AppState;
use crate::templates::components::{
    dataset_result, prediction_card, prediction_failed, warning_notice,
};
use crate::templates::pages::{dashboard_page, DashboardVm};
use astra::Request;
use chrono::Utc;
use maud::Markup;
use serde_json::json;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};

pub fn handle(mut req: Request, state: &AppState) -> ResultResp {
    let method = req.method().as_str().to_owned();
    let path = req.uri().path().to_owned();
    let params = parse_query(&req);

    match (method.as_str(), path.as_str()) {
        ("GET", "/") => dashboard(&params, state),
        ("GET", "/predict") => predict_partial(&params, state),
        ("GET", "/api/predict") => predict_json(&params, state),
        ("POST", "/dataset") => match read_upload(&mut req, &params, state) {
            Ok(upload) => dataset_partial(&upload, state),
            Err(ServerError::Dataset(e)) => dataset_warning(&e),
            Err(e) => Err(e),
        },
        ("POST", "/dataset/export") => {
            let upload = read_upload(&mut req, &params, state)?;
            let (counts, _) = upload.aggregate(state)?;
            export_grouped_counts_xlsx(&counts, upload.group_by)
        }
        ("GET", "/health") => text_response(200, "ok"),
        _ => Err(ServerError::NotFound),
    }
}

fn dashboard(params: &HashMap<String, String>, state: &AppState) -> ResultResp {
    let inputs = &state.config.inputs;

    let (record, result) = if record::has_inputs(params) {
        let record = record::assemble(params, inputs)?;
        let result = prediction_markup(&record, state);
        (record, Some(result))
    } else {
        (record::assemble(&HashMap::new(), inputs)?, None)
    };

    let vm = DashboardVm {
        title: &state.config.display.title,
        sliders: record::sliders(inputs),
        record,
        result,
    };

    html_response(dashboard_page(&vm))
}

fn predict_partial(params: &HashMap<String, String>, state: &AppState) -> ResultResp {
    let record = record::assemble(params, &state.config.inputs)?;
    html_response(prediction_markup(&record, state))
}

/// Run both models; a failure becomes an inline notice, never an error page.
fn prediction_markup(record: &PropertyRecord, state: &AppState) -> Markup {
    match state.predictions.predict(record) {
        Ok(prediction) => {
            debug!(?record, price = prediction.price, category = %prediction.category, "Predicted");
            prediction_card(record, &prediction, &state.config.display.currency_symbol)
        }
        Err(e) => {
            warn!("Prediction failed for {record:?}: {e}");
            prediction_failed()
        }
    }
}

fn predict_json(params: &HashMap<String, String>, state: &AppState) -> ResultResp {
    let record = record::assemble(params, &state.config.inputs)?;

    match state.predictions.predict(&record) {
        Ok(prediction) => json_response(
            200,
            &json!({
                "record": record,
                "price": prediction.price,
                "price_display": format_currency(prediction.price, &state.config.display.currency_symbol),
                "category": prediction.category,
                "predicted_at": Utc::now().to_rfc3339(),
            }),
        ),
        Err(e) => {
            warn!("Prediction failed for {record:?}: {e}");
            json_response(
                422,
                &json!({ "error": "prediction failed", "detail": e.to_string() }),
            )
        }
    }
}

struct Upload {
    group_by: GroupBy,
    csv: Vec<u8>,
}

impl Upload {
    /// Grouped counts plus the number of data rows read.
    fn aggregate(&self, state: &AppState) -> Result<(Vec<GroupedCount>, usize), DatasetError> {
        let dataset = Dataset::from_csv(&self.csv)?;
        let counts = count_by(&dataset, self.group_by, &state.zones)?;
        Ok((counts, dataset.row_count()))
    }
}

/// Accept either a raw CSV body or a url-encoded form with a `csv` field.
/// `by` may come from the query string or the form.
fn read_upload(
    req: &mut Request,
    params: &HashMap<String, String>,
    state: &AppState,
) -> Result<Upload, ServerError> {
    let is_form = req
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with(mime::APPLICATION_WWW_FORM_URLENCODED.as_ref()))
        .unwrap_or(false);

    let body = read_body(req, state.config.dataset.max_upload_bytes)?;

    let (by, csv) = if is_form {
        let form: HashMap<String, String> =
            url::form_urlencoded::parse(&body).into_owned().collect();
        let by = form.get("by").or_else(|| params.get("by")).cloned();
        let csv = form.get("csv").cloned().unwrap_or_default();
        (by, csv.into_bytes())
    } else {
        (params.get("by").cloned(), body)
    };

    let group_by = GroupBy::from_param(by.as_deref())
        .ok_or_else(|| ServerError::BadRequest("by must be 'zone' or 'town'".into()))?;

    Ok(Upload { group_by, csv })
}

/// Read the body, refusing anything over `limit` bytes.
fn read_body(req: &mut Request, limit: usize) -> Result<Vec<u8>, ServerError> {
    let mut buf = Vec::new();
    req.body_mut()
        .reader()
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(|e| {
            warn!("Failed to read request body: {e}");
            ServerError::InternalError
        })?;

    if buf.len() > limit {
        return Err(DatasetError::TooLarge { limit }.into());
    }
    Ok(buf)
}

fn dataset_partial(upload: &Upload, state: &AppState) -> ResultResp {
    match upload.aggregate(state) {
        Ok((counts, rows)) => {
            debug!(rows, groups = counts.len(), "Aggregated upload");
            html_response(dataset_result(&counts, upload.group_by, rows))
        }
        Err(e) => dataset_warning(&e),
    }
}

/// Missing columns, bad CSV or an oversized upload: warn inline, no chart.
fn dataset_warning(err: &DatasetError) -> ResultResp {
    warn!("Dataset upload not plotted: {err}");
    html_response(warning_notice(&err.to_string()))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
