use crate::dataset::DatasetError;
use crate::errors::ServerError;
use crate::templates::components::error_page;
use astra::{Body, Response, ResponseBuilder};
use tracing::{error, warn};

/// HTTP status for each error kind.
pub fn status_of(err: &ServerError) -> u16 {
    match err {
        ServerError::NotFound => 404,
        ServerError::BadRequest(_) => 400,
        ServerError::Prediction(_) => 422,
        ServerError::Dataset(DatasetError::TooLarge { .. }) => 413,
        ServerError::Dataset(_) => 422,
        ServerError::XlsxError(_) | ServerError::InternalError => 500,
    }
}

/// Convert a ServerError into a proper HTML response page
pub fn error_to_response(err: ServerError) -> Response {
    let status = status_of(&err);
    if status >= 500 {
        error!("{err}");
    } else {
        warn!("{err}");
    }

    let body = error_page(status, &err.to_string()).into_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", mime::TEXT_HTML_UTF_8.as_ref())
        .body(Body::from(body))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
