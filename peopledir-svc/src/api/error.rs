//! Mapping of service errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use peopledir_common::Error;
use serde_json::json;

use crate::service::{EnrichError, ErrorKind};

/// Any failure a handler can return
#[derive(Debug)]
pub enum ApiFailure {
    Enrich(EnrichError),
    Store(Error),
}

impl From<EnrichError> for ApiFailure {
    fn from(err: EnrichError) -> Self {
        ApiFailure::Enrich(err)
    }
}

impl From<Error> for ApiFailure {
    fn from(err: Error) -> Self {
        ApiFailure::Store(err)
    }
}

fn store_status(err: &Error) -> StatusCode {
    match err {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::Conflict(_) => StatusCode::CONFLICT,
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiFailure::Enrich(err) => {
                let status = match (err, err.kind()) {
                    (_, ErrorKind::Network | ErrorKind::UpstreamMalformed) => StatusCode::BAD_GATEWAY,
                    (EnrichError::DedupCheck(e) | EnrichError::Persist(e), _) => store_status(e),
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, err.to_string())
            }
            ApiFailure::Store(err) => (store_status(err), err.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %message, "Request rejected");
        }

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
