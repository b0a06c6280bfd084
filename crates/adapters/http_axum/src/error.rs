//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use kasa_helper_domain::error::KasaHelperError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Render an error and its sources as `outer: inner: innermost`.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}

/// Maps request and [`KasaHelperError`] failures to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// The request body could not be decoded.
    BadRequest(String),
    /// A service call failed as a whole.
    Service(KasaHelperError),
}

impl From<KasaHelperError> for ApiError {
    fn from(err: KasaHelperError) -> Self {
        Self::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::Service(err @ KasaHelperError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, error_chain(err))
            }
            Self::Service(err @ KasaHelperError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, error_chain(err))
            }
            Self::Service(err @ KasaHelperError::UnsupportedDevice(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, error_chain(err))
            }
            Self::Service(err @ KasaHelperError::Device(_)) => {
                tracing::warn!(error = %error_chain(err), "device error");
                (StatusCode::BAD_GATEWAY, error_chain(err))
            }
            Self::Service(err @ KasaHelperError::Registry(_)) => {
                tracing::error!(error = %error_chain(err), "registry error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
