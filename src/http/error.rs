//! Mapping of registry errors onto HTTP responses.

use crate::error::RegistryError;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use std::any::Any;
use tracing::error;

/// Hint appended to decoding failures, which are almost always dates.
const DATE_FORMAT_HINT: &str = "please use yyyy-mm-dd format for dates";

/// JSON error body: a summary plus either a field map or a detail string.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A failed request: the registry error and the URI it was raised for.
#[derive(Debug)]
pub struct ApiError {
    uri: Uri,
    source: RegistryError,
}

impl ApiError {
    pub fn new(uri: &Uri, source: RegistryError) -> Self {
        Self {
            uri: uri.clone(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        if self.source.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn body(&self) -> ErrorBody {
        let uri = self.uri.path();
        match &self.source {
            RegistryError::Validation(fields) => ErrorBody {
                message: format!("Validation failed for uri: {}", uri),
                errors: serde_json::to_value(fields).ok(),
                error: None,
            },
            RegistryError::InvalidFormat(detail) => ErrorBody {
                message: format!("Malformed request for uri: {}", uri),
                errors: None,
                error: Some(format!("{}; {}", detail, DATE_FORMAT_HINT)),
            },
            other => ErrorBody {
                message: format!("Request rejected for uri: {}", uri),
                errors: None,
                error: Some(other.to_string()),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(uri = %self.uri, error = %self.source, "request failed");
        (self.status(), Json(self.body())).into_response()
    }
}

/// Turn a handler panic into a 500 with the same JSON shape.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(error = %detail, "handler panicked");

    let body = ErrorBody {
        message: "Internal server error".to_string(),
        errors: None,
        error: Some(detail),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
