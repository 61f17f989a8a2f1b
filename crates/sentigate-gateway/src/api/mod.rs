//! REST API handlers and error translation.
//!
//! Core failures map to protocol-level responses here: `UnknownSubmission`
//! and malformed input are the client's fault (400), a failing model
//! service is upstream (502), everything else is ours (500).

pub mod submit;
pub mod verify;
pub mod version;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use sentigate_core::error::{ClientCode, SentigateError};

/// Wrapper so core errors can be returned straight from handlers.
#[derive(Debug)]
pub struct ApiError(pub SentigateError);

impl From<SentigateError> for ApiError {
    fn from(e: SentigateError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.client_code() {
            ClientCode::BadRequest | ClientCode::UnknownSubmission => StatusCode::BAD_REQUEST,
            ClientCode::Upstream => StatusCode::BAD_GATEWAY,
            ClientCode::DuplicateSubmission | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(json!({
            "error": self.0.to_string(),
            "code": self.0.client_code().as_str(),
        }));
        (status, body).into_response()
    }
}
