//! POST /api/verify
//!
//! Accepts human feedback on a prior prediction and feeds it to the
//! lifecycle core. Both fields are required; an id the core has never seen
//! is a client error.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use sentigate_core::SentigateError;

use crate::api::ApiError;
use crate::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(rename = "submissionId", default)]
    pub submission_id: Option<String>,
    #[serde(rename = "isCorrect", default)]
    pub is_correct: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub verified: bool,
}

pub async fn verify(
    State(app): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let (Some(id), Some(is_correct)) = (req.submission_id, req.is_correct) else {
        return Err(SentigateError::BadRequest(
            "missing 'submissionId' or 'isCorrect' in request data".into(),
        )
        .into());
    };

    app.coordinator().on_verified(&id, is_correct)?;

    Ok(Json(VerifyResponse { verified: true }))
}
