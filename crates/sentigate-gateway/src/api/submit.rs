//! POST /api/submit
//!
//! Forwards the text to the model service, then registers the submission
//! with the lifecycle core. The id is generated only after a successful
//! prediction, so every id handed to a client is already Active.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use sentigate_core::{SentigateError, Sentiment};

use crate::api::ApiError;
use crate::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub sentiment: bool,
    #[serde(rename = "submissionId")]
    pub submission_id: String,
}

pub async fn submit(
    State(app): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, ApiError> {
    let text = req.text.unwrap_or_default();
    if text.is_empty() {
        return Err(SentigateError::BadRequest(
            "missing 'text' in request data".into(),
        )
        .into());
    }

    let sentiment = app.predictor().predict(&text).await.map_err(|e| {
        tracing::error!(error = %e, "sentiment prediction failed");
        ApiError(e)
    })?;

    let id = app.next_submission_id();
    app.coordinator()
        .on_submitted(&id, Sentiment::from(sentiment))
        .map_err(|e| {
            // Ids come from a process-global counter; a collision is a bug,
            // not a client error.
            tracing::error!(id = %id, error = %e, "submission bookkeeping failed");
            ApiError(e)
        })?;

    Ok(Json(SubmitResponse {
        sentiment,
        submission_id: id,
    }))
}
