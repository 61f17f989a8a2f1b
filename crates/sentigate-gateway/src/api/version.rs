//! Version reporting and the release-preference cookie.
//!
//! - `/` sets the app-version-preference cookie used by the frontend to
//!   pin a release.
//! - `/api/version/app` is this service's own version.
//! - `/api/version/model` is proxied from the model service.
//! - `/api/version/app-release` distinguishes the running release tag.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::api::ApiError;
use crate::app_state::AppState;

const COOKIE_NAME: &str = "app-version-preference";

pub async fn index(State(app): State<AppState>) -> Response {
    let cookie = format!(
        "{COOKIE_NAME}={}; Path=/; SameSite=Lax",
        app.cfg().gateway.release
    );
    ([(header::SET_COOKIE, cookie)], "sentigate").into_response()
}

pub async fn app_version() -> Json<Value> {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}

pub async fn model_version(State(app): State<AppState>) -> Result<Json<Value>, ApiError> {
    let version = app.predictor().version().await.map_err(|e| {
        tracing::error!(error = %e, "model version fetch failed");
        ApiError(e)
    })?;
    Ok(Json(json!({ "version": version })))
}

pub async fn app_release(State(app): State<AppState>) -> Json<Value> {
    Json(json!({ "release": app.cfg().gateway.release }))
}
