//! Axum router wiring.

use axum::routing::{get, post};
use axum::Router;

use crate::{api, app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::version::index))
        .route("/api/submit", post(api::submit::submit))
        .route("/api/verify", post(api::verify::verify))
        .route("/api/version/app", get(api::version::app_version))
        .route("/api/version/model", get(api::version::model_version))
        .route("/api/version/app-release", get(api::version::app_release))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
