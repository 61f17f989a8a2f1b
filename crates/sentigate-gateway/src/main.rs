//! sentigate gateway binary.
//!
//! - REST endpoints: /api/submit, /api/verify, /api/version/*
//! - Prometheus scrape endpoint: /metrics
//! - Tracing via RUST_LOG env filter

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use sentigate_gateway::{app_state, config, model, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = config::load_from_file("sentigate.yaml").expect("config load failed");
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .expect("gateway.listen must be a valid SocketAddr");

    let predictor =
        model::HttpModelClient::new(&cfg.model).expect("model client init failed");
    let state = app_state::AppState::new(cfg, Arc::new(predictor)).expect("state init failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "sentigate-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app).await.expect("server failed");
}
