//! Remote sentiment-prediction client.
//!
//! The gateway never classifies text itself; it forwards to the model
//! service over a small JSON RPC. The trait seam exists so integration
//! tests can swap in a canned predictor.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use sentigate_core::error::{Result, SentigateError};

use crate::config::ModelSection;

/// Boundary to the remote model service.
#[async_trait]
pub trait SentimentPredictor: Send + Sync {
    /// Classify `text`. `true` means positive sentiment.
    async fn predict(&self, text: &str) -> Result<bool>;

    /// Model service version string.
    async fn version(&self) -> Result<String>;
}

/// HTTP client for the model service.
pub struct HttpModelClient {
    base: String,
    client: reqwest::Client,
}

impl HttpModelClient {
    pub fn new(cfg: &ModelSection) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(cfg.timeout_ms))
            .build()
            .map_err(|e| SentigateError::Internal(format!("model client build failed: {e}")))?;
        Ok(Self {
            base: base_url(&cfg.host, cfg.port),
            client,
        })
    }
}

/// Accepts hosts with or without a scheme.
fn base_url(host: &str, port: u16) -> String {
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{host}:{port}")
    } else {
        format!("http://{host}:{port}")
    }
}

#[async_trait]
impl SentimentPredictor for HttpModelClient {
    async fn predict(&self, text: &str) -> Result<bool> {
        let resp = self
            .client
            .post(format!("{}/predict", self.base))
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| SentigateError::Upstream(format!("predict call failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(SentigateError::Upstream(format!(
                "predict returned HTTP {}",
                resp.status()
            )));
        }

        #[derive(Deserialize)]
        struct PredictResponse {
            sentiment: Option<bool>,
        }

        let body: PredictResponse = resp
            .json()
            .await
            .map_err(|e| SentigateError::Upstream(format!("predict response invalid: {e}")))?;

        body.sentiment
            .ok_or_else(|| SentigateError::Upstream("sentiment missing in model response".into()))
    }

    async fn version(&self) -> Result<String> {
        let resp = self
            .client
            .get(format!("{}/version", self.base))
            .send()
            .await
            .map_err(|e| SentigateError::Upstream(format!("version call failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(SentigateError::Upstream(format!(
                "version returned HTTP {}",
                resp.status()
            )));
        }

        #[derive(Deserialize)]
        struct VersionResponse {
            version: Option<String>,
        }

        let body: VersionResponse = resp
            .json()
            .await
            .map_err(|e| SentigateError::Upstream(format!("version response invalid: {e}")))?;

        body.version
            .ok_or_else(|| SentigateError::Upstream("version missing in model response".into()))
    }
}
