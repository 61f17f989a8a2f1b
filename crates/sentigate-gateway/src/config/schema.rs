use std::time::Duration;

use serde::Deserialize;

use sentigate_core::error::{Result, SentigateError};
use sentigate_core::lifecycle::CoordinatorConfig;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub model: ModelSection,

    #[serde(default)]
    pub lifecycle: LifecycleSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SentigateError::BadRequest(
                "config version must be 1".into(),
            ));
        }
        self.model.validate()?;
        self.lifecycle.to_coordinator_config().validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Release tag reported by /api/version/app-release and set in the
    /// app-version-preference cookie.
    #[serde(default = "default_release")]
    pub release: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            release: default_release(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_release() -> String {
    "v1".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSection {
    /// Model service host, with or without an http:// scheme.
    #[serde(default = "default_model_host")]
    pub host: String,

    #[serde(default = "default_model_port")]
    pub port: u16,

    #[serde(default = "default_model_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ModelSection {
    fn default() -> Self {
        Self {
            host: default_model_host(),
            port: default_model_port(),
            timeout_ms: default_model_timeout_ms(),
        }
    }
}

impl ModelSection {
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(SentigateError::BadRequest(
                "model.host must not be empty".into(),
            ));
        }
        if !(1000..=60000).contains(&self.timeout_ms) {
            return Err(SentigateError::BadRequest(
                "model.timeout_ms must be between 1000 and 60000".into(),
            ));
        }
        Ok(())
    }
}

fn default_model_host() -> String {
    "0.0.0.0".into()
}
fn default_model_port() -> u16 {
    5000
}
fn default_model_timeout_ms() -> u64 {
    10000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LifecycleSection {
    #[serde(default = "default_window_horizon_secs")]
    pub window_horizon_secs: u64,

    #[serde(default = "default_window_capacity")]
    pub window_capacity: usize,

    #[serde(default = "default_count_duplicates")]
    pub count_duplicate_verifications: bool,
}

impl Default for LifecycleSection {
    fn default() -> Self {
        Self {
            window_horizon_secs: default_window_horizon_secs(),
            window_capacity: default_window_capacity(),
            count_duplicate_verifications: default_count_duplicates(),
        }
    }
}

impl LifecycleSection {
    pub fn to_coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            window_horizon: Duration::from_secs(self.window_horizon_secs),
            window_capacity: self.window_capacity,
            count_duplicate_verifications: self.count_duplicate_verifications,
        }
    }
}

fn default_window_horizon_secs() -> u64 {
    604800 // 1 week
}
fn default_window_capacity() -> usize {
    1000
}
fn default_count_duplicates() -> bool {
    true
}
