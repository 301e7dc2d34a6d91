//! Shared configuration and domain types for revq.

use thiserror::Error;

mod app_config;
mod config;
pub mod review;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
