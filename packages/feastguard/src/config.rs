use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::workflow::MIN_STEP_BUDGET_MULTIPLIER;

pub const DEFAULT_MODEL: &str = ai_client::DEFAULT_MODEL;
pub const DEFAULT_ENDPOINT: &str = ai_client::OPENROUTER_BASE_URL;
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Absent means offline mode: template fallbacks only
    pub openrouter_api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub request_timeout: Duration,
    pub step_budget_multiplier: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openrouter_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: Duration::from_secs(MAX_REQUEST_TIMEOUT_SECS),
            step_budget_multiplier: MIN_STEP_BUDGET_MULTIPLIER,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let timeout_secs: u64 = env::var("FEASTGUARD_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| MAX_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .context("FEASTGUARD_REQUEST_TIMEOUT_SECS must be a valid number")?;

        let step_budget_multiplier: usize = env::var("FEASTGUARD_STEP_BUDGET_MULTIPLIER")
            .unwrap_or_else(|_| MIN_STEP_BUDGET_MULTIPLIER.to_string())
            .parse()
            .context("FEASTGUARD_STEP_BUDGET_MULTIPLIER must be a valid number")?;

        Ok(Self {
            openrouter_api_key: env::var("OPENROUTER_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            model: env::var("FEASTGUARD_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            endpoint: env::var("FEASTGUARD_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
            request_timeout: Duration::from_secs(timeout_secs.clamp(1, MAX_REQUEST_TIMEOUT_SECS)),
            step_budget_multiplier: step_budget_multiplier.max(MIN_STEP_BUDGET_MULTIPLIER),
        })
    }
}
