//! Configuration management

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, TranslationError};

/// Endpoint for paid DeepL API plans
pub const PRO_API_URL: &str = "https://api.deepl.com";

/// Endpoint for free DeepL API plans (keys with the `:fx` suffix)
pub const FREE_API_URL: &str = "https://api-free.deepl.com";

/// Configuration for the DeepL client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub api_key: String,
    pub api_url: String,
    pub timeout_ms: u64,
}

impl TranslatorConfig {
    /// Create a configuration for the given key, picking the endpoint that
    /// matches the key's plan
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let api_url = default_api_url(&api_key).to_string();
        Self {
            api_key,
            api_url,
            timeout_ms: 30000,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// `DEEPL_API_KEY` is required; `DEEPL_API_URL` and
    /// `REQUEST_TIMEOUT_MS` are optional overrides. A missing key is a
    /// permanent error, callers are not expected to retry.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("DEEPL_API_KEY").map_err(|_| TranslationError::Config {
            message: "DEEPL_API_KEY environment variable is not set. \
                      Please set it with your DeepL API key."
                .to_string(),
        })?;

        let api_url =
            std::env::var("DEEPL_API_URL").unwrap_or_else(|_| default_api_url(&api_key).to_string());

        let timeout_ms = std::env::var("REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".to_string())
            .parse::<u64>()
            .map_err(|e| TranslationError::Config {
                message: format!("invalid REQUEST_TIMEOUT_MS: {}", e),
            })?;

        let config = Self {
            api_key,
            api_url,
            timeout_ms,
        };
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(TranslationError::Config {
                message: "API key is required".to_string(),
            });
        }

        if self.api_url.is_empty() {
            return Err(TranslationError::Config {
                message: "API endpoint is required".to_string(),
            });
        }

        if self.timeout_ms == 0 {
            return Err(TranslationError::Config {
                message: "timeout_ms must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}

/// Pick the API endpoint matching the key's plan.
///
/// Free-tier keys carry a `:fx` suffix and must use the free endpoint.
pub fn default_api_url(api_key: &str) -> &'static str {
    if api_key.ends_with(":fx") {
        FREE_API_URL
    } else {
        PRO_API_URL
    }
}
