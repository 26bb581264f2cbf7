//! Async DeepL API client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::core::config::TranslatorConfig;
use crate::core::errors::{Result, TranslationError};
use crate::core::models::{
    Language, MeteredUsage, TargetLanguage, TranslateRequest, TranslationResult, UsageSnapshot,
};

/// Abstract translation provider consumed by the tool handlers.
///
/// The production implementation is [`DeepLClient`]; tests substitute a mock.
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate text to the target language
    async fn translate(&self, request: &TranslateRequest) -> Result<TranslationResult>;

    /// List languages the provider can translate from
    async fn source_languages(&self) -> Result<Vec<Language>>;

    /// List languages the provider can translate to
    async fn target_languages(&self) -> Result<Vec<TargetLanguage>>;

    /// Fetch account usage statistics
    async fn usage(&self) -> Result<UsageSnapshot>;
}

/// DeepL REST API client
#[derive(Debug, Clone)]
pub struct DeepLClient {
    client: reqwest::Client,
    config: Arc<TranslatorConfig>,
}

impl DeepLClient {
    /// Create a new client
    pub fn new(config: TranslatorConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .pool_idle_timeout(Some(Duration::from_secs(30)))
            .build()?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = TranslatorConfig::from_env()?;
        Self::new(config)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    fn auth_header(&self) -> String {
        format!("DeepL-Auth-Key {}", self.config.api_key)
    }

    /// Turn a response into its JSON body, mapping non-success statuses to
    /// API errors with the server's message attached
    async fn read_json(response: reqwest::Response) -> Result<Value> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v["message"].as_str().map(str::to_string))
                .unwrap_or(body);

            return Err(TranslationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let json = response
            .json::<Value>()
            .await
            .map_err(|e| TranslationError::InvalidResponse {
                message: e.to_string(),
            })?;

        Ok(json)
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let response = self
            .client
            .get(self.endpoint(path))
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        Self::read_json(response).await
    }
}

#[async_trait]
impl TranslationProvider for DeepLClient {
    async fn translate(&self, request: &TranslateRequest) -> Result<TranslationResult> {
        let mut body = serde_json::json!({
            "text": [request.text],
            "target_lang": request.target_lang,
            "preserve_formatting": request.preserve_formatting,
        });

        if let Some(source_lang) = &request.source_lang {
            body["source_lang"] = serde_json::json!(source_lang);
        }

        if let Some(formality) = request.formality {
            body["formality"] = serde_json::json!(formality.as_str());
        }

        debug!("POST /v2/translate target_lang={}", request.target_lang);

        let response = self
            .client
            .post(self.endpoint("/v2/translate"))
            .header("Authorization", self.auth_header())
            .json(&body)
            .send()
            .await?;

        let json = Self::read_json(response).await?;

        let translation = json["translations"]
            .get(0)
            .ok_or_else(|| TranslationError::InvalidResponse {
                message: "no translations in response".to_string(),
            })?;

        let text = translation["text"]
            .as_str()
            .ok_or_else(|| TranslationError::InvalidResponse {
                message: "translation has no text".to_string(),
            })?
            .to_string();

        let detected_source_lang = translation["detected_source_language"]
            .as_str()
            .map(str::to_string);

        Ok(TranslationResult {
            text,
            detected_source_lang,
        })
    }

    async fn source_languages(&self) -> Result<Vec<Language>> {
        let json = self.get_json("/v2/languages?type=source").await?;

        let entries = json.as_array().ok_or_else(|| TranslationError::InvalidResponse {
            message: "languages response is not an array".to_string(),
        })?;

        let languages = entries
            .iter()
            .filter_map(|entry| {
                Some(Language {
                    code: entry["language"].as_str()?.to_string(),
                    name: entry["name"].as_str()?.to_string(),
                })
            })
            .collect();

        Ok(languages)
    }

    async fn target_languages(&self) -> Result<Vec<TargetLanguage>> {
        let json = self.get_json("/v2/languages?type=target").await?;

        let entries = json.as_array().ok_or_else(|| TranslationError::InvalidResponse {
            message: "languages response is not an array".to_string(),
        })?;

        let languages = entries
            .iter()
            .filter_map(|entry| {
                Some(TargetLanguage {
                    code: entry["language"].as_str()?.to_string(),
                    name: entry["name"].as_str()?.to_string(),
                    supports_formality: entry["supports_formality"].as_bool().unwrap_or(false),
                })
            })
            .collect();

        Ok(languages)
    }

    async fn usage(&self) -> Result<UsageSnapshot> {
        let json = self.get_json("/v2/usage").await?;

        let character = json["character_count"].as_u64().map(|count| MeteredUsage {
            count,
            limit: json["character_limit"].as_u64(),
        });

        let document = json["document_count"].as_u64().map(|count| MeteredUsage {
            count,
            limit: json["document_limit"].as_u64(),
        });

        Ok(UsageSnapshot {
            character,
            document,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let config = TranslatorConfig::new("test_key:fx");
        let client = DeepLClient::new(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let config = TranslatorConfig {
            api_key: "".to_string(),
            api_url: "https://api.deepl.com".to_string(),
            timeout_ms: 30000,
        };
        assert!(DeepLClient::new(config).is_err());
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let mut config = TranslatorConfig::new("test_key");
        config.api_url = "https://api.deepl.com/".to_string();
        let client = DeepLClient::new(config).unwrap();

        assert_eq!(
            client.endpoint("/v2/translate"),
            "https://api.deepl.com/v2/translate"
        );
    }
}
