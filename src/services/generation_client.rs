use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::dto::gemini::{GenerateContentRequest, GenerateContentResponse},
};

const ERROR_BODY_EXCERPT: usize = 300;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse>;
}

/// `generateContent` over HTTP. The API key travels as the `key` query
/// parameter.
pub struct GeminiClient {
    http: reqwest::Client,
    api_url: String,
    api_key: SecretString,
}

impl GeminiClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| AppError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_url: config.gemini_api_url.clone(),
            api_key: config.gemini_api_key.clone(),
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> AppResult<GenerateContentResponse> {
        log::info!("Requesting generated content from {}", self.api_url);

        let response = self
            .http
            .post(&self.api_url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let excerpt: String = body.chars().take(ERROR_BODY_EXCERPT).collect();
            log::error!("Generation service returned {}: {}", status, excerpt);
            return Err(AppError::NetworkError(format!(
                "generation service returned {}: {}",
                status, excerpt
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            log::error!("Undecodable response envelope: {}", body);
            AppError::NetworkError(format!("invalid response envelope: {}", e))
        })
    }
}
