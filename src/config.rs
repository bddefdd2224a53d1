use std::{env, time::Duration};

use secrecy::{ExposeSecret, SecretString};

use crate::{
    errors::{AppError, AppResult},
    models::dto::request::MAX_QUESTION_COUNT,
};

pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";
pub const DEFAULT_QUESTION_COUNT: u16 = 100;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_url: String,
    pub gemini_api_key: SecretString,
    pub question_count: u16,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            gemini_api_url: env::var("GEMINI_API_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_URL.to_string()),
            gemini_api_key: SecretString::from(env::var("GEMINI_API_KEY").unwrap_or_default()),
            question_count: env::var("QUESTION_COUNT")
                .ok()
                .and_then(|c| c.parse().ok())
                .unwrap_or(DEFAULT_QUESTION_COUNT),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.gemini_api_url = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = SecretString::from(key.into());
        self
    }

    pub fn with_question_count(mut self, count: u16) -> Self {
        self.question_count = count;
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Checks the values the generation service cannot work without.
    pub fn validate(&self) -> AppResult<()> {
        if self.gemini_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigError(
                "GEMINI_API_KEY is not set".to_string(),
            ));
        }

        let url = self.gemini_api_url.trim();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(AppError::ConfigError(format!(
                "GEMINI_API_URL must be an http(s) URL, got '{}'",
                url
            )));
        }

        if !(1..=MAX_QUESTION_COUNT).contains(&self.question_count) {
            return Err(AppError::ConfigError(format!(
                "QUESTION_COUNT must be between 1 and {}, got {}",
                MAX_QUESTION_COUNT, self.question_count
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            gemini_api_url: "http://127.0.0.1:9/generate".to_string(),
            gemini_api_key: SecretString::from("test-key".to_string()),
            question_count: 2,
            request_timeout_secs: 5,
        }
    }
}
