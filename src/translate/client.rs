use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::error::{TranslateError, NO_TRANSLATION_MESSAGE};
use super::interface::{TranslateInterface, TranslateRequest};
use crate::language::LanguagePair;

/// Bound on a single call, from send until the body is read.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Client for the translation proxy endpoint
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl ProxyClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn exchange(&self, request: &TranslateRequest) -> Result<String, TranslateError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TranslateError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TranslateError::Transport(e.to_string()))?;

        if status.is_success() {
            Ok(extract_translation(&body))
        } else {
            Err(TranslateError::Server {
                status: status.as_u16(),
                message: extract_error(&body),
            })
        }
    }
}

#[async_trait]
impl TranslateInterface for ProxyClient {
    async fn translate(&self, text: &str, language: LanguagePair) -> Result<String, TranslateError> {
        let request = TranslateRequest::new(text, language);
        debug!(
            "Sending translation request: language={}, chars={}",
            request.language,
            text.chars().count()
        );

        match tokio::time::timeout(self.timeout, self.exchange(&request)).await {
            Ok(Ok(translation)) => Ok(translation),
            Ok(Err(e)) => {
                warn!("Translation request failed: {}", e);
                Err(e)
            }
            Err(_) => {
                warn!("Translation request timed out after {:?}", self.timeout);
                Err(TranslateError::Timeout(self.timeout))
            }
        }
    }
}

/// `translation_text` of the first array element, or the fallback text.
pub fn extract_translation(body: &[u8]) -> String {
    let value = serde_json::from_slice::<Value>(body).ok();
    value
        .as_ref()
        .and_then(|v| v.get(0))
        .and_then(|v| v.get("translation_text"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| NO_TRANSLATION_MESSAGE.to_string())
}

fn extract_error(body: &[u8]) -> Option<String> {
    let value = serde_json::from_slice::<Value>(body).ok();
    value
        .as_ref()
        .and_then(|v| v.get("error"))
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
