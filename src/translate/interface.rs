use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::TranslateError;
use crate::language::LanguagePair;

/// Body posted to the proxy endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub inputs: String,
    #[serde(default)]
    pub language: String,
}

impl TranslateRequest {
    pub fn new(text: &str, language: LanguagePair) -> Self {
        Self {
            inputs: text.to_string(),
            language: language.code().to_string(),
        }
    }
}

/// Translate interface trait - one bounded call per invocation
#[async_trait]
pub trait TranslateInterface: Send + Sync {
    /// Translate `text` from the pair's source language into English.
    ///
    /// # Returns
    /// The translated text, or `"No translation found."` when the server
    /// answered successfully without one.
    async fn translate(&self, text: &str, language: LanguagePair) -> Result<String, TranslateError>;
}
