use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reqwest::Client;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::ProxyConfig;
use crate::language::LanguagePair;
use crate::state::AppState;
use crate::translate::TranslateRequest;

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Missing text to translate.")]
    MissingInput,

    #[error("Unsupported language pair: {0}")]
    UnsupportedLanguage(String),

    #[error("{0}")]
    InvalidBody(String),

    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Translation service unreachable.")]
    Unreachable,

    #[error("Translation service timed out.")]
    Timeout,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingInput
            | ProxyError::UnsupportedLanguage(_)
            | ProxyError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Unreachable => StatusCode::BAD_GATEWAY,
            ProxyError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Forwards translation requests to the hosted model for each language pair
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: String,
    model_prefix: String,
    model_overrides: HashMap<String, String>,
    api_token: Option<String>,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(config: &ProxyConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("translator-backend/", env!("CARGO_PKG_VERSION")))
            .build()?;

        info!(
            "Initialized upstream client: base_url={}, model_prefix={}",
            config.upstream_base_url, config.model_prefix
        );

        Ok(Self {
            client,
            base_url: config.upstream_base_url.trim_end_matches('/').to_string(),
            model_prefix: config.model_prefix.clone(),
            model_overrides: config.model_overrides.clone(),
            // an unset `${VAR}` survives substitution verbatim
            api_token: config
                .api_token
                .clone()
                .filter(|t| !t.trim().is_empty() && !t.starts_with("${")),
            timeout: Duration::from_millis(config.upstream_timeout_ms),
        })
    }

    /// Hosted model id serving `pair`.
    pub fn model_for(&self, pair: LanguagePair) -> String {
        self.model_overrides
            .get(pair.code())
            .cloned()
            .unwrap_or_else(|| format!("{}{}", self.model_prefix, pair.code()))
    }

    pub async fn forward(&self, pair: LanguagePair, inputs: &str) -> Result<Value, ProxyError> {
        let url = format!("{}/{}", self.base_url, self.model_for(pair));
        debug!("Forwarding {} request to {}", pair, url);

        let mut request = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&json!({ "inputs": inputs }));
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                warn!("Upstream request to {} timed out", url);
                ProxyError::Timeout
            } else {
                error!("Upstream request to {} failed: {}", url, e);
                ProxyError::Unreachable
            }
        })?;

        let status = response.status();
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) if e.is_timeout() => return Err(ProxyError::Timeout),
            Err(e) => {
                debug!("Upstream body for {} is not JSON: {}", url, e);
                Value::Null
            }
        };

        if status.is_success() {
            return Ok(body);
        }

        let message = body
            .get("error")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Translation service returned {}", status.as_u16()));
        warn!("Upstream {} responded {}: {}", url, status, message);

        Err(ProxyError::Upstream {
            status: StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::BAD_GATEWAY),
            message,
        })
    }
}

/// `POST /api/huggingface`
pub async fn translate_handler(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<Value>, ProxyError> {
    let Json(request) = payload.map_err(|rejection| ProxyError::InvalidBody(rejection.body_text()))?;

    if request.inputs.trim().is_empty() {
        return Err(ProxyError::MissingInput);
    }
    let pair: LanguagePair = request
        .language
        .parse()
        .map_err(|_| ProxyError::UnsupportedLanguage(request.language.clone()))?;

    let body = state.upstream.forward(pair, &request.inputs).await?;
    Ok(Json(body))
}
