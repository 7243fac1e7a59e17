use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub proxy_config: ProxyConfig,
    #[serde(default)]
    pub client_config: ClientConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Where and how the proxy endpoint reaches the hosted model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    #[serde(default = "default_upstream_base_url")]
    pub upstream_base_url: String,
    #[serde(default = "default_model_prefix")]
    pub model_prefix: String,
    /// language code -> model id, for pairs not served by `model_prefix + code`
    #[serde(default)]
    pub model_overrides: HashMap<String, String>,
    #[serde(default)]
    pub api_token: Option<String>,
    #[serde(default = "default_upstream_timeout_ms")]
    pub upstream_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Proxy endpoint used by view sessions. Defaults to this server's own route.
    #[serde(default)]
    pub endpoint: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    12393
}

fn default_upstream_base_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_model_prefix() -> String {
    "Helsinki-NLP/opus-mt-".to_string()
}

fn default_upstream_timeout_ms() -> u64 {
    30_000
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            upstream_base_url: default_upstream_base_url(),
            model_prefix: default_model_prefix(),
            model_overrides: HashMap::new(),
            api_token: None,
            upstream_timeout_ms: default_upstream_timeout_ms(),
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("Configuration file not found: {}", path.display());
        }

        let content = substitute_env_vars(&read_text_file(path)?);

        // Determine file type by extension
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        let config = match extension.as_deref() {
            Some("json") | Some("jsonld") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        Ok(config)
    }

    /// Places to look for a config file, in order.
    pub fn candidate_paths() -> Vec<PathBuf> {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."));

        [
            std::env::var("CONFIG_PATH").ok().map(PathBuf::from),
            Some(PathBuf::from("conf.yaml")),
            Some(PathBuf::from("conf.json")),
            Some(exe_dir.join("conf.yaml")),
            Some(exe_dir.join("conf.json")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// URL the view sessions post to.
    pub fn client_endpoint(&self) -> String {
        self.client_config.endpoint.clone().unwrap_or_else(|| {
            format!(
                "http://127.0.0.1:{}/api/huggingface",
                self.system_config.port
            )
        })
    }
}

/// Replace `${VAR_NAME}` with the environment value, leaving unknown names as-is.
pub fn substitute_env_vars(content: &str) -> String {
    let pattern = Regex::new(r"\$\{(\w+)\}").expect("static pattern");
    pattern
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Read a text file, dropping a UTF-8 BOM and decoding lossily if needed.
fn read_text_file(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    let (content, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        tracing::warn!("Config file {} is not valid UTF-8", path.display());
    }
    Ok(content.into_owned())
}
