use dashmap::DashMap;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::config::Config;
use crate::proxy::UpstreamClient;
use crate::translate::{ProxyClient, TranslateInterface};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub upstream: Arc<UpstreamClient>,
    pub translator: Arc<dyn TranslateInterface>,
    pub sessions: Arc<DashMap<String, SessionContext>>,
}

#[derive(Debug, Clone)]
pub struct SessionContext {
    pub mounted_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translator = Arc::new(ProxyClient::new(config.client_endpoint()));
        Self::with_translator(config, translator)
    }

    /// Build state whose view sessions translate through `translator`.
    pub fn with_translator(
        config: Config,
        translator: Arc<dyn TranslateInterface>,
    ) -> anyhow::Result<Self> {
        let upstream = Arc::new(UpstreamClient::new(&config.proxy_config)?);

        Ok(Self {
            config,
            upstream,
            translator,
            sessions: Arc::new(DashMap::new()),
        })
    }

    pub fn generate_session_id(&self) -> String {
        Uuid::new_v4().to_string()
    }

    pub fn register_session(&self, session_id: &str) {
        self.sessions.insert(
            session_id.to_string(),
            SessionContext {
                mounted_at: Instant::now(),
            },
        );
    }

    /// Remove a session, returning how long it was mounted.
    pub fn release_session(&self, session_id: &str) -> Option<std::time::Duration> {
        self.sessions
            .remove(session_id)
            .map(|(_, context)| context.mounted_at.elapsed())
    }
}
