use anyhow::Result;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use translator_backend::config::Config;
use translator_backend::routes;
use translator_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translator_backend=debug,tower_http=debug")),
        )
        .init();

    // Load configuration - try multiple paths
    let config_paths = Config::candidate_paths();
    let mut config = None;

    for path in &config_paths {
        match Config::load(path) {
            Ok(cfg) => {
                info!("Loaded configuration from: {}", path.display());
                config = Some(cfg);
                break;
            }
            Err(e) => {
                tracing::debug!("Failed to load config from {}: {}", path.display(), e);
            }
        }
    }

    let config = config.ok_or_else(|| {
        anyhow::anyhow!("Could not find config file. Tried: {:?}", config_paths)
    })?;

    let addr: SocketAddr = format!("{}:{}", config.system_config.host, config.system_config.port)
        .parse()?;
    info!("View sessions will translate via {}", config.client_endpoint());

    let app_state = AppState::new(config)?;
    let app = routes::app(app_state);

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
