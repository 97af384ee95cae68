mod config_manager;
mod model_service;
mod routes;
mod state;
mod translate;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config_manager::Config;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("translate_backend=debug,tower_http=debug")),
        )
        .init();

    let mut config = load_config()?;
    config.apply_env_overrides();

    // Model worker and language table are built once and shared by every request
    let app_state = AppState::new(config.clone())?;
    let app = routes::create_app(app_state);

    let addr = config.system_config.bind_addr()?;
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// First config file that loads wins; defaults if none exists.
fn load_config() -> Result<Config> {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    let explicit = std::env::var("CONFIG_PATH").ok();
    let config_paths: Vec<String> = vec![
        explicit.clone(),
        Some("conf.jsonld".to_string()),
        Some("conf.yaml".to_string()),
        exe_dir.join("conf.jsonld").to_str().map(|s| s.to_string()),
        exe_dir.join("conf.yaml").to_str().map(|s| s.to_string()),
    ]
    .into_iter()
    .flatten()
    .collect();

    for path in &config_paths {
        if !std::path::Path::new(path).exists() {
            tracing::debug!("No config at {}", path);
            continue;
        }
        let config = Config::load(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config from {}: {}", path, e))?;
        info!("Loaded configuration from: {}", path);
        return Ok(config);
    }

    if let Some(path) = explicit {
        anyhow::bail!("CONFIG_PATH points to a missing file: {}", path);
    }

    warn!("No config file found (tried {:?}), using defaults", config_paths);
    Ok(Config::default())
}
