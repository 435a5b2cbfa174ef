use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sintaxis_backend::{create_routes, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("sintaxis_backend=debug,tower_http=debug")),
        )
        .init();

    let config = match Config::discover() {
        Some((config, path)) => {
            info!("Loaded configuration from: {}", path);
            config
        }
        None => {
            warn!(
                "No configuration file found (tried {:?}), using defaults",
                Config::search_paths()
            );
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    let app_state = AppState::new(config.clone())?;
    let app = create_routes(app_state)?;

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
