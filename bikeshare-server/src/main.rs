use std::process::ExitCode;

use bikeshare_server::config::Settings;
use bikeshare_server::gbfs::GbfsClient;
use bikeshare_server::service::StationService;
use bikeshare_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match GbfsClient::new(settings.gbfs_config()) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to create feed client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let state = AppState::new(StationService::new(client));
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind((settings.host.as_str(), settings.port)).await
    {
        Ok(listener) => listener,
        Err(e) => {
            error!("failed to bind {}:{}: {e}", settings.host, settings.port);
            return ExitCode::FAILURE;
        }
    };

    info!(
        app = %settings.app_name,
        env = %settings.env,
        feed = %settings.api_url,
        "listening on http://{}:{}",
        settings.host,
        settings.port
    );
    info!("  GET  /health                  - Health check");
    info!("  GET  /v1/stations             - List stations");
    info!("  GET  /v1/stations/:station_id - Look up one station");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
