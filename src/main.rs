use std::sync::Arc;

use document_actor::tracing::setup_tracing;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use tracking_refresh::config::Config;
use tracking_refresh::http::{self, AppState};
use tracking_refresh::lifecycle::{read_seed_file, TrackingSystem};
use tracking_refresh::tracking::HttpTrackingFetcher;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::from_env().map_err(|e| e.to_string())?;

    let fetcher = HttpTrackingFetcher::new(
        config.tracking_api_url.clone(),
        config.tracking_api_key.clone(),
        config.tracking_timeout,
    )
    .map_err(|e| format!("Failed to build tracking client: {e}"))?;

    let mut system = TrackingSystem::new(Arc::new(fetcher));

    if let Some(path) = &config.seed_file {
        let orders = read_seed_file(path)?;
        system.seed(orders).await?;
    }

    if let Some(every) = config.sweep_interval {
        system.spawn_schedule(every);
    }

    let app = http::router(AppState::new(
        system.sweeper.clone(),
        config.cron_secret.clone(),
    ));

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| format!("Failed to bind {address}: {e}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))?;

    system.shutdown().await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
