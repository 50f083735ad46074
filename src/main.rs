// src/main.rs
use std::{sync::Arc, time::Duration};

use axum_server::Handle;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

use polls::{config::Config, db, routes, state::AppState, store::PgStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok(); // Load environment variables from .env file

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(polls::config::DEFAULT_LOG_FILTER)),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let config = Config::load()?;

    let pool = db::create_pool(&config).await?;
    db::migrate(&pool).await?;
    info!("Database ready");

    let state = AppState::with_system_clock(Arc::new(PgStore::new(pool)))?;
    let app = routes::create_routes(state);

    let address = config.bind_address()?;
    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    info!("Server running on {address}");
    axum_server::bind(address)
        .handle(handle)
        .serve(app.into_make_service())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(handle: Handle) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {e}");
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

    handle.graceful_shutdown(Some(Duration::from_secs(10)));
}
