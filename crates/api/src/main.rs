use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fiber_survey_api::config::ServerConfig;
use fiber_survey_api::geo::{GeoFetcher, GeoTreeCache};
use fiber_survey_api::router::build_app_router;
use fiber_survey_api::session::SessionStore;
use fiber_survey_api::state::{open_sheet_targets, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fiber_survey_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");
    if config.form_password.is_none() {
        tracing::warn!("No FORM_PASSWORD_HASH or FORM_PASSWORD set, extended form is locked");
    }

    // --- Spreadsheet ---
    let sheets = Arc::new(open_sheet_targets(&config.sheet));
    tracing::info!(backend = ?config.sheet, "Sheet backend ready");

    // --- Geo tree (warmed in the background; first request waits if needed) ---
    let geo = Arc::new(GeoTreeCache::new(GeoFetcher::new(config.geo.clone())));
    let warm = Arc::clone(&geo);
    tokio::spawn(async move {
        warm.tree().await;
    });

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        geo,
        sessions: Arc::new(SessionStore::new(Duration::from_secs(config.session_ttl_secs))),
        sheets,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
