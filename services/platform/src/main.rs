use std::sync::Arc;

use sea_orm::Database;
use tokio::signal;
use tracing::info;

use questline_auth_types::token::JwtSecret;
use questline_core::config::Config;
use questline_core::tracing::init_tracing;

use questline_platform::config::PlatformConfig;
use questline_platform::domain::verification::VerifySettings;
use questline_platform::infra::clock::SystemClock;
use questline_platform::router::build_router;
use questline_platform::state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = PlatformConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret.as_str()),
        verify: Arc::new(VerifySettings::new(
            config.verify_subject_id,
            config.verify_salt,
        )),
        clock: Arc::new(SystemClock),
    };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.platform_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("platform service listening on {http_addr}");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
    info!("platform service stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
