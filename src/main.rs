use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use secrecy::ExposeSecret;
use tracing::{info, warn};

use customer_service::api::create_router;
use customer_service::app::AppState;
use customer_service::config::AppConfig;
use customer_service::infra::observability::{init_metrics_handle, init_tracing};
use customer_service::infra::{JwtTokenIssuer, PostgresStore};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; real deployments inject the environment.
    dotenv().ok();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    init_tracing(config.log_format);

    let metrics = init_metrics_handle();
    if metrics.is_none() {
        warn!("Prometheus recorder could not be installed, /metrics disabled");
    }

    let store = PostgresStore::connect(&config.database)
        .await
        .with_context(|| format!("failed to connect to Postgres at {}", config.database.host))?;
    store
        .auto_migrate()
        .await
        .context("failed to create the customers table")?;
    info!(host = %config.database.host, database = %config.database.name, "Connected to Postgres");

    if config.token.secret.expose_secret().is_empty() {
        warn!("JWT_SECRET is empty, token issuance will fail");
    }
    let issuer = JwtTokenIssuer::from_config(&config.token);

    let state = AppState::new(Arc::new(store), Arc::new(issuer)).with_metrics(metrics);
    let router = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.server.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.server))?;
    info!(addr = %config.server, "Server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
