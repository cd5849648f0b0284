use std::sync::Arc;

use anyhow::Context;
use fiszki_server::{AppState, ServerConfig, app, bootstrap, cors_layer, db};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    info!("starting fiszki server");
    let config = ServerConfig::from_env().context("failed to load configuration")?;
    if config.auth.uses_dev_secret() {
        warn!("SECRET_KEY is not set, signing admin tokens with the development secret");
    }
    info!(
        bind_addr = %config.bind_addr,
        password_scheme = ?config.auth.password_scheme,
        token_minutes = config.auth.token_lifetime.num_minutes(),
        "configuration loaded"
    );

    let db = db::init_pool_and_migrate(&config.database_url)
        .await
        .context("failed to initialize database")?;

    let state = Arc::new(AppState::new(db, &config.auth));
    if let Some(default_admin) = &config.default_admin {
        bootstrap::ensure_default_admin(&state, default_admin).await?;
    }

    let router = app(state).layer(cors_layer(&config.cors_origins)?);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "server is ready, press Ctrl+C to shut down");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, stopping server");
}

fn init_tracing() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
