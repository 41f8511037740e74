//! Gridbook Server - Main entry point

use anyhow::Result;
use gridbook_common::logging::{init_logging, LogConfig};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::signal;
use tracing::info;

use gridbook_server::{
    api,
    config::Config,
    db,
    features::FeatureState,
    refresh::{AttributeClient, PgReferenceInfoStore, RefreshJob, RefreshScheduler, ReferenceInfoStore},
    vpic::VpicClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging with configuration from environment
    let log_config = LogConfig::builder()
        .log_file_prefix("gridbook-server".to_string())
        .filter_directives("gridbook_server=debug,tower_http=debug,sqlx=info".to_string())
        .build();

    // Environment variables take precedence
    let log_config = log_config.merge_env()?;

    init_logging(&log_config)?;

    info!("Starting Gridbook server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let db_pool = db::create_pool(&config.database).await?;
    db::run_migrations(&db_pool).await?;

    let reference: Arc<dyn ReferenceInfoStore> = Arc::new(PgReferenceInfoStore::new(db_pool.clone()));

    // Start the reference refresh job if enabled
    let refresh_handle = if config.refresh.enabled {
        let client =
            AttributeClient::new(&config.upstream.carapi_base_url, config.upstream.timeout_secs)?;
        let job = RefreshJob::new(client, reference.clone());
        let handle =
            RefreshScheduler::new(job, Duration::from_secs(config.refresh.interval_secs)).start();
        Some(handle)
    } else {
        info!("Reference refresh is disabled (REFRESH_ENABLED=false)");
        None
    };

    let state = FeatureState {
        db: db_pool,
        season: config.season.clone(),
        vpic: VpicClient::new(&config.upstream.nhtsa_base_url, config.upstream.timeout_secs)?,
        reference,
    };

    let app = api::create_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(config.server.shutdown_timeout_secs))
        .await?;

    if let Some(handle) = refresh_handle {
        handle.stop().await;
    }

    info!("Server shut down gracefully");

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal(timeout_secs: u64) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }

    // Give ongoing requests time to complete
    info!("Waiting up to {} seconds for connections to close", timeout_secs);
    tokio::time::sleep(Duration::from_secs(timeout_secs.min(5))).await;
}
