//! Access governance HTTP server.
//!
//! In-memory record store behind the dashboard API. State resets on restart.

use access_gov::{AppState, Config, build_app};
use access_gov_runtime::metrics::MetricsExporter;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "access_gov=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting access governance server");

    let config = Config::from_env();
    info!(
        address = %config.bind_address(),
        policy = %config.store.approval_policy,
        seed_demo_data = config.store.seed_demo_data,
        require_otp = config.auth.require_otp,
        "Configuration loaded"
    );

    let metrics = if config.metrics_enabled {
        let exporter = MetricsExporter::install()?;
        access_gov::metrics::describe();
        exporter
    } else {
        MetricsExporter::disabled()
    };

    let state = AppState::from_config(&config, metrics);
    let store = state.store.clone();
    let app = build_app(state, config.server.cors_allowed_origin.as_deref());

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped, draining store");
    if let Err(e) = store.shutdown(config.shutdown_timeout()).await {
        error!(error = %e, "Store did not drain cleanly");
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            },
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C signal, shutting down gracefully..."),
        () = terminate => info!("Received SIGTERM signal, shutting down gracefully..."),
    }
}
