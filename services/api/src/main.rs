use std::{sync::Arc, time::Duration};

use anyhow::Result;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod auth;
mod config;
mod error;
mod extract;
mod middleware;
mod models;
mod repositories;
mod routes;
mod session;
mod state;
mod store;
#[cfg(test)]
mod test_utils;
mod upload;

use common::database::{DatabaseConfig, init_database};

use crate::{
    auth::{AdminAuth, AdminCredentials},
    config::{AppConfig, LogFormat, StoreBackend},
    repositories::CouponRepository,
    session::SessionStore,
    state::AppState,
    store::{CouponStore, MemoryCouponStore, MongoCouponStore},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init()?,
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer())
            .try_init()?,
    }

    info!("Starting coupon API service");
    info!("Configuration: {:?}", config);

    let store: Arc<dyn CouponStore> = match config.store_backend {
        StoreBackend::Mongo => {
            let db_config = DatabaseConfig::from_env()?;
            let database = init_database(&db_config).await?;

            // Check database connectivity
            if common::database::health_check(&database).await? {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            Arc::new(MongoCouponStore::new(database))
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory coupon store; data is lost on restart");
            Arc::new(MemoryCouponStore::new())
        }
    };

    let app_state = AppState {
        coupon_repository: CouponRepository::new(store),
        auth: AdminAuth::new(
            AdminCredentials::new(&config.admin_username, &config.admin_password),
            SessionStore::new(),
        ),
        max_upload_bytes: config.max_upload_bytes,
    };

    let cors = middleware::cors_layer(config.allowed_origins().as_deref())?;

    let app = routes::create_router(app_state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds,
        )))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Coupon API service listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
