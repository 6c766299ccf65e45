//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::application::services::{Services, SessionTokens};
use crate::config::Settings;
use crate::infrastructure::database;
use crate::infrastructure::repositories::Repositories;
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::logging;
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub services: Services,
    pub sessions: SessionTokens,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Wire services onto the given repositories.
    ///
    /// `db` is only used directly by the readiness probe.
    pub fn new(db: PgPool, repositories: Repositories, settings: Settings) -> Self {
        let snowflake = Arc::new(SnowflakeGenerator::new(
            settings.snowflake.machine_id,
            settings.snowflake.epoch,
        ));

        Self {
            db,
            services: Services::new(&repositories, snowflake),
            sessions: SessionTokens::new(&settings.session),
            settings: Arc::new(settings),
        }
    }
}

/// Router with every route and the HTTP middleware stack
pub fn build_router(state: AppState) -> Router {
    routes::create_router(state)
        .layer(CompressionLayer::new())
        .layer(logging::create_trace_layer())
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let db = database::create_pool(&settings.database).await?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db).await?;
            tracing::info!("Database migrations applied");
        }

        let addr: SocketAddr = settings.server_addr().parse()?;
        let state = AppState::new(db.clone(), Repositories::postgres(db), settings);
        let router = build_router(state);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
