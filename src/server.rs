//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::{OPENAPI_JSON_PATH, SWAGGER_PATH, create_router};
use crate::config::{Environment, settings::Settings};
use crate::db::{establish_async_connection_pool, ping};
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
    environment: Environment,
}

impl Server {
    pub fn new(settings: Settings, environment: Environment) -> Self {
        Self {
            settings,
            environment,
        }
    }

    /// Start the server and run until shutdown signal
    ///
    /// 1. Logs the configuration (no secrets)
    /// 2. Opens the connection pool and pings the database
    /// 3. Builds application state and router
    /// 4. Binds and serves with graceful shutdown
    ///
    /// # Errors
    /// Any failure before the listener is up is returned without retry, so
    /// the process exits non-zero when the database is unreachable.
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %self.environment,
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            "Server configuration loaded"
        );

        tracing::info!(
            database = %self.settings.database.target_description(),
            max_connections = %self.settings.database.max_connections,
            min_connections = %self.settings.database.min_connections,
            connection_timeout = %self.settings.database.connection_timeout,
            "Database configuration loaded"
        );

        tracing::info!(
            level = %self.settings.logger.level,
            console_enabled = %self.settings.logger.console.enabled,
            file_enabled = %self.settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        tracing::info!("Initializing database connection pool...");
        let pool = establish_async_connection_pool(&self.settings.database)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e.root_message(), "Failed to create connection pool");
            })?;

        ping(&pool).await.inspect_err(|e| {
            tracing::error!(error = %e.root_message(), "Database did not answer the liveness ping");
        })?;
        tracing::info!("Successfully connected to the database");

        let state = AppState::new(pool);
        let router = create_router(state);
        tracing::info!(
            swagger = SWAGGER_PATH,
            openapi = OPENAPI_JSON_PATH,
            "Router configured"
        );

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, address = %address, "Failed to bind to address");
            })
            .with_context(|| format!("Failed to bind to {}", address))?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for Ctrl+C or SIGTERM.
///
/// A signal handler that cannot be installed never fires; the other one
/// still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
