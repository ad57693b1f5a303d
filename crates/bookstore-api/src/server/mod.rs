//! Server setup and initialization
//!
//! Provides the application builder and the server runner.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use bookstore_common::{AppConfig, AppError, JwtService};
use bookstore_db::{
    create_pool, run_migrations, PgBookRepository, PgGenreRepository, PgOrderRepository, PgPool,
    PgStore, PgUserRepository, PoolConfig,
};
use bookstore_service::ServiceContextBuilder;
use tokio::net::TcpListener;
use tracing::info;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.cors,
        config.app.env.is_production(),
        Duration::from_secs(config.api.request_timeout_secs),
    );
    router.with_state(state)
}

/// Connect to PostgreSQL and apply pending migrations
pub async fn connect_database(config: &AppConfig) -> Result<PgPool, AppError> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(&PoolConfig::from(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    run_migrations(&pool)
        .await
        .map_err(|e| AppError::Database(format!("Migration failed: {e}")))?;

    Ok(pool)
}

/// Wire repositories, the store and the JWT service over an existing pool
pub fn app_state_with_pool(config: AppConfig, pool: PgPool) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.expiry_seconds,
    ));

    let service_context = ServiceContextBuilder::new()
        .store(Arc::new(PgStore::new(pool.clone())))
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .genre_repo(Arc::new(PgGenreRepository::new(pool.clone())))
        .book_repo(Arc::new(PgBookRepository::new(pool.clone())))
        .order_repo(Arc::new(PgOrderRepository::new(pool)))
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let pool = connect_database(&config).await?;
    app_state_with_pool(config, pool)
}

/// Run the HTTP server until a shutdown signal arrives
pub async fn run_server(app: Router, address: &str) -> Result<(), AppError> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    info!("Server listening on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();

    let pool = connect_database(&config).await?;
    let state = app_state_with_pool(config, pool.clone())?;
    let app = create_app(state);

    run_server(app, &address).await?;

    info!("Closing database pool");
    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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

    info!("Shutdown signal received, draining connections");
}
