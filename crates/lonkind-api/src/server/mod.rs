//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use lonkind_cache::{Publisher, RedisPool};
use lonkind_common::{AppConfig, AppError, JwtService, StoreBackend};
use lonkind_core::SnowflakeGenerator;
use lonkind_db::{create_pool, run_migrations, MemoryStore};
use lonkind_service::{RetryPolicy, ServiceContextBuilder};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware_with_config;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes are merged outside the middleware stack so they are
/// never rate limited.
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let api = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        Duration::from_secs(config.api.request_timeout_secs),
        config.app.env.is_production(),
    );

    api.merge(health_routes()).with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let builder = ServiceContextBuilder::new()
        .jwt_service(jwt_service)
        .snowflake_generator(snowflake_generator)
        .retry_policy(RetryPolicy::from(&config.ledger))
        .publisher(create_publisher(&config)?);

    let builder = match config.store {
        StoreBackend::Postgres => {
            let db = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let db_config = lonkind_db::DatabaseConfig {
                url: db.url.clone(),
                max_connections: db.max_connections,
                min_connections: db.min_connections,
                ..Default::default()
            };
            let pool = create_pool(&db_config)
                .await
                .map_err(|e| AppError::Unavailable(format!("PostgreSQL: {e}")))?;
            info!("PostgreSQL connection established");

            if db.run_migrations {
                run_migrations(&pool)
                    .await
                    .map_err(|e| AppError::Config(format!("Migrations failed: {e}")))?;
            }

            builder.postgres(pool)
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; data is lost on restart");
            builder.memory_store(&MemoryStore::new())
        }
    };

    let service_context = builder
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Redis publisher, when Redis is configured
fn create_publisher(config: &AppConfig) -> Result<Option<Publisher>, AppError> {
    let Some(redis) = config.redis.as_ref() else {
        info!("REDIS_URL not set; live events are disabled");
        return Ok(None);
    };

    let pool = RedisPool::from_config(redis).map_err(|e| AppError::Config(e.to_string()))?;
    Ok(Some(Publisher::new(pool)))
}

/// Run the HTTP server on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Listener has no address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::Internal(e.into()))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    run_server(app, listener).await
}
