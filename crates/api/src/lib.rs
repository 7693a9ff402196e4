//! # SlotSync API
//!
//! The API crate provides the web server for the SlotSync scheduling service.
//! Organizers create schedules with candidate timeslots; guests submit the
//! timeslots they can attend; both are read back as JSON.
//!
//! ## Architecture
//!
//! This crate follows a layered architecture:
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Validate requests and dispatch to the repositories
//! - **Middleware**: Error-to-status mapping
//! - **Config**: Handle environment and application configuration
//!
//! The API uses Axum as the web framework. Persistence sits behind the
//! repository traits of `slotsync-db`, so handlers can be exercised with mocks.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement the HTTP contract
pub mod handlers;
/// Error handling shared by all handlers
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use eyre::{Result, WrapErr};
use slotsync_db::repositories::{AvailabilityRepository, ScheduleRepository};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Shared application state that is accessible to all request handlers
///
/// # Example
///
/// ```no_run
/// # async fn example(db_pool: slotsync_db::DbPool) {
/// use std::sync::Arc;
/// use slotsync_api::ApiState;
/// use slotsync_db::PgRepository;
///
/// let state = Arc::new(ApiState::new(PgRepository::new(db_pool)));
/// let app = slotsync_api::router(state);
/// # }
/// ```
pub struct ApiState {
    pub schedules: Arc<dyn ScheduleRepository>,
    pub availabilities: Arc<dyn AvailabilityRepository>,
}

impl ApiState {
    /// Uses one repository for both schedules and availabilities.
    pub fn new<R>(repository: R) -> Self
    where
        R: ScheduleRepository + AvailabilityRepository + 'static,
    {
        let repository = Arc::new(repository);
        Self {
            schedules: repository.clone(),
            availabilities: repository,
        }
    }
}

/// Installs the global tracing subscriber.
pub fn init_tracing(level: Level) -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Builds the router with every endpoint and no outer layers.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Schedule endpoints
        .merge(routes::schedule::routes())
        // Availability endpoints
        .merge(routes::availability::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Builds the full application: routes mounted under the configured prefix,
/// wrapped by [`with_layers`].
pub fn build_app(config: &config::ApiConfig, state: Arc<ApiState>) -> Result<Router> {
    let routes = router(state);
    let app = match &config.path_prefix {
        Some(prefix) => Router::new().nest(prefix, routes),
        None => routes,
    };

    with_layers(app, config)
}

/// Wraps `app` in request tracing, the per-request timeout and CORS for the
/// configured frontend origin.
pub fn with_layers(app: Router, config: &config::ApiConfig) -> Result<Router> {
    let origin: HeaderValue = config
        .frontend_origin
        .parse()
        .wrap_err_with(|| format!("Invalid FRONTEND_ORIGIN: {:?}", config.frontend_origin))?;
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allow_origin(origin)
        .allow_credentials(true);

    Ok(app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(TimeoutLayer::new(config.request_timeout()))
            .layer(cors),
    ))
}

/// Starts the API server with the provided configuration and state
///
/// # Example
///
/// ```no_run
/// # async fn example() -> eyre::Result<()> {
/// use std::sync::Arc;
/// use slotsync_api::{ApiState, config::ApiConfig};
/// use slotsync_db::{PgRepository, create_pool};
///
/// let config = ApiConfig::from_env()?;
/// let db_pool = create_pool(
///     &config.database_url,
///     config.database_max_connections,
///     config.database_acquire_timeout(),
/// )
/// .await?;
/// slotsync_api::start_server(config, Arc::new(ApiState::new(PgRepository::new(db_pool)))).await?;
/// # Ok(())
/// # }
/// ```
pub async fn start_server(config: config::ApiConfig, state: Arc<ApiState>) -> Result<()> {
    let app = build_app(&config, state)?;

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
