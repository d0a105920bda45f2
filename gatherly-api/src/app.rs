/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use gatherly_api::{app::{build_router, AppState}, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use gatherly_shared::auth::middleware::jwt_auth_middleware;
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                              # Health check (public)
/// └── /v1/
///     ├── /auth/
///     │   ├── POST /register
///     │   ├── POST /login
///     │   └── POST /refresh
///     ├── /users/
///     │   ├── GET /me                      # (authenticated)
///     │   └── PUT /me                      # (authenticated)
///     └── /events/
///         ├── GET    /                     # list with filters
///         ├── POST   /                     # (authenticated)
///         ├── GET    /recommendations/:user_id
///         ├── GET    /:id
///         ├── PUT    /:id                  # (authenticated, organizer)
///         ├── DELETE /:id                  # (authenticated, organizer)
///         └── POST   /:id/rsvp             # (authenticated)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
/// 4. Authentication (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    // Profile routes (require JWT authentication)
    let user_routes = Router::new()
        .route("/me", get(routes::users::get_profile))
        .route("/me", put(routes::users::update_profile))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    // Event reads are public; mutations and RSVP toggling need a verified identity
    let event_read_routes = Router::new()
        .route("/", get(routes::events::list_events))
        .route("/:id", get(routes::events::get_event))
        .route(
            "/recommendations/:user_id",
            get(routes::events::recommendations),
        );

    let event_write_routes = Router::new()
        .route("/", post(routes::events::create_event))
        .route("/:id", put(routes::events::update_event))
        .route("/:id", delete(routes::events::delete_event))
        .route("/:id/rsvp", post(routes::events::toggle_rsvp))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    let event_routes = event_read_routes.merge(event_write_routes);

    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/events", event_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// JWT authentication middleware layer
///
/// Delegates to the shared bearer-token middleware, which validates the
/// Authorization header and injects an AuthContext into request extensions,
/// then maps its errors onto the API error responses.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    jwt_auth_middleware(state.jwt_secret().to_string(), req, next)
        .await
        .map_err(crate::error::ApiError::from)
}
