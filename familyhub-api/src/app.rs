/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use familyhub_api::{app::AppState, config::Config};
/// use familyhub_shared::store::{DocumentStore, FileStorage};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let store = DocumentStore::new(FileStorage::new(&config.storage.data_path));
/// let state = AppState::new(store, config);
/// let app = familyhub_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
    Router,
};
use familyhub_shared::{
    auth::{
        authorization,
        middleware::{authenticate_headers, AuthContext},
    },
    store::DocumentStore,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// The one document every handler reads and mutates
    pub store: Arc<DocumentStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: DocumentStore, config: Config) -> Self {
        Self {
            store: Arc::new(store),
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
/// /api
/// ├── GET  /health                     # public
/// ├── GET  /categories                 # public
/// ├── /auth/
/// │   ├── POST /register               # public
/// │   └── POST /login                  # public
/// ├── GET  /posts                      # public
/// ├── POST /posts                      # authenticated
/// ├── GET  /tasks                      # public
/// ├── POST /tasks                      # authenticated
/// ├── PUT|DELETE /tasks/:id            # authenticated
/// ├── GET  /facebook/feed              # authenticated
/// └── /admin/                          # owner or admin
///     ├── GET  /pending-users
///     ├── POST /users/:id/approve
///     └── POST /users/:id/deny
/// ```
///
/// # Middleware Stack
///
/// Applied in order (outermost first):
/// 1. Security headers
/// 2. CORS (tower-http CorsLayer)
/// 3. Logging (tower-http TraceLayer)
/// 4. Authentication and role checks (per-route basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let require_auth = || middleware::from_fn_with_state(state.clone(), jwt_auth_layer);

    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Listing is public, writing needs a credential
    let content_routes = Router::new()
        .route(
            "/posts",
            get(routes::posts::list_posts)
                .merge(post(routes::posts::create_post).route_layer(require_auth())),
        )
        .route(
            "/tasks",
            get(routes::tasks::list_tasks)
                .merge(post(routes::tasks::create_task).route_layer(require_auth())),
        )
        .route(
            "/tasks/:id",
            put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task)
                .route_layer(require_auth()),
        );

    let facebook_routes = Router::new()
        .route("/feed", get(routes::facebook::feed))
        .route_layer(require_auth());

    // The admin check reads the context the JWT layer inserts, so it sits inside it
    let admin_routes = Router::new()
        .route("/pending-users", get(routes::admin::list_pending_users))
        .route("/users/:id/approve", post(routes::admin::approve_user))
        .route("/users/:id/deny", post(routes::admin::deny_user))
        .route_layer(middleware::from_fn(admin_layer))
        .route_layer(require_auth());

    let api_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/categories", get(routes::categories::list_categories))
        .nest("/auth", auth_routes)
        .merge(content_routes)
        .nest("/facebook", facebook_routes)
        .nest("/admin", admin_routes);

    Router::new()
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
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
}

/// JWT authentication middleware layer
///
/// Validates the bearer credential and injects [`AuthContext`] into the
/// request extensions.
async fn jwt_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_context = authenticate_headers(req.headers(), state.jwt_secret())?;
    req.extensions_mut().insert(auth_context);

    Ok(next.run(req).await)
}

/// Owner/admin gate, layered inside [`jwt_auth_layer`]
async fn admin_layer(req: Request, next: Next) -> Result<Response, ApiError> {
    let auth = req
        .extensions()
        .get::<AuthContext>()
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    authorization::require_admin(auth)?;

    Ok(next.run(req).await)
}
