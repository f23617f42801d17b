//! # Server Setup
//!
//! Server initialization, route registration, and HTTP server startup.
//!
//! Routes are split in two routers that are merged at the end: public routes,
//! and protected routes that sit behind [`require_auth`]. Role checks happen
//! in the handlers through [`lib_auth::authorize`].

// region: --- Imports
use axum::{
    extract::FromRef,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, put},
    Router,
};
use lib_auth::{hash_password, SigningContext, TokenIssuer, TokenVerifier};
use lib_core::model::store::{models::AdminForCreate, PrincipalRepository};
use lib_core::{create_pool, run_migrations, AppError, Config, DbPool};
use lib_utils::get_env_or;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::handlers;
use crate::middleware::{log_requests, require_auth, stamp_req, RequestStamp};
// endregion: --- Imports

// region: --- AppState
/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Config,
    pub issuer: TokenIssuer,
    pub verifier: TokenVerifier,
}

impl AppState {
    /// Build the state, deriving the token issuer and verifier from `config`.
    pub fn new(db: DbPool, config: Config) -> lib_core::Result<Self> {
        let ctx = SigningContext::new(&config.jwt_secret)?;
        let ttl = chrono::Duration::hours(config.jwt_expiration_hours);

        Ok(Self {
            db,
            issuer: TokenIssuer::new(ctx.clone(), ttl),
            verifier: TokenVerifier::new(ctx),
            config,
        })
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for TokenIssuer {
    fn from_ref(state: &AppState) -> Self {
        state.issuer.clone()
    }
}

impl FromRef<AppState> for TokenVerifier {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}
// endregion: --- AppState

// region: --- Server Configuration
/// Server configuration
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:5000")
    pub bind_address: String,
    /// Allowed CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `BIND_ADDRESS` and a comma-separated `ALLOWED_ORIGINS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_address = get_env_or("BIND_ADDRESS", &defaults.bind_address);
        let allowed_origins = match lib_utils::get_env("ALLOWED_ORIGINS") {
            Ok(list) => list
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect(),
            Err(_) => defaults.allowed_origins,
        };

        Self {
            bind_address,
            allowed_origins,
        }
    }
}
// endregion: --- Server Configuration

// region: --- Server Setup
/// Initialize and start the HTTP server
///
/// # Errors
///
/// This function will return an error if:
/// - Configuration loading or validation fails
/// - Database connection or migrations fail
/// - Default admin seeding fails
/// - Server binding fails
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_level = get_env_or("LOG_LEVEL", "info").to_lowercase();
    let filter = tracing_subscriber::EnvFilter::try_new(&log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    info!(" GALLERY BACKEND STARTING");
    info!(" Log level: {}", log_level);

    info!("Loading configuration...");
    let app_config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    app_config.validate().map_err(|e| anyhow::anyhow!(e))?;
    info!("Configuration: {:?}", app_config);

    // Ensure data directory exists for SQLite database
    if let Some(db_path) = app_config.database_url.strip_prefix("sqlite:") {
        let db_path = db_path.trim_start_matches("//");
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!("Created database directory: {:?}", parent);
            }
        }
    }

    info!("Connecting to database...");
    let pool = create_pool(&app_config.database_url).await?;

    info!(" Running database migrations");
    run_migrations(&pool).await?;
    info!(" Migrations complete");

    let state = AppState::new(pool, app_config)?;
    seed_default_admin(&state).await?;

    let app = create_router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(" SERVER READY: http://{}", config.bind_address);
    log_server_info();

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the default admin from `ADMIN_*` settings when no admin exists yet.
///
/// Returns `true` if an admin was created.
pub async fn seed_default_admin(state: &AppState) -> lib_core::Result<bool> {
    let Some(seed) = &state.config.admin_seed else {
        return Ok(false);
    };

    if PrincipalRepository::count_admins(&state.db).await? > 0 {
        return Ok(false);
    }

    let admin = PrincipalRepository::create_admin(
        &state.db,
        AdminForCreate {
            name: seed.name.clone(),
            email: lib_core::dto::normalize_email(&seed.email),
            password_hash: hash_password(&seed.password)?,
        },
    )
    .await
    .map_err(|e| {
        warn!("[SEED] Failed to create default admin: {}", e);
        AppError::from(e)
    })?;

    info!("[SEED] Default admin created (id: {})", admin.id);
    Ok(true)
}

/// Create the main application router with all routes
pub fn create_router(state: AppState, allowed_origins: &[String]) -> Router {
    use axum::http::{header, HeaderValue, Method};

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    info!("[ROUTE SETUP] Registering HTTP routes...");
    let public = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/register-corporate", post(handlers::auth::register_corporate))
        .route("/api/auth/register-artist", post(handlers::auth::register_artist))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/artist/login", post(handlers::auth::artist_login))
        .route("/api/auth/admin/login", post(handlers::auth::admin_login))
        .route("/api/artworks", get(handlers::artworks::list_artworks))
        .route("/api/artworks/{id}", get(handlers::artworks::get_artwork))
        .route("/api/exhibitions", get(handlers::exhibitions::list_exhibitions))
        .route("/api/exhibitions/{id}", get(handlers::exhibitions::get_exhibition))
        .route("/api/contact", post(handlers::contact::submit_contact))
        .route("/health", get(|| async { "OK" }));

    let protected = Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        // Artworks
        .route("/api/artworks", post(handlers::artworks::create_artwork))
        .route(
            "/api/artworks/{id}",
            put(handlers::artworks::update_artwork).delete(handlers::artworks::delete_artwork),
        )
        .route("/api/artist/artworks", get(handlers::artworks::my_artworks))
        // Exhibitions
        .route("/api/exhibitions", post(handlers::exhibitions::create_exhibition))
        .route(
            "/api/exhibitions/{id}",
            put(handlers::exhibitions::update_exhibition)
                .delete(handlers::exhibitions::delete_exhibition),
        )
        // Orders and bookings
        .route("/api/orders", post(handlers::orders::create_order))
        .route("/api/orders/mine", get(handlers::orders::my_orders))
        .route("/api/artist/orders", get(handlers::orders::artist_orders))
        .route("/api/admin/orders", get(handlers::orders::all_orders))
        .route("/api/admin/orders/{id}/payment", put(handlers::orders::set_order_payment))
        .route("/api/admin/tickets", get(handlers::orders::all_tickets))
        .route("/api/admin/tickets/{id}/payment", put(handlers::orders::set_ticket_payment))
        // Admin back office
        .route("/api/admin/contacts", get(handlers::contact::list_contacts))
        .route("/api/admin/contacts/{id}/status", put(handlers::contact::set_contact_status))
        .route("/api/admin/artists", get(handlers::artists::list_artists))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    public
        .merge(protected)
        .fallback(|| async {
            info!("[404 HANDLER] Unmatched route - returning 404");
            (axum::http::StatusCode::NOT_FOUND, "Route not found")
        })
        .with_state(state)
        // Outermost layers run first: the stamp must exist before logging and tracing read it
        .layer(from_fn(log_requests))
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    let request_id = request
                        .extensions()
                        .get::<RequestStamp>()
                        .map(|s| s.id.clone())
                        .unwrap_or_else(|| "unknown".to_string());
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        uri = %request.uri(),
                    )
                },
            ),
        )
        .layer(from_fn(stamp_req))
        .layer(cors)
}

/// Log server information
fn log_server_info() {
    info!(" AUTH:");
    info!("   • POST /api/auth/register | /register-corporate | /register-artist");
    info!("   • POST /api/auth/login | /artist/login | /admin/login");
    info!("   • GET  /api/auth/me");
    info!(" CATALOG:");
    info!("   • GET  /api/artworks, /api/exhibitions");
    info!(" ORDERS:");
    info!("   • POST /api/orders, GET /api/orders/mine");
    info!(" ADMIN:");
    info!("   • GET  /api/admin/orders | /tickets | /contacts | /artists");
    info!(" HEALTH:");
    info!("   • GET  /health");
}
// endregion: --- Server Setup
