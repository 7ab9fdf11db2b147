//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::{
    AuthConfig, InMemoryUserRepository, PgUserRepository, RouteGuardConfig, RouteGuardState,
};
use axum::{
    Router, http,
    http::{Method, header},
    middleware::from_fn_with_state,
};
use base64::Engine;
use base64::engine::general_purpose;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Auth configuration: the signing secret and token lifetime come from
    // the environment, never from literals
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        let secret_b64 = env::var("AUTH_TOKEN_SECRET")
            .expect("AUTH_TOKEN_SECRET must be set in production");
        let token_secret = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        AuthConfig {
            token_secret,
            ..AuthConfig::default()
        }
    };

    let auth_config = match env::var("AUTH_TOKEN_TTL_MINUTES") {
        Ok(raw) => {
            let minutes: u64 = raw.parse()?;
            AuthConfig {
                token_ttl: Duration::from_secs(minutes * 60),
                ..auth_config
            }
        }
        Err(_) => auth_config,
    };

    tracing::info!(
        token_ttl_secs = auth_config.token_ttl_secs(),
        "Auth configured"
    );

    // Credential store: PostgreSQL when configured, otherwise an in-memory
    // store that resets on every process restart
    let users = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations").run(&pool).await?;

            tracing::info!("Migrations completed");

            auth::user_router(PgUserRepository::new(pool), auth_config.clone())
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using process-lifetime in-memory store");
            auth::user_router_generic(InMemoryUserRepository::new(), auth_config.clone())
        }
    };

    // Route guard over the whole navigation surface
    let guard_state = RouteGuardState {
        guard: Arc::new(RouteGuardConfig::default()),
        auth: Arc::new(auth_config),
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/users", users)
        .layer(from_fn_with_state(guard_state, auth::route_guard))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 8080));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
