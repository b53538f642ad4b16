//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use auth::application::{SeedStaffInput, SeedStaffUseCase};
use auth::middleware::{AuthMiddlewareState, require_auth_session};
use auth::{AuthConfig, PgAuthRepository, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use platform::mailer::{AnyMailer, SmtpConfig, SmtpMailer, TracingMailer};
use profiles::{PgProfileRepository, ProfilesConfig, admin_router, profiles_router};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
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
                .unwrap_or_else(|_| "api=info,auth=info,profiles=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: remove expired sessions and pending sign-ins
    // Errors here should not prevent server startup
    let auth_repo = PgAuthRepository::new(pool.clone());
    match auth_repo.cleanup_expired_state().await {
        Ok(deleted) => {
            tracing::info!(rows_deleted = deleted, "Auth state cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Auth state cleanup failed, continuing anyway");
        }
    }

    // Auth configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        let secret_bytes = platform::crypto::from_base64(&secret_b64)?;
        anyhow::ensure!(
            secret_bytes.len() == 32,
            "SESSION_SECRET must decode to 32 bytes"
        );
        let mut secret = [0u8; 32];
        secret.copy_from_slice(&secret_bytes);
        AuthConfig {
            session_secret: secret,
            ..AuthConfig::default()
        }
    };

    // First staff account from the environment; staff roles have no
    // self-service registration path
    if let (Ok(email), Ok(password)) = (env::var("STAFF_EMAIL"), env::var("STAFF_PASSWORD")) {
        let repo = Arc::new(auth_repo.clone());
        let seed = SeedStaffUseCase::new(repo.clone(), repo, Arc::new(auth_config.clone()));
        let input = SeedStaffInput {
            user_name: env::var("STAFF_NAME").unwrap_or_else(|_| "Studio Staff".to_string()),
            email,
            password,
        };
        match seed.execute(input).await {
            Ok(Some(public_id)) => {
                tracing::info!(%public_id, "Seeded staff account");
            }
            Ok(None) => {
                tracing::debug!("Staff account already present");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Staff account seeding failed, continuing anyway");
            }
        }
    }

    // Mail transport: real SMTP when configured, tracing-only otherwise
    let mailer = match smtp_config_from_env() {
        Some(config) => {
            tracing::info!(host = %config.host, "Using SMTP mail transport");
            AnyMailer::Smtp(SmtpMailer::new(&config)?)
        }
        None => {
            tracing::info!("SMTP not configured, mail will be logged only");
            AnyMailer::Tracing(TracingMailer)
        }
    };

    let profile_repo = PgProfileRepository::new(pool.clone());
    let profiles_config = ProfilesConfig::default();

    // Protected routes require a valid session cookie
    let auth_middleware_state = AuthMiddlewareState {
        repo: Arc::new(auth_repo.clone()),
        config: Arc::new(auth_config.clone()),
    };
    let require_session = axum::middleware::from_fn_with_state(
        auth_middleware_state,
        require_auth_session::<PgAuthRepository>,
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
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
        .nest(
            "/api/auth",
            auth_router(auth_repo, mailer.clone(), auth_config),
        )
        .nest(
            "/api/profiles",
            profiles_router(
                profile_repo.clone(),
                mailer.clone(),
                profiles_config.clone(),
            )
            .layer(require_session.clone()),
        )
        .nest(
            "/api/admin",
            admin_router(profile_repo, mailer, profiles_config).layer(require_session),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 31113));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// SMTP settings from the environment; None when SMTP_HOST is unset
fn smtp_config_from_env() -> Option<SmtpConfig> {
    let host = env::var("SMTP_HOST").ok()?;

    Some(SmtpConfig {
        host,
        port: env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587),
        username: env::var("SMTP_USERNAME").unwrap_or_default(),
        password: env::var("SMTP_PASSWORD").unwrap_or_default(),
        from: env::var("SMTP_FROM")
            .unwrap_or_else(|_| "24 Cine Crafts <noreply@24cinecrafts.example>".to_string()),
    })
}
