//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use platform::mailer::{AnyMailer, Mailer};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState, AuthRepo};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, mailer: AnyMailer, config: AuthConfig) -> Router {
    auth_router_generic(repo, mailer, config)
}

/// Create a generic Auth router for any repository/mailer implementation
pub fn auth_router_generic<R, M>(repo: R, mailer: M, config: AuthConfig) -> Router
where
    R: AuthRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    };

    Router::new()
        .route("/register", post(handlers::register::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .route("/staff/login", post(handlers::staff_login::<R, M>))
        .route("/otp/verify", post(handlers::otp_verify::<R, M>))
        .route("/logout", post(handlers::logout::<R, M>))
        .route("/status", get(handlers::session_status::<R, M>))
        .with_state(state)
}
