//! Profiles Routers

use axum::{
    Router,
    routing::{get, post, put},
};
use platform::mailer::{AnyMailer, Mailer};
use std::sync::Arc;

use crate::application::config::ProfilesConfig;
use crate::infra::postgres::PgProfileRepository;
use crate::presentation::handlers::{self, ProfileRepo, ProfilesAppState};

/// Create the applicant-facing profiles router with PostgreSQL repository
pub fn profiles_router(
    repo: PgProfileRepository,
    mailer: AnyMailer,
    config: ProfilesConfig,
) -> Router {
    profiles_router_generic(repo, mailer, config)
}

/// Create the staff-facing admin router with PostgreSQL repository
pub fn admin_router(repo: PgProfileRepository, mailer: AnyMailer, config: ProfilesConfig) -> Router {
    admin_router_generic(repo, mailer, config)
}

/// Generic applicant-facing router
///
/// The submit and detail routes share one dynamic segment; the method
/// decides whether it names a department (POST) or an application ID
/// (GET).
pub fn profiles_router_generic<P, M>(repo: P, mailer: M, config: ProfilesConfig) -> Router
where
    P: ProfileRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let state = state(repo, mailer, config);

    Router::new()
        .route("/dashboard", get(handlers::dashboard::<P, M>))
        .route(
            "/{id}",
            post(handlers::submit_profile::<P, M>).get(handlers::profile_detail::<P, M>),
        )
        .with_state(state)
}

/// Generic staff-facing router
pub fn admin_router_generic<P, M>(repo: P, mailer: M, config: ProfilesConfig) -> Router
where
    P: ProfileRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let state = state(repo, mailer, config);

    Router::new()
        .route(
            "/submissions/{id}/action",
            post(handlers::review_submission::<P, M>),
        )
        .route(
            "/submissions/{id}",
            put(handlers::edit_submission::<P, M>)
                .delete(handlers::delete_submission::<P, M>),
        )
        .route("/overview", get(handlers::admin_overview::<P, M>))
        .with_state(state)
}

fn state<P, M>(repo: P, mailer: M, config: ProfilesConfig) -> ProfilesAppState<P, M>
where
    P: ProfileRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    ProfilesAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        config: Arc::new(config),
    }
}
