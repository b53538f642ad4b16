//! HTTP Handlers
//!
//! All routes run behind the auth middleware, which inserts an
//! `AuthContext` extension. Staff routes additionally check the role.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use auth::middleware::AuthContext;
use axum::Extension;
use platform::mailer::Mailer;

use crate::application::{
    AdminOverviewUseCase, DashboardUseCase, DeleteSubmissionUseCase, EditSubmissionInput,
    EditSubmissionUseCase, ReviewSubmissionInput, ReviewSubmissionUseCase, SubmitProfileInput,
    SubmitProfileUseCase,
};
use crate::application::config::ProfilesConfig;
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::approval_status::ReviewAction;
use crate::error::{ProfileError, ProfileResult};
use crate::presentation::dto::{
    AdminOverviewResponse, DashboardResponse, DepartmentCountDto, ProfileDetailResponse,
    ProfileFormRequest, ProfileSummary, ReviewRequest, ReviewResponse, StatsDto,
    SubmitProfileResponse,
};

/// Repository bound shared by all profile handlers
pub trait ProfileRepo: ProfileRepository + Clone + Send + Sync + 'static {}

impl<T> ProfileRepo for T where T: ProfileRepository + Clone + Send + Sync + 'static {}

/// Shared state for profile handlers
#[derive(Clone)]
pub struct ProfilesAppState<P, M>
where
    P: ProfileRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<P>,
    pub mailer: Arc<M>,
    pub config: Arc<ProfilesConfig>,
}

// ============================================================================
// Submit / Draft
// ============================================================================

/// POST /api/profiles/{department}
pub async fn submit_profile<P, M>(
    State(state): State<ProfilesAppState<P, M>>,
    Extension(ctx): Extension<AuthContext>,
    Path(department): Path<String>,
    Json(req): Json<ProfileFormRequest>,
) -> ProfileResult<impl IntoResponse>
where
    P: ProfileRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let as_draft = req.as_draft;
    let use_case = SubmitProfileUseCase::new(state.repo.clone(), state.mailer.clone());

    let output = use_case
        .execute(SubmitProfileInput {
            user_id: ctx.user_id,
            email: ctx.email,
            department,
            form: req.into_form(),
            as_draft,
        })
        .await?;

    let status = if as_draft {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };

    Ok((
        status,
        Json(SubmitProfileResponse {
            application_id: output.application_id,
            status: output.status,
        }),
    ))
}

// ============================================================================
// Dashboard / Detail
// ============================================================================

/// GET /api/profiles/dashboard
pub async fn dashboard<P, M>(
    State(state): State<ProfilesAppState<P, M>>,
    Extension(ctx): Extension<AuthContext>,
) -> ProfileResult<Json<DashboardResponse>>
where
    P: ProfileRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = DashboardUseCase::new(state.repo.clone());
    let output = use_case.execute(&ctx.user_id).await?;

    Ok(Json(DashboardResponse {
        drafts: output.drafts.iter().map(ProfileSummary::from_profile).collect(),
        submitted: output
            .submitted
            .iter()
            .map(ProfileSummary::from_profile)
            .collect(),
    }))
}

/// GET /api/profiles/{application_id}
///
/// Visible to the owner and to staff; everyone else sees a 404 rather
/// than a confirmation that the ID exists.
pub async fn profile_detail<P, M>(
    State(state): State<ProfilesAppState<P, M>>,
    Extension(ctx): Extension<AuthContext>,
    Path(application_id): Path<String>,
) -> ProfileResult<Json<ProfileDetailResponse>>
where
    P: ProfileRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let profile = state
        .repo
        .find_by_application_id(&application_id)
        .await?
        .ok_or(ProfileError::NotFound)?;

    if !profile.is_owned_by(&ctx.user_id) && !ctx.is_staff() {
        return Err(ProfileError::NotFound);
    }

    Ok(Json(ProfileDetailResponse::from_profile(profile)))
}

// ============================================================================
// Admin
// ============================================================================

/// POST /api/admin/submissions/{application_id}/action
pub async fn review_submission<P, M>(
    State(state): State<ProfilesAppState<P, M>>,
    Extension(ctx): Extension<AuthContext>,
    Path(application_id): Path<String>,
    Json(req): Json<ReviewRequest>,
) -> ProfileResult<Json<ReviewResponse>>
where
    P: ProfileRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    require_staff(&ctx)?;

    let action = ReviewAction::parse(&req.action)?;
    let use_case = ReviewSubmissionUseCase::new(state.repo.clone(), state.mailer.clone());

    let status = use_case
        .execute(ReviewSubmissionInput {
            application_id: application_id.clone(),
            action,
        })
        .await?;

    Ok(Json(ReviewResponse {
        application_id,
        status,
    }))
}

/// PUT /api/admin/submissions/{application_id}
///
/// Replaces the form contents on the applicant's behalf; status and
/// application ID are untouched.
pub async fn edit_submission<P, M>(
    State(state): State<ProfilesAppState<P, M>>,
    Extension(ctx): Extension<AuthContext>,
    Path(application_id): Path<String>,
    Json(req): Json<ProfileFormRequest>,
) -> ProfileResult<Json<ProfileDetailResponse>>
where
    P: ProfileRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    require_staff(&ctx)?;

    let use_case = EditSubmissionUseCase::new(state.repo.clone());
    let profile = use_case
        .execute(EditSubmissionInput {
            application_id,
            form: req.into_form(),
        })
        .await?;

    Ok(Json(ProfileDetailResponse::from_profile(profile)))
}

/// DELETE /api/admin/submissions/{application_id}
pub async fn delete_submission<P, M>(
    State(state): State<ProfilesAppState<P, M>>,
    Extension(ctx): Extension<AuthContext>,
    Path(application_id): Path<String>,
) -> ProfileResult<StatusCode>
where
    P: ProfileRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    require_staff(&ctx)?;

    let use_case = DeleteSubmissionUseCase::new(state.repo.clone());
    use_case.execute(&application_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/overview
pub async fn admin_overview<P, M>(
    State(state): State<ProfilesAppState<P, M>>,
    Extension(ctx): Extension<AuthContext>,
) -> ProfileResult<Json<AdminOverviewResponse>>
where
    P: ProfileRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    require_staff(&ctx)?;

    let use_case = AdminOverviewUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute().await?;

    Ok(Json(AdminOverviewResponse {
        stats: StatsDto::from_stats(output.stats),
        recent: output.recent.iter().map(ProfileSummary::from_profile).collect(),
        by_department: output
            .by_department
            .into_iter()
            .map(DepartmentCountDto::from_count)
            .collect(),
    }))
}

fn require_staff(ctx: &AuthContext) -> ProfileResult<()> {
    if !ctx.is_staff() {
        return Err(ProfileError::Forbidden);
    }
    Ok(())
}
