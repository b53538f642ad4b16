//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::client::{extract_client_ip, extract_fingerprint};
use platform::cookie::CookieConfig;
use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
    StaffSignInInput, StaffSignInUseCase, VerifyOtpInput, VerifyOtpUseCase,
};
use crate::domain::repository::{
    AuthSessionRepository, CredentialsRepository, OtpDeviceRepository, PendingAuthRepository,
    UserRepository,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, OtpVerifyRequest, OtpVerifyResponse, RegisterRequest,
    RegisterResponse, SessionStatusResponse, StaffLoginResponse,
};

/// Repository bound shared by all auth handlers
pub trait AuthRepo:
    UserRepository
    + CredentialsRepository
    + OtpDeviceRepository
    + PendingAuthRepository
    + AuthSessionRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AuthRepo for T where
    T: UserRepository
        + CredentialsRepository
        + OtpDeviceRepository
        + PendingAuthRepository
        + AuthSessionRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: AuthRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<Json<RegisterResponse>>
where
    R: AuthRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SignUpInput {
        user_name: req.user_name,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(RegisterResponse {
        public_id: output.public_id,
    }))
}

// ============================================================================
// Login (password step)
// ============================================================================

/// POST /api/auth/login
///
/// On success, a verification code has been emailed and the pending
/// cookie is set. The session cookie is only set by /otp/verify.
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    let cookie = build_cookie(
        &state.config,
        &state.config.pending_cookie_name,
        &output.pending_token,
        state.config.pending_ttl.as_secs(),
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            public_id: output.public_id,
            code_sent: true,
        }),
    ))
}

// ============================================================================
// Staff login (single step)
// ============================================================================

/// POST /api/auth/staff/login
///
/// Privileged entry point: staff accounts skip code dispatch entirely
/// and get their session cookie on a correct password.
pub async fn staff_login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let use_case = StaffSignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(
            StaffSignInInput {
                email: req.email,
                password: req.password,
            },
            fingerprint,
        )
        .await?;

    let session_cookie = build_cookie(
        &state.config,
        &state.config.session_cookie_name,
        &output.session_token,
        state.config.session_ttl.as_secs(),
    );

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie)],
        Json(StaffLoginResponse {
            public_id: output.public_id,
            user_role: output.user_role,
        }),
    ))
}

// ============================================================================
// OTP Verify (code step)
// ============================================================================

/// POST /api/auth/otp/verify
pub async fn otp_verify<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
    Json(req): Json<OtpVerifyRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let pending_token =
        platform::cookie::extract_cookie(&headers, &state.config.pending_cookie_name)
            .ok_or(AuthError::SessionExpired)?;

    let use_case = VerifyOtpUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = VerifyOtpInput {
        pending_token,
        code: req.code,
    };

    let output = use_case.execute(input, fingerprint).await?;

    let session_cookie = build_cookie(
        &state.config,
        &state.config.session_cookie_name,
        &output.session_token,
        state.config.session_ttl.as_secs(),
    );
    let clear_pending = build_clear_cookie(&state.config, &state.config.pending_cookie_name);

    Ok((
        StatusCode::OK,
        [
            (header::SET_COOKIE, session_cookie),
            (header::SET_COOKIE, clear_pending),
        ],
        Json(OtpVerifyResponse {
            public_id: output.public_id,
            user_role: output.user_role,
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: AuthRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // Ignore errors - just clear the cookie
        let _ = use_case.execute(&token).await;
    }

    let cookie = build_clear_cookie(&state.config, &state.config.session_cookie_name);

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    axum::extract::ConnectInfo(addr): axum::extract::ConnectInfo<std::net::SocketAddr>,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: AuthRepo,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let client_ip = extract_client_ip(&headers, Some(addr.ip()));
    let fingerprint = extract_fingerprint(&headers, client_ip)?;

    let token = platform::cookie::extract_cookie(&headers, &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    let session_info = if let Some(token) = token {
        use_case.execute(&token, &fingerprint.hash).await.ok()
    } else {
        None
    };

    match session_info {
        Some(info) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            public_id: Some(info.public_id),
            user_role: Some(info.user_role),
            expires_at_ms: Some(info.expires_at_ms),
        })),
        None => Ok(Json(SessionStatusResponse {
            authenticated: false,
            public_id: None,
            user_role: None,
            expires_at_ms: None,
        })),
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn cookie_config(config: &AuthConfig, name: &str, max_age: Option<i64>) -> CookieConfig {
    CookieConfig {
        name: name.to_string(),
        secure: config.cookie_secure,
        http_only: true,
        same_site: config.cookie_same_site,
        path: "/".to_string(),
        max_age_secs: max_age,
    }
}

fn build_cookie(config: &AuthConfig, name: &str, token: &str, max_age: u64) -> String {
    cookie_config(config, name, Some(max_age as i64)).build_set_cookie(token)
}

fn build_clear_cookie(config: &AuthConfig, name: &str) -> String {
    cookie_config(config, name, None).build_delete_cookie()
}
