//! Staff Sign In Use Case
//!
//! Single-step privileged entry point for staff and admin accounts.
//! Staff never go through code dispatch; a correct password establishes
//! the session directly. Applicant accounts are refused with the same
//! error as a wrong password, so the endpoint reveals nothing about
//! which emails belong to staff.

use std::sync::Arc;

use platform::client::ClientFingerprint;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AuthSessionRepository, CredentialsRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Staff sign in input
pub struct StaffSignInInput {
    pub email: String,
    pub password: String,
}

/// Staff sign in output
pub struct StaffSignInOutput {
    pub session_token: String,
    pub public_id: String,
    pub user_role: String,
}

/// Staff sign in use case
pub struct StaffSignInUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialsRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    credentials_repo: Arc<C>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, C, S> StaffSignInUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialsRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        credentials_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            credentials_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: StaffSignInInput,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<StaffSignInOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Non-staff accounts get the generic refusal, never a hint that
        // this entry point is role-gated
        if !user.user_role.is_staff_or_higher() {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.can_login() {
            return Err(AuthError::AccountDisabled);
        }

        let credentials = self
            .credentials_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or(AuthError::Internal("Credentials not found".to_string()))?;

        let raw_password =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        if !credentials
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        let mut user = user;
        user.record_login();
        self.user_repo.update(&user).await?;

        let session = AuthSession::new(
            user.user_id,
            user.public_id.clone(),
            user.user_role,
            user.email.as_str().to_string(),
            fingerprint.hash_vec(),
            fingerprint.ip_string(),
            fingerprint.user_agent.clone(),
            self.config.session_ttl_chrono(),
        );
        self.session_repo.create(&session).await?;

        let session_token = token::sign(session.session_id, &self.config.session_secret);

        tracing::info!(
            public_id = %user.public_id,
            session_id = %session.session_id,
            "Staff signed in"
        );

        Ok(StaffSignInOutput {
            session_token,
            public_id: user.public_id.to_string(),
            user_role: user.user_role.code().to_string(),
        })
    }
}
