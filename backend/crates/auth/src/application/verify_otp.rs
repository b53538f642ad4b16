//! Verify OTP Use Case (code step)
//!
//! Second half of the two-step login. Requires a live pending sign-in
//! marker; verifies the submitted code against the user's device within
//! the skew window, doing the lockout bookkeeping on failure. On success
//! the marker is consumed and the authenticated session is established.

use std::sync::Arc;

use chrono::Utc;
use platform::client::ClientFingerprint;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{
    AuthSessionRepository, OtpDeviceRepository, PendingAuthRepository, UserRepository,
};
use crate::error::{AuthError, AuthResult};

/// Verify OTP input
pub struct VerifyOtpInput {
    /// Token from the pending sign-in cookie
    pub pending_token: String,
    /// Submitted verification code
    pub code: String,
}

/// Verify OTP output
pub struct VerifyOtpOutput {
    pub session_token: String,
    pub public_id: String,
    pub user_role: String,
}

/// Verify OTP use case
pub struct VerifyOtpUseCase<U, D, S>
where
    U: UserRepository,
    D: OtpDeviceRepository + PendingAuthRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    device_repo: Arc<D>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, D, S> VerifyOtpUseCase<U, D, S>
where
    U: UserRepository,
    D: OtpDeviceRepository + PendingAuthRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        device_repo: Arc<D>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            device_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: VerifyOtpInput,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<VerifyOtpOutput> {
        let now = Utc::now();

        let pending_id = token::verify(&input.pending_token, &self.config.session_secret)
            .ok_or(AuthError::SessionExpired)?;

        let pending = self
            .device_repo
            .find_by_id(pending_id)
            .await?
            .ok_or(AuthError::SessionExpired)?;

        if pending.is_expired(now) {
            self.device_repo.delete(pending_id).await?;
            return Err(AuthError::SessionExpired);
        }

        let user = self
            .user_repo
            .find_by_id(&pending.user_id)
            .await?
            .ok_or(AuthError::SessionExpired)?;

        if !user.can_login() {
            return Err(AuthError::AccountDisabled);
        }

        let mut device = self
            .device_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or(AuthError::DeviceMissing)?;

        if device.is_locked(now) {
            return Err(AuthError::AccountLocked);
        }

        let valid = device
            .secret
            .verify(&input.code, user.email.as_str())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        if !valid {
            device.record_failure(now);
            self.device_repo.update(&device).await?;
            return Err(AuthError::InvalidCode);
        }

        device.record_success(now);
        self.device_repo.update(&device).await?;

        // Consume the pending marker; the two-step flow is complete
        self.device_repo.delete(pending_id).await?;

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
            "Code verified, user authenticated"
        );

        Ok(VerifyOtpOutput {
            session_token,
            public_id: user.public_id.to_string(),
            user_role: user.user_role.code().to_string(),
        })
    }
}
