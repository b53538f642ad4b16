//! Sign In Use Case (password step)
//!
//! First half of the two-step login. On a successful password check the
//! user's OTP device is provisioned if absent, a verification code is
//! dispatched by email, and a pending sign-in marker is created. The
//! session itself is only established after the code verifies.

use std::sync::Arc;

use chrono::Utc;
use platform::mailer::Mailer;

use crate::application::config::AuthConfig;
use crate::application::token;
use crate::domain::entity::{otp_device::OtpDevice, pending_auth::PendingAuth};
use crate::domain::repository::{
    CredentialsRepository, OtpDeviceRepository, PendingAuthRepository, UserRepository,
};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Re-export ClientFingerprint from platform
pub use platform::client::ClientFingerprint;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
///
/// The pending token goes into a short-lived cookie; the caller is now
/// waiting for the emailed code.
pub struct SignInOutput {
    pub pending_token: String,
    pub public_id: String,
}

/// Sign in use case
pub struct SignInUseCase<U, C, D, M>
where
    U: UserRepository,
    C: CredentialsRepository,
    D: OtpDeviceRepository + PendingAuthRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    credentials_repo: Arc<C>,
    device_repo: Arc<D>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, C, D, M> SignInUseCase<U, C, D, M>
where
    U: UserRepository,
    C: CredentialsRepository,
    D: OtpDeviceRepository + PendingAuthRepository,
    M: Mailer,
{
    pub fn new(
        user_repo: Arc<U>,
        credentials_repo: Arc<C>,
        device_repo: Arc<D>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            credentials_repo,
            device_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let now = Utc::now();

        // Unknown email and wrong password report identically, so the
        // response never reveals which accounts exist
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // Staff never reach code dispatch; they use the admin entry point
        if user.user_role.is_staff_or_higher() {
            return Err(AuthError::StaffRedirect);
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

        // First-time provisioning is implicit and silent
        let mut device = match self.device_repo.find_by_user_id(&user.user_id).await? {
            Some(device) => device,
            None => {
                let device = OtpDevice::provision(user.user_id, now);
                OtpDeviceRepository::create(self.device_repo.as_ref(), &device).await?;
                tracing::info!(public_id = %user.public_id, "Provisioned OTP device");
                device
            }
        };

        if !device.may_dispatch(&self.config.dispatch_limit, now) {
            tracing::warn!(
                public_id = %user.public_id,
                retry_after_secs = device.dispatch_retry_after_secs(&self.config.dispatch_limit, now),
                "Code dispatch limit reached"
            );
            return Err(AuthError::RateLimited);
        }

        let code = device
            .secret
            .current_code(user.email.as_str())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // Dispatch must succeed before any pending state is created, so
        // a user is never left waiting for a code that was never sent
        self.mailer
            .send(
                user.email.as_str(),
                "Your 24 Cine Crafts verification code",
                &format!(
                    "Your verification code is {code}. It is valid for a few minutes.\n\n\
                     If you did not try to sign in, you can ignore this email."
                ),
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Verification code dispatch failed");
                AuthError::DispatchFailed
            })?;

        device.record_dispatch(&self.config.dispatch_limit, now);
        self.device_repo.update(&device).await?;

        let pending = PendingAuth::new(user.user_id, self.config.pending_ttl_chrono());
        PendingAuthRepository::create(self.device_repo.as_ref(), &pending).await?;

        let pending_token = token::sign(pending.pending_id, &self.config.session_secret);

        tracing::info!(
            public_id = %user.public_id,
            send_count_hour = device.send_count_hour,
            "Password verified, code dispatched"
        );

        Ok(SignInOutput {
            pending_token,
            public_id: user.public_id.to_string(),
        })
    }
}
