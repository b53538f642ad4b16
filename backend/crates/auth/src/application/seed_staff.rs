//! Seed Staff Use Case
//!
//! Creates the first staff account from startup configuration, since
//! there is no self-service path to a staff role. Idempotent: when an
//! account with the email already exists, nothing is changed.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::{credentials::Credentials, user::User};
use crate::domain::repository::{CredentialsRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Seed staff input
pub struct SeedStaffInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Seed staff use case
pub struct SeedStaffUseCase<U, C>
where
    U: UserRepository,
    C: CredentialsRepository,
{
    user_repo: Arc<U>,
    credentials_repo: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> SeedStaffUseCase<U, C>
where
    U: UserRepository,
    C: CredentialsRepository,
{
    pub fn new(user_repo: Arc<U>, credentials_repo: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            credentials_repo,
            config,
        }
    }

    /// Returns the new account's public ID, or None when the email was
    /// already registered
    pub async fn execute(&self, input: SeedStaffInput) -> AuthResult<Option<String>> {
        let user_name =
            UserName::new(&input.user_name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(&input.email).map_err(|e| AuthError::Validation(e.to_string()))?;

        if self.user_repo.exists_by_email(&email).await? {
            tracing::debug!("Staff seed email already registered, leaving account untouched");
            return Ok(None);
        }
        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = UserPassword::hash(&raw_password, self.config.pepper())?;

        let user = User::new_staff(user_name, email);
        let credentials = Credentials::new(user.user_id, password_hash);

        self.user_repo.create(&user).await?;
        self.credentials_repo.create(&credentials).await?;

        tracing::info!(
            public_id = %user.public_id,
            user_name = %user.user_name,
            "Staff account seeded"
        );

        Ok(Some(user.public_id.to_string()))
    }
}
