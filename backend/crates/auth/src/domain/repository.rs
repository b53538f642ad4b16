//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{
    auth_session::AuthSession, credentials::Credentials, otp_device::OtpDevice,
    pending_auth::PendingAuth, user::User,
};
use crate::domain::value_object::{email::Email, user_id::UserId, user_name::UserName};
use crate::error::AuthResult;
use uuid::Uuid;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Create a new user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find user by login email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if user name exists (canonical form)
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Check if email is already registered
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Update user
    async fn update(&self, user: &User) -> AuthResult<()>;
}

/// Credentials repository trait
#[trait_variant::make(CredentialsRepository: Send)]
pub trait LocalCredentialsRepository {
    /// Create credentials
    async fn create(&self, credentials: &Credentials) -> AuthResult<()>;

    /// Find credentials by user ID
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credentials>>;

    /// Update credentials
    async fn update(&self, credentials: &Credentials) -> AuthResult<()>;
}

/// OTP device repository trait
///
/// Device mutations are persisted immediately, one row at a time, so
/// concurrent requests observe updated counters.
#[trait_variant::make(OtpDeviceRepository: Send)]
pub trait LocalOtpDeviceRepository {
    /// Create a device (fails if the user already has one)
    async fn create(&self, device: &OtpDevice) -> AuthResult<()>;

    /// Find the device for a user
    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<OtpDevice>>;

    /// Persist updated counters
    async fn update(&self, device: &OtpDevice) -> AuthResult<()>;
}

/// Pending auth repository trait
#[trait_variant::make(PendingAuthRepository: Send)]
pub trait LocalPendingAuthRepository {
    /// Create a pending marker
    async fn create(&self, pending: &PendingAuth) -> AuthResult<()>;

    /// Find a marker by ID
    async fn find_by_id(&self, pending_id: Uuid) -> AuthResult<Option<PendingAuth>>;

    /// Delete a marker (consume on success, or discard when expired)
    async fn delete(&self, pending_id: Uuid) -> AuthResult<()>;

    /// Clean up expired markers
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    /// Create a new session
    async fn create(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find session by ID and verify fingerprint
    async fn find_by_id(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>>;

    /// Update session (e.g., last activity)
    async fn update(&self, session: &AuthSession) -> AuthResult<()>;

    /// Delete a session
    async fn delete(&self, session_id: Uuid) -> AuthResult<()>;

    /// Clean up expired sessions
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
