//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    auth_session::AuthSession, credentials::Credentials, otp_device::OtpDevice,
    pending_auth::PendingAuth, user::User,
};
pub use repository::{
    AuthSessionRepository, CredentialsRepository, OtpDeviceRepository, PendingAuthRepository,
    UserRepository,
};
