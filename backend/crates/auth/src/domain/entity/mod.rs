pub mod auth_session;
pub mod credentials;
pub mod otp_device;
pub mod pending_auth;
pub mod user;
