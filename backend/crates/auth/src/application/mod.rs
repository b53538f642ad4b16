//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod seed_staff;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;
pub mod staff_sign_in;
pub mod token;
pub mod verify_otp;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use seed_staff::{SeedStaffInput, SeedStaffUseCase};
pub use sign_in::{ClientFingerprint, SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use staff_sign_in::{StaffSignInInput, StaffSignInOutput, StaffSignInUseCase};
pub use verify_otp::{VerifyOtpInput, VerifyOtpOutput, VerifyOtpUseCase};
