//! Application Layer
//!
//! Use cases and application services.

pub mod admin_overview;
pub mod config;
pub mod dashboard;
pub mod delete_submission;
pub mod edit_submission;
pub mod review_submission;
pub mod submit_profile;

// Re-exports
pub use admin_overview::{AdminOverviewOutput, AdminOverviewUseCase};
pub use config::ProfilesConfig;
pub use dashboard::{DashboardOutput, DashboardUseCase};
pub use delete_submission::DeleteSubmissionUseCase;
pub use edit_submission::{EditSubmissionInput, EditSubmissionUseCase};
pub use review_submission::{ReviewSubmissionInput, ReviewSubmissionUseCase};
pub use submit_profile::{SubmitProfileInput, SubmitProfileOutput, SubmitProfileUseCase};
