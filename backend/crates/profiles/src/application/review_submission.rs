//! Review Submission Use Case (staff)
//!
//! Applies a review action to a submitted profile and notifies the
//! applicant of the outcome. Notification failures never fail the
//! review itself.

use std::sync::Arc;

use platform::mailer::Mailer;

use crate::domain::entity::department_profile::DepartmentProfile;
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::approval_status::{ApprovalStatus, ReviewAction};
use crate::error::{ProfileError, ProfileResult};

/// Review submission input
pub struct ReviewSubmissionInput {
    pub application_id: String,
    pub action: ReviewAction,
}

/// Review submission use case
pub struct ReviewSubmissionUseCase<P, M>
where
    P: ProfileRepository,
    M: Mailer,
{
    profile_repo: Arc<P>,
    mailer: Arc<M>,
}

impl<P, M> ReviewSubmissionUseCase<P, M>
where
    P: ProfileRepository,
    M: Mailer,
{
    pub fn new(profile_repo: Arc<P>, mailer: Arc<M>) -> Self {
        Self {
            profile_repo,
            mailer,
        }
    }

    pub async fn execute(&self, input: ReviewSubmissionInput) -> ProfileResult<String> {
        let mut profile = self
            .profile_repo
            .find_by_application_id(&input.application_id)
            .await?
            .ok_or(ProfileError::NotFound)?;

        profile.apply_review(input.action)?;
        self.profile_repo.update(&profile).await?;

        tracing::info!(
            application_id = %input.application_id,
            status = %profile.approval_status,
            "Submission reviewed"
        );

        self.send_notification(&profile).await;

        Ok(profile.approval_status.code().to_string())
    }

    async fn send_notification(&self, profile: &DepartmentProfile) {
        let application_id = profile.application_id.as_deref().unwrap_or("");

        let (subject, outcome) = match profile.approval_status {
            ApprovalStatus::Approved => (
                "Your 24 Cine Crafts application was approved",
                "has been approved. Our team will contact you with next steps.",
            ),
            ApprovalStatus::Rejected => (
                "Update on your 24 Cine Crafts application",
                "was not selected this time. You are welcome to apply again later.",
            ),
            ApprovalStatus::Inactive => (
                "Your 24 Cine Crafts application is on hold",
                "has been deactivated. Contact us if you believe this is a mistake.",
            ),
            _ => return,
        };

        let result = self
            .mailer
            .send(
                &profile.email,
                subject,
                &format!(
                    "Hi {},\n\nYour application {application_id} to the {} department {outcome}",
                    profile.form.full_name, profile.department_name
                ),
            )
            .await;

        if let Err(e) = result {
            tracing::warn!(
                error = %e,
                application_id = %application_id,
                "Review notification email failed"
            );
        }
    }
}
