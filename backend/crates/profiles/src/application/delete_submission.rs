//! Delete Submission Use Case (staff)
//!
//! Removes a submission entirely, drafts included. Deletion is final;
//! the application ID is never reissued.

use std::sync::Arc;

use crate::domain::repository::ProfileRepository;
use crate::error::{ProfileError, ProfileResult};

/// Delete submission use case
pub struct DeleteSubmissionUseCase<P>
where
    P: ProfileRepository,
{
    profile_repo: Arc<P>,
}

impl<P> DeleteSubmissionUseCase<P>
where
    P: ProfileRepository,
{
    pub fn new(profile_repo: Arc<P>) -> Self {
        Self { profile_repo }
    }

    pub async fn execute(&self, application_id: &str) -> ProfileResult<()> {
        let profile = self
            .profile_repo
            .find_by_application_id(application_id)
            .await?
            .ok_or(ProfileError::NotFound)?;

        self.profile_repo.delete(&profile.profile_id).await?;

        tracing::info!(
            application_id = %application_id,
            department = %profile.department_name,
            "Submission deleted"
        );

        Ok(())
    }
}
