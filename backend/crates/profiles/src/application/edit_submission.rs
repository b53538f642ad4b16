//! Edit Submission Use Case (staff)
//!
//! Replaces the form contents of an existing submission on the
//! applicant's behalf. The lifecycle status and application ID are
//! untouched; review actions stay separate.

use std::sync::Arc;

use crate::domain::entity::department_profile::{DepartmentProfile, ProfileForm};
use crate::domain::repository::ProfileRepository;
use crate::error::{ProfileError, ProfileResult};

/// Edit submission input
pub struct EditSubmissionInput {
    pub application_id: String,
    pub form: ProfileForm,
}

/// Edit submission use case
pub struct EditSubmissionUseCase<P>
where
    P: ProfileRepository,
{
    profile_repo: Arc<P>,
}

impl<P> EditSubmissionUseCase<P>
where
    P: ProfileRepository,
{
    pub fn new(profile_repo: Arc<P>) -> Self {
        Self { profile_repo }
    }

    pub async fn execute(&self, input: EditSubmissionInput) -> ProfileResult<DepartmentProfile> {
        input.form.validate()?;

        let mut profile = self
            .profile_repo
            .find_by_application_id(&input.application_id)
            .await?
            .ok_or(ProfileError::NotFound)?;

        profile.update_form(input.form);
        self.profile_repo.update(&profile).await?;

        tracing::info!(
            application_id = %input.application_id,
            "Submission edited"
        );

        Ok(profile)
    }
}
