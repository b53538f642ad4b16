//! Submit Profile Use Case
//!
//! Saves a draft or submits a department profile. A submit promotes the
//! user's existing draft for that department when one exists, otherwise
//! it creates the profile directly in Pending. At most one live
//! submission (Pending or Approved) may exist per user and department.

use std::sync::Arc;

use platform::mailer::Mailer;
use uuid::Uuid;

use crate::domain::entity::department_profile::{DepartmentProfile, ProfileForm};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::{approval_status::ApprovalStatus, department_name::DepartmentName};
use crate::error::{ProfileError, ProfileResult};

/// Submit profile input
pub struct SubmitProfileInput {
    pub user_id: Uuid,
    pub email: String,
    pub department: String,
    pub form: ProfileForm,
    /// Save as draft instead of submitting
    pub as_draft: bool,
}

/// Submit profile output
pub struct SubmitProfileOutput {
    /// Assigned application ID
    pub application_id: String,
    /// Resulting status code string
    pub status: String,
}

/// Submit profile use case
pub struct SubmitProfileUseCase<P, M>
where
    P: ProfileRepository,
    M: Mailer,
{
    profile_repo: Arc<P>,
    mailer: Arc<M>,
}

impl<P, M> SubmitProfileUseCase<P, M>
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

    pub async fn execute(&self, input: SubmitProfileInput) -> ProfileResult<SubmitProfileOutput> {
        let department = DepartmentName::new(&input.department)?;
        input.form.validate()?;

        let draft = self
            .profile_repo
            .find_draft(&input.user_id, &department)
            .await?;

        let profile = if input.as_draft {
            self.save_draft(draft, &input, department).await?
        } else {
            self.submit(draft, &input, department).await?
        };

        let application_id = profile
            .application_id
            .clone()
            .ok_or_else(|| ProfileError::Internal("Application ID not assigned".to_string()))?;

        if !profile.is_draft() {
            self.send_confirmation(&profile, &application_id).await;
        }

        Ok(SubmitProfileOutput {
            application_id,
            status: profile.approval_status.code().to_string(),
        })
    }

    /// Draft save reuses the latest existing draft for the department
    async fn save_draft(
        &self,
        draft: Option<DepartmentProfile>,
        input: &SubmitProfileInput,
        department: DepartmentName,
    ) -> ProfileResult<DepartmentProfile> {
        match draft {
            Some(mut existing) => {
                existing.update_form(input.form.clone());
                self.profile_repo.update(&existing).await?;
                tracing::debug!(
                    application_id = ?existing.application_id,
                    department = %existing.department_name,
                    "Draft updated"
                );
                Ok(existing)
            }
            None => {
                let mut profile = DepartmentProfile::new(
                    input.user_id,
                    department,
                    input.email.clone(),
                    input.form.clone(),
                    ApprovalStatus::Draft,
                );
                profile.application_id = Some(self.profile_repo.create(&profile).await?);
                tracing::info!(
                    application_id = ?profile.application_id,
                    department = %profile.department_name,
                    "Draft created"
                );
                Ok(profile)
            }
        }
    }

    /// Submit promotes the draft if one exists, enforcing at most one
    /// live submission per user and department
    async fn submit(
        &self,
        draft: Option<DepartmentProfile>,
        input: &SubmitProfileInput,
        department: DepartmentName,
    ) -> ProfileResult<DepartmentProfile> {
        let exclude = draft.as_ref().map(|d| d.profile_id);
        if self
            .profile_repo
            .exists_live_submission(&input.user_id, &department, exclude.as_ref())
            .await?
        {
            return Err(ProfileError::SubmissionExists);
        }

        match draft {
            Some(mut existing) => {
                existing.update_form(input.form.clone());
                existing.submit();
                self.profile_repo.update(&existing).await?;
                tracing::info!(
                    application_id = ?existing.application_id,
                    department = %existing.department_name,
                    "Draft submitted"
                );
                Ok(existing)
            }
            None => {
                let mut profile = DepartmentProfile::new(
                    input.user_id,
                    department,
                    input.email.clone(),
                    input.form.clone(),
                    ApprovalStatus::Pending,
                );
                profile.application_id = Some(self.profile_repo.create(&profile).await?);
                tracing::info!(
                    application_id = ?profile.application_id,
                    department = %profile.department_name,
                    "Profile submitted"
                );
                Ok(profile)
            }
        }
    }

    /// Confirmation email failures never fail the submission
    async fn send_confirmation(&self, profile: &DepartmentProfile, application_id: &str) {
        let result = self
            .mailer
            .send(
                &profile.email,
                "Your 24 Cine Crafts application was received",
                &format!(
                    "Hi {},\n\nYour application to the {} department was received.\n\
                     Your application ID is {application_id}. We will be in touch \
                     once it has been reviewed.",
                    profile.form.full_name, profile.department_name
                ),
            )
            .await;

        if let Err(e) = result {
            tracing::warn!(
                error = %e,
                application_id = %application_id,
                "Submission confirmation email failed"
            );
        }
    }
}
