//! Dashboard Use Case
//!
//! The applicant's own view: drafts they can still edit and the
//! submissions they have already made.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entity::department_profile::DepartmentProfile;
use crate::domain::repository::ProfileRepository;
use crate::error::ProfileResult;

/// Dashboard output
pub struct DashboardOutput {
    /// Editable drafts, newest first
    pub drafts: Vec<DepartmentProfile>,
    /// Submitted (non-draft) profiles, newest first
    pub submitted: Vec<DepartmentProfile>,
}

/// Dashboard use case
pub struct DashboardUseCase<P>
where
    P: ProfileRepository,
{
    profile_repo: Arc<P>,
}

impl<P> DashboardUseCase<P>
where
    P: ProfileRepository,
{
    pub fn new(profile_repo: Arc<P>) -> Self {
        Self { profile_repo }
    }

    pub async fn execute(&self, user_id: &Uuid) -> ProfileResult<DashboardOutput> {
        let profiles = self.profile_repo.list_for_user(user_id).await?;

        let (drafts, submitted) = profiles
            .into_iter()
            .partition(|profile| profile.is_draft());

        Ok(DashboardOutput { drafts, submitted })
    }
}
