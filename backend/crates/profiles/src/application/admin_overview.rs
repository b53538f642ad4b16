//! Admin Overview Use Case (staff)
//!
//! Aggregated recruitment view: counts, the most recent submissions and
//! a per-department breakdown.

use std::sync::Arc;

use crate::application::config::ProfilesConfig;
use crate::domain::entity::department_profile::DepartmentProfile;
use crate::domain::repository::{DepartmentCount, ProfileRepository, ProfileStats};
use crate::error::ProfileResult;

/// Admin overview output
pub struct AdminOverviewOutput {
    pub stats: ProfileStats,
    pub recent: Vec<DepartmentProfile>,
    pub by_department: Vec<DepartmentCount>,
}

/// Admin overview use case
pub struct AdminOverviewUseCase<P>
where
    P: ProfileRepository,
{
    profile_repo: Arc<P>,
    config: Arc<ProfilesConfig>,
}

impl<P> AdminOverviewUseCase<P>
where
    P: ProfileRepository,
{
    pub fn new(profile_repo: Arc<P>, config: Arc<ProfilesConfig>) -> Self {
        Self {
            profile_repo,
            config,
        }
    }

    pub async fn execute(&self) -> ProfileResult<AdminOverviewOutput> {
        let stats = self.profile_repo.count_stats().await?;
        let recent = self
            .profile_repo
            .list_recent_submissions(self.config.recent_limit)
            .await?;
        let by_department = self.profile_repo.count_by_department().await?;

        Ok(AdminOverviewOutput {
            stats,
            recent,
            by_department,
        })
    }
}
