//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use uuid::Uuid;

use crate::domain::entity::department_profile::DepartmentProfile;
use crate::domain::value_object::department_name::DepartmentName;
use crate::error::ProfileResult;
use kernel::id::ProfileId;

/// Aggregate counts for the admin overview
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileStats {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
}

/// Submission count for one department
#[derive(Debug, Clone)]
pub struct DepartmentCount {
    pub department_name: String,
    pub count: i64,
}

/// Profile repository trait
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    /// Insert a new profile; returns the assigned application ID
    async fn create(&self, profile: &DepartmentProfile) -> ProfileResult<String>;

    /// Persist changes to an existing profile
    async fn update(&self, profile: &DepartmentProfile) -> ProfileResult<()>;

    /// Remove a profile entirely
    async fn delete(&self, profile_id: &ProfileId) -> ProfileResult<()>;

    /// Find a profile by internal ID
    async fn find_by_id(&self, profile_id: &ProfileId) -> ProfileResult<Option<DepartmentProfile>>;

    /// Find a profile by its application ID
    async fn find_by_application_id(
        &self,
        application_id: &str,
    ) -> ProfileResult<Option<DepartmentProfile>>;

    /// Latest draft for a user and department, if any
    async fn find_draft(
        &self,
        user_id: &Uuid,
        department: &DepartmentName,
    ) -> ProfileResult<Option<DepartmentProfile>>;

    /// Whether a live submission (Pending or Approved) exists for the
    /// user and department, excluding the given profile
    async fn exists_live_submission(
        &self,
        user_id: &Uuid,
        department: &DepartmentName,
        exclude: Option<&ProfileId>,
    ) -> ProfileResult<bool>;

    /// All profiles for a user, newest first
    async fn list_for_user(&self, user_id: &Uuid) -> ProfileResult<Vec<DepartmentProfile>>;

    /// Most recent non-draft submissions, newest first
    async fn list_recent_submissions(&self, limit: i64) -> ProfileResult<Vec<DepartmentProfile>>;

    /// Aggregate counts over non-draft profiles
    async fn count_stats(&self) -> ProfileResult<ProfileStats>;

    /// Non-draft submission counts per department, largest first
    async fn count_by_department(&self) -> ProfileResult<Vec<DepartmentCount>>;
}
