//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::department_profile::{DepartmentProfile, ProfileForm};
use crate::domain::repository::{DepartmentCount, ProfileStats};

// ============================================================================
// Submit
// ============================================================================

/// Profile form request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFormRequest {
    pub full_name: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
    pub years_of_experience: Option<i16>,
    pub key_skills: Option<String>,
    pub previous_projects: Option<String>,
    pub availability: Option<String>,
    pub expected_salary_range: Option<String>,
    pub performed_work_location: Option<String>,
    pub educational_qualification: Option<String>,
    pub certifications_training: Option<String>,
    pub awards_recognition: Option<String>,
    pub portfolio_link: Option<String>,
    pub linkedin_profile: Option<String>,
    pub imdb_profile: Option<String>,
    pub additional_information: Option<String>,
    pub resume_path: Option<String>,
    /// Save as an editable draft instead of submitting
    #[serde(default)]
    pub as_draft: bool,
}

impl ProfileFormRequest {
    pub fn into_form(self) -> ProfileForm {
        ProfileForm {
            full_name: self.full_name,
            phone_number: self.phone_number,
            date_of_birth: self.date_of_birth,
            address: self.address,
            city: self.city,
            state: self.state,
            pin_code: self.pin_code,
            years_of_experience: self.years_of_experience,
            key_skills: self.key_skills,
            previous_projects: self.previous_projects,
            availability: self.availability,
            expected_salary_range: self.expected_salary_range,
            performed_work_location: self.performed_work_location,
            educational_qualification: self.educational_qualification,
            certifications_training: self.certifications_training,
            awards_recognition: self.awards_recognition,
            portfolio_link: self.portfolio_link,
            linkedin_profile: self.linkedin_profile,
            imdb_profile: self.imdb_profile,
            additional_information: self.additional_information,
            resume_path: self.resume_path,
        }
    }
}

/// Submit profile response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitProfileResponse {
    pub application_id: String,
    pub status: String,
}

// ============================================================================
// Dashboard / Detail
// ============================================================================

/// Profile summary for listings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub application_id: Option<String>,
    pub department_name: String,
    pub full_name: String,
    pub status: String,
    pub updated_at: DateTime<Utc>,
}

impl ProfileSummary {
    pub fn from_profile(profile: &DepartmentProfile) -> Self {
        Self {
            application_id: profile.application_id.clone(),
            department_name: profile.department_name.to_string(),
            full_name: profile.form.full_name.clone(),
            status: profile.approval_status.code().to_string(),
            updated_at: profile.updated_at,
        }
    }
}

/// Dashboard response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub drafts: Vec<ProfileSummary>,
    pub submitted: Vec<ProfileSummary>,
}

/// Full profile detail response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetailResponse {
    pub application_id: Option<String>,
    pub guid: String,
    pub department_name: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pin_code: Option<String>,
    pub years_of_experience: Option<i16>,
    pub key_skills: Option<String>,
    pub previous_projects: Option<String>,
    pub availability: Option<String>,
    pub expected_salary_range: Option<String>,
    pub performed_work_location: Option<String>,
    pub educational_qualification: Option<String>,
    pub certifications_training: Option<String>,
    pub awards_recognition: Option<String>,
    pub portfolio_link: Option<String>,
    pub linkedin_profile: Option<String>,
    pub imdb_profile: Option<String>,
    pub additional_information: Option<String>,
    pub resume_path: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileDetailResponse {
    pub fn from_profile(profile: DepartmentProfile) -> Self {
        Self {
            application_id: profile.application_id,
            guid: profile.guid.to_string(),
            department_name: profile.department_name.to_string(),
            email: profile.email,
            full_name: profile.form.full_name,
            phone_number: profile.form.phone_number,
            date_of_birth: profile.form.date_of_birth,
            address: profile.form.address,
            city: profile.form.city,
            state: profile.form.state,
            pin_code: profile.form.pin_code,
            years_of_experience: profile.form.years_of_experience,
            key_skills: profile.form.key_skills,
            previous_projects: profile.form.previous_projects,
            availability: profile.form.availability,
            expected_salary_range: profile.form.expected_salary_range,
            performed_work_location: profile.form.performed_work_location,
            educational_qualification: profile.form.educational_qualification,
            certifications_training: profile.form.certifications_training,
            awards_recognition: profile.form.awards_recognition,
            portfolio_link: profile.form.portfolio_link,
            linkedin_profile: profile.form.linkedin_profile,
            imdb_profile: profile.form.imdb_profile,
            additional_information: profile.form.additional_information,
            resume_path: profile.form.resume_path,
            status: profile.approval_status.code().to_string(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

// ============================================================================
// Admin
// ============================================================================

/// Review action request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub action: String,
}

/// Review action response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResponse {
    pub application_id: String,
    pub status: String,
}

/// Aggregate stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    pub total: i64,
    pub pending: i64,
    pub approved: i64,
}

impl StatsDto {
    pub fn from_stats(stats: ProfileStats) -> Self {
        Self {
            total: stats.total,
            pending: stats.pending,
            approved: stats.approved,
        }
    }
}

/// Per-department count
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentCountDto {
    pub department_name: String,
    pub count: i64,
}

impl DepartmentCountDto {
    pub fn from_count(count: DepartmentCount) -> Self {
        Self {
            department_name: count.department_name,
            count: count.count,
        }
    }
}

/// Admin overview response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverviewResponse {
    pub stats: StatsDto,
    pub recent: Vec<ProfileSummary>,
    pub by_department: Vec<DepartmentCountDto>,
}
