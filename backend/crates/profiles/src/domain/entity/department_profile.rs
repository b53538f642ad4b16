//! Department Profile Entity
//!
//! One recruitment profile per user and department. Profiles start as
//! drafts or pending submissions; the human-readable application ID is
//! assigned by the database on first insert and never changes.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::ProfileId;
use uuid::Uuid;

use crate::domain::value_object::{approval_status::ApprovalStatus, department_name::DepartmentName};
use crate::error::{ProfileError, ProfileResult};

const MAX_TEXT_FIELD: usize = 2000;
const MAX_NAME: usize = 120;

/// Applicant-editable profile fields
///
/// Everything here comes straight from the submission form. Identity
/// fields (user, email, department) live on the entity itself.
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
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
}

impl ProfileForm {
    /// Validate form contents for submission
    ///
    /// Drafts are saved with the same checks; partial forms stay
    /// possible because only name and phone are mandatory.
    pub fn validate(&self) -> ProfileResult<()> {
        if self.full_name.trim().is_empty() {
            return Err(ProfileError::Validation(
                "Full name is required".to_string(),
            ));
        }
        if self.full_name.len() > MAX_NAME {
            return Err(ProfileError::Validation(format!(
                "Full name cannot exceed {MAX_NAME} characters"
            )));
        }
        if self.phone_number.trim().is_empty() {
            return Err(ProfileError::Validation(
                "Phone number is required".to_string(),
            ));
        }
        if !self
            .phone_number
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
        {
            return Err(ProfileError::Validation(
                "Phone number contains invalid characters".to_string(),
            ));
        }
        if let Some(years) = self.years_of_experience {
            if !(0..=80).contains(&years) {
                return Err(ProfileError::Validation(
                    "Years of experience out of range".to_string(),
                ));
            }
        }

        let long_fields = [
            &self.key_skills,
            &self.previous_projects,
            &self.educational_qualification,
            &self.certifications_training,
            &self.awards_recognition,
            &self.additional_information,
        ];
        for field in long_fields {
            if let Some(value) = field {
                if value.len() > MAX_TEXT_FIELD {
                    return Err(ProfileError::Validation(format!(
                        "Field cannot exceed {MAX_TEXT_FIELD} characters"
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Department profile entity
#[derive(Debug, Clone)]
pub struct DepartmentProfile {
    /// Internal ID (UUID v4)
    pub profile_id: ProfileId,
    /// Owning account
    pub user_id: Uuid,
    /// Human-readable application number ("24CC00042"), assigned by the
    /// database on first insert
    pub application_id: Option<String>,
    /// Opaque external reference
    pub guid: Uuid,
    /// Department applied to
    pub department_name: DepartmentName,
    /// Contact email, taken from the account server-side
    pub email: String,
    /// Form contents
    pub form: ProfileForm,
    /// Lifecycle status
    pub approval_status: ApprovalStatus,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl DepartmentProfile {
    /// Create a fresh profile in the given status
    pub fn new(
        user_id: Uuid,
        department_name: DepartmentName,
        email: String,
        form: ProfileForm,
        status: ApprovalStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            profile_id: ProfileId::new(),
            user_id,
            application_id: None,
            guid: Uuid::new_v4(),
            department_name,
            email,
            form,
            approval_status: status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the form contents on an existing draft
    pub fn update_form(&mut self, form: ProfileForm) {
        self.form = form;
        self.updated_at = Utc::now();
    }

    /// Promote a draft to a pending submission
    pub fn submit(&mut self) {
        self.approval_status = ApprovalStatus::Pending;
        self.updated_at = Utc::now();
    }

    /// Apply a staff review action
    pub fn apply_review(
        &mut self,
        action: crate::domain::value_object::approval_status::ReviewAction,
    ) -> ProfileResult<()> {
        if !self.approval_status.is_reviewable() {
            return Err(ProfileError::NotReviewable);
        }
        self.approval_status = action.target_status();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_draft(&self) -> bool {
        self.approval_status == ApprovalStatus::Draft
    }

    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        self.user_id == *user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::approval_status::ReviewAction;

    fn form() -> ProfileForm {
        ProfileForm {
            full_name: "Asha Kumar".to_string(),
            phone_number: "+91 98765 43210".to_string(),
            years_of_experience: Some(4),
            key_skills: Some("Color grading, DaVinci Resolve".to_string()),
            ..Default::default()
        }
    }

    fn profile(status: ApprovalStatus) -> DepartmentProfile {
        DepartmentProfile::new(
            Uuid::new_v4(),
            DepartmentName::new("editing").unwrap(),
            "asha@example.com".to_string(),
            form(),
            status,
        )
    }

    #[test]
    fn test_form_validation() {
        assert!(form().validate().is_ok());

        let mut bad = form();
        bad.full_name = "  ".to_string();
        assert!(bad.validate().is_err());

        let mut bad = form();
        bad.phone_number = "call me".to_string();
        assert!(bad.validate().is_err());

        let mut bad = form();
        bad.years_of_experience = Some(99);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_submit_promotes_draft() {
        let mut profile = profile(ApprovalStatus::Draft);
        profile.submit();
        assert_eq!(profile.approval_status, ApprovalStatus::Pending);
    }

    #[test]
    fn test_review_on_draft_refused() {
        let mut profile = profile(ApprovalStatus::Draft);
        assert!(matches!(
            profile.apply_review(ReviewAction::Approve),
            Err(ProfileError::NotReviewable)
        ));
    }

    #[test]
    fn test_review_transitions() {
        let mut profile = profile(ApprovalStatus::Pending);
        profile.apply_review(ReviewAction::Approve).unwrap();
        assert_eq!(profile.approval_status, ApprovalStatus::Approved);

        profile.apply_review(ReviewAction::Deactivate).unwrap();
        assert_eq!(profile.approval_status, ApprovalStatus::Inactive);

        profile.apply_review(ReviewAction::Activate).unwrap();
        assert_eq!(profile.approval_status, ApprovalStatus::Approved);
    }
}
