//! PostgreSQL Repository Implementation

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::department_profile::{DepartmentProfile, ProfileForm};
use crate::domain::repository::{DepartmentCount, ProfileRepository, ProfileStats};
use crate::domain::value_object::{approval_status::ApprovalStatus, department_name::DepartmentName};
use crate::error::ProfileResult;
use kernel::id::ProfileId;

/// PostgreSQL-backed profile repository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProfileRepository for PgProfileRepository {
    async fn create(&self, profile: &DepartmentProfile) -> ProfileResult<String> {
        // application_id defaults to the next '24CC{seq:05}' value; the
        // database assigns it exactly once
        let application_id = sqlx::query_scalar::<_, String>(
            r#"
            INSERT INTO department_profiles (
                profile_id,
                user_id,
                guid,
                department_name,
                email,
                full_name,
                phone_number,
                date_of_birth,
                address,
                city,
                state,
                pin_code,
                years_of_experience,
                key_skills,
                previous_projects,
                availability,
                expected_salary_range,
                performed_work_location,
                educational_qualification,
                certifications_training,
                awards_recognition,
                portfolio_link,
                linkedin_profile,
                imdb_profile,
                additional_information,
                resume_path,
                approval_status,
                created_at,
                updated_at
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
                $21, $22, $23, $24, $25, $26, $27, $28, $29
            )
            RETURNING application_id
            "#,
        )
        .bind(profile.profile_id.as_uuid())
        .bind(profile.user_id)
        .bind(profile.guid)
        .bind(profile.department_name.as_str())
        .bind(&profile.email)
        .bind(&profile.form.full_name)
        .bind(&profile.form.phone_number)
        .bind(profile.form.date_of_birth)
        .bind(&profile.form.address)
        .bind(&profile.form.city)
        .bind(&profile.form.state)
        .bind(&profile.form.pin_code)
        .bind(profile.form.years_of_experience)
        .bind(&profile.form.key_skills)
        .bind(&profile.form.previous_projects)
        .bind(&profile.form.availability)
        .bind(&profile.form.expected_salary_range)
        .bind(&profile.form.performed_work_location)
        .bind(&profile.form.educational_qualification)
        .bind(&profile.form.certifications_training)
        .bind(&profile.form.awards_recognition)
        .bind(&profile.form.portfolio_link)
        .bind(&profile.form.linkedin_profile)
        .bind(&profile.form.imdb_profile)
        .bind(&profile.form.additional_information)
        .bind(&profile.form.resume_path)
        .bind(profile.approval_status.id())
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(application_id)
    }

    async fn update(&self, profile: &DepartmentProfile) -> ProfileResult<()> {
        sqlx::query(
            r#"
            UPDATE department_profiles SET
                full_name = $2,
                phone_number = $3,
                date_of_birth = $4,
                address = $5,
                city = $6,
                state = $7,
                pin_code = $8,
                years_of_experience = $9,
                key_skills = $10,
                previous_projects = $11,
                availability = $12,
                expected_salary_range = $13,
                performed_work_location = $14,
                educational_qualification = $15,
                certifications_training = $16,
                awards_recognition = $17,
                portfolio_link = $18,
                linkedin_profile = $19,
                imdb_profile = $20,
                additional_information = $21,
                resume_path = $22,
                approval_status = $23,
                updated_at = $24
            WHERE profile_id = $1
            "#,
        )
        .bind(profile.profile_id.as_uuid())
        .bind(&profile.form.full_name)
        .bind(&profile.form.phone_number)
        .bind(profile.form.date_of_birth)
        .bind(&profile.form.address)
        .bind(&profile.form.city)
        .bind(&profile.form.state)
        .bind(&profile.form.pin_code)
        .bind(profile.form.years_of_experience)
        .bind(&profile.form.key_skills)
        .bind(&profile.form.previous_projects)
        .bind(&profile.form.availability)
        .bind(&profile.form.expected_salary_range)
        .bind(&profile.form.performed_work_location)
        .bind(&profile.form.educational_qualification)
        .bind(&profile.form.certifications_training)
        .bind(&profile.form.awards_recognition)
        .bind(&profile.form.portfolio_link)
        .bind(&profile.form.linkedin_profile)
        .bind(&profile.form.imdb_profile)
        .bind(&profile.form.additional_information)
        .bind(&profile.form.resume_path)
        .bind(profile.approval_status.id())
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, profile_id: &ProfileId) -> ProfileResult<()> {
        sqlx::query("DELETE FROM department_profiles WHERE profile_id = $1")
            .bind(profile_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, profile_id: &ProfileId) -> ProfileResult<Option<DepartmentProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT * FROM department_profiles WHERE profile_id = $1",
        )
        .bind(profile_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_profile()))
    }

    async fn find_by_application_id(
        &self,
        application_id: &str,
    ) -> ProfileResult<Option<DepartmentProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT * FROM department_profiles WHERE application_id = $1",
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_profile()))
    }

    async fn find_draft(
        &self,
        user_id: &Uuid,
        department: &DepartmentName,
    ) -> ProfileResult<Option<DepartmentProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT * FROM department_profiles
            WHERE user_id = $1 AND department_name = $2 AND approval_status = $3
            ORDER BY updated_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(department.as_str())
        .bind(ApprovalStatus::Draft.id())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_profile()))
    }

    async fn exists_live_submission(
        &self,
        user_id: &Uuid,
        department: &DepartmentName,
        exclude: Option<&ProfileId>,
    ) -> ProfileResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM department_profiles
                WHERE user_id = $1
                  AND department_name = $2
                  AND approval_status IN ($3, $4)
                  AND ($5::uuid IS NULL OR profile_id <> $5)
            )
            "#,
        )
        .bind(user_id)
        .bind(department.as_str())
        .bind(ApprovalStatus::Pending.id())
        .bind(ApprovalStatus::Approved.id())
        .bind(exclude.map(|id| *id.as_uuid()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_for_user(&self, user_id: &Uuid) -> ProfileResult<Vec<DepartmentProfile>> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT * FROM department_profiles
            WHERE user_id = $1
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_profile()).collect())
    }

    async fn list_recent_submissions(&self, limit: i64) -> ProfileResult<Vec<DepartmentProfile>> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT * FROM department_profiles
            WHERE approval_status <> $1
            ORDER BY updated_at DESC
            LIMIT $2
            "#,
        )
        .bind(ApprovalStatus::Draft.id())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_profile()).collect())
    }

    async fn count_stats(&self) -> ProfileResult<ProfileStats> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE approval_status = $1) AS pending,
                COUNT(*) FILTER (WHERE approval_status = $2) AS approved
            FROM department_profiles
            WHERE approval_status <> $3
            "#,
        )
        .bind(ApprovalStatus::Pending.id())
        .bind(ApprovalStatus::Approved.id())
        .bind(ApprovalStatus::Draft.id())
        .fetch_one(&self.pool)
        .await?;

        Ok(ProfileStats {
            total: row.total,
            pending: row.pending,
            approved: row.approved,
        })
    }

    async fn count_by_department(&self) -> ProfileResult<Vec<DepartmentCount>> {
        let rows = sqlx::query_as::<_, DepartmentCountRow>(
            r#"
            SELECT department_name, COUNT(*) AS count
            FROM department_profiles
            WHERE approval_status <> $1
            GROUP BY department_name
            ORDER BY count DESC, department_name
            "#,
        )
        .bind(ApprovalStatus::Draft.id())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| DepartmentCount {
                department_name: r.department_name,
                count: r.count,
            })
            .collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct ProfileRow {
    profile_id: Uuid,
    user_id: Uuid,
    application_id: String,
    guid: Uuid,
    department_name: String,
    email: String,
    full_name: String,
    phone_number: String,
    date_of_birth: Option<NaiveDate>,
    address: Option<String>,
    city: Option<String>,
    state: Option<String>,
    pin_code: Option<String>,
    years_of_experience: Option<i16>,
    key_skills: Option<String>,
    previous_projects: Option<String>,
    availability: Option<String>,
    expected_salary_range: Option<String>,
    performed_work_location: Option<String>,
    educational_qualification: Option<String>,
    certifications_training: Option<String>,
    awards_recognition: Option<String>,
    portfolio_link: Option<String>,
    linkedin_profile: Option<String>,
    imdb_profile: Option<String>,
    additional_information: Option<String>,
    resume_path: Option<String>,
    approval_status: i16,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> DepartmentProfile {
        DepartmentProfile {
            profile_id: ProfileId::from_uuid(self.profile_id),
            user_id: self.user_id,
            application_id: Some(self.application_id),
            guid: self.guid,
            department_name: DepartmentName::from_db(self.department_name),
            email: self.email,
            form: ProfileForm {
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
            },
            approval_status: ApprovalStatus::from_id(self.approval_status),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StatsRow {
    total: i64,
    pending: i64,
    approved: i64,
}

#[derive(sqlx::FromRow)]
struct DepartmentCountRow {
    department_name: String,
    count: i64,
}
