use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One applicant record, created per uploaded resume by the intake step.
///
/// `status`, `aptitude_test` and the interview fields hold the literal wire
/// strings of the pipeline enums (see `pipeline::state`); TEXT columns keep
/// unknown values readable for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantRow {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub skills: Vec<String>,
    pub qualification: Option<String>,
    pub experience: f64,
    pub skill_match: Option<f64>,
    pub uploaded_resume: Option<String>,
    pub job_applied: Option<Uuid>,
    pub status: String,
    pub aptitude_test: String,
    pub interview_1: String,
    pub interview_1_comment: Option<String>,
    pub interview_2: String,
    pub interview_2_comment: Option<String>,
    pub test_score: Option<f64>,
    pub onboarding_message: Option<String>,
    pub onboarded_at: Option<DateTime<Utc>>,
    pub start_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicantRow {
    /// Non-blank email, trimmed — the mailable test used by the dispatcher.
    pub fn mailable_email(&self) -> Option<&str> {
        self.email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or("Candidate")
    }
}
