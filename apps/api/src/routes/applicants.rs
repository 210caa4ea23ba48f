use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthHr;
use crate::errors::AppError;
use crate::models::applicant::ApplicantRow;
use crate::pipeline::guard::authorize_job;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantListResponse {
    pub applicants: Vec<ApplicantRow>,
    pub total_applicants: usize,
}

/// GET /api/jobs/:job_id/applicants — the job's full pipeline, the list
/// the UI picks dispatch cohorts from.
pub async fn handle_list_applicants(
    State(state): State<AppState>,
    AuthHr(hr): AuthHr,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ApplicantListResponse>, AppError> {
    authorize_job(&state.db, hr.sub, job_id).await?;
    let applicants: Vec<ApplicantRow> =
        sqlx::query_as("SELECT * FROM applicants WHERE job_applied = $1 ORDER BY created_at")
            .bind(job_id)
            .fetch_all(&state.db)
            .await?;
    let total_applicants = applicants.len();
    Ok(Json(ApplicantListResponse {
        applicants,
        total_applicants,
    }))
}

/// GET /api/applicants/:id — authorized through the applicant's job owner.
pub async fn handle_get_applicant(
    State(state): State<AppState>,
    AuthHr(hr): AuthHr,
    Path(applicant_id): Path<Uuid>,
) -> Result<Json<ApplicantRow>, AppError> {
    let applicant: Option<ApplicantRow> = sqlx::query_as("SELECT * FROM applicants WHERE id = $1")
        .bind(applicant_id)
        .fetch_optional(&state.db)
        .await?;
    let applicant = applicant
        .ok_or_else(|| AppError::NotFound(format!("Applicant {applicant_id} not found")))?;

    let job_id = applicant.job_applied.ok_or_else(|| {
        AppError::Forbidden("Applicant is not attached to any job posting".to_string())
    })?;
    authorize_job(&state.db, hr.sub, job_id).await?;

    Ok(Json(applicant))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn applicant(email: &str) -> ApplicantRow {
        ApplicantRow {
            id: Uuid::new_v4(),
            full_name: Some("Alice".to_string()),
            email: Some(email.to_string()),
            phone: None,
            linkedin: None,
            github: None,
            skills: vec![],
            qualification: None,
            experience: 0.0,
            skill_match: None,
            uploaded_resume: None,
            job_applied: Some(Uuid::new_v4()),
            status: "Applied".to_string(),
            aptitude_test: "NA".to_string(),
            interview_1: "NA".to_string(),
            interview_1_comment: None,
            interview_2: "NA".to_string(),
            interview_2_comment: None,
            test_score: None,
            onboarding_message: None,
            onboarded_at: None,
            start_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_job_applicant_list_serializes_wire_shape() {
        let response = ApplicantListResponse {
            applicants: vec![applicant("alice@x.com"), applicant("bob@x.com")],
            total_applicants: 2,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalApplicants"], 2);
        assert_eq!(json["applicants"][0]["fullName"], "Alice");
        assert_eq!(json["applicants"][1]["email"], "bob@x.com");
    }
}
