//! Applicant report export, delivered to the requesting HR by mail.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthHr;
use crate::errors::AppError;
use crate::models::applicant::ApplicantRow;
use crate::models::hr::HrRow;
use crate::notify::mailer::{CampaignEmail, EmailAttachment, Recipient};
use crate::pipeline::guard::authorize_job;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    pub job_id: Uuid,
    pub applicant_count: usize,
    pub sent_to: String,
}

/// POST /api/jobs/:job_id/applicants/export
///
/// Builds a CSV snapshot of the job's pipeline and mails it to the owning
/// HR. The report is held in memory for the lifetime of the request, so
/// there is no temp file left to clean up once the transport call
/// resolves.
pub async fn handle_export(
    State(state): State<AppState>,
    AuthHr(hr): AuthHr,
    Path(job_id): Path<Uuid>,
) -> Result<Json<ExportSummary>, AppError> {
    let job = authorize_job(&state.db, hr.sub, job_id).await?;

    let applicants: Vec<ApplicantRow> =
        sqlx::query_as("SELECT * FROM applicants WHERE job_applied = $1 ORDER BY created_at")
            .bind(job_id)
            .fetch_all(&state.db)
            .await?;
    let owner: HrRow = sqlx::query_as("SELECT * FROM hr_users WHERE id = $1")
        .bind(job.created_by)
        .fetch_one(&state.db)
        .await?;

    let report = build_report(&applicants)?;
    let email = CampaignEmail {
        subject: format!("Applicant Report - {}", job.title),
        html_body: format!(
            "<p>Attached is the current applicant report for <strong>{}</strong> \
             ({} applicant(s)).</p>",
            job.title,
            applicants.len()
        ),
        recipients: vec![Recipient {
            name: Some(owner.name.clone()),
            email: owner.email.clone(),
        }],
        cc: None,
        attachment: Some(EmailAttachment {
            filename: format!("applicants-{job_id}.csv"),
            content_type: "text/csv".to_string(),
            bytes: report,
        }),
    };

    state
        .notifier
        .send_campaign(&email)
        .await
        .map_err(|e| AppError::Mail(e.to_string()))?;

    tracing::info!(%job_id, hr_id = %hr.sub, count = applicants.len(), "Report exported");
    Ok(Json(ExportSummary {
        job_id,
        applicant_count: applicants.len(),
        sent_to: owner.email,
    }))
}

const REPORT_HEADERS: [&str; 10] = [
    "Full Name",
    "Email",
    "Phone",
    "Status",
    "Aptitude Test",
    "Test Score",
    "Interview 1",
    "Interview 2",
    "Skill Match",
    "Applied At",
];

/// Serializes the pipeline snapshot as CSV.
pub fn build_report(applicants: &[ApplicantRow]) -> Result<Vec<u8>, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(REPORT_HEADERS)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build report: {e}")))?;
    for a in applicants {
        writer
            .write_record([
                a.full_name.as_deref().unwrap_or(""),
                a.email.as_deref().unwrap_or(""),
                a.phone.as_deref().unwrap_or(""),
                &a.status,
                &a.aptitude_test,
                &a.test_score.map(|s| s.to_string()).unwrap_or_default(),
                &a.interview_1,
                &a.interview_2,
                &a.skill_match.map(|s| s.to_string()).unwrap_or_default(),
                &a.created_at.to_rfc3339(),
            ])
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build report: {e}")))?;
    }
    writer
        .into_inner()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to build report: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn applicant(name: &str, email: &str, status: &str, score: Option<f64>) -> ApplicantRow {
        ApplicantRow {
            id: Uuid::new_v4(),
            full_name: Some(name.to_string()),
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
            status: status.to_string(),
            aptitude_test: "NA".to_string(),
            interview_1: "NA".to_string(),
            interview_1_comment: None,
            interview_2: "NA".to_string(),
            interview_2_comment: None,
            test_score: score,
            onboarding_message: None,
            onboarded_at: None,
            start_date: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_report_has_header_and_one_line_per_applicant() {
        let rows = vec![
            applicant("Alice", "alice@x.com", "Test_Sent", Some(85.0)),
            applicant("Bob", "bob@x.com", "Applied", None),
        ];
        let bytes = build_report(&rows).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Full Name,Email"));
        assert!(lines[1].contains("alice@x.com"));
        assert!(lines[1].contains("85"));
        assert!(lines[2].contains("Applied"));
    }

    #[test]
    fn test_empty_pipeline_still_produces_header() {
        let bytes = build_report(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
