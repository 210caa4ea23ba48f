use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthHr;
use crate::errors::AppError;
use crate::notify::campaign::Campaign;
use crate::notify::dispatch::{dispatch, DispatchReport};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestInviteRequest {
    #[serde(default)]
    pub applicant_ids: Vec<Uuid>,
    #[serde(default)]
    pub test_link: String,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewInviteRequest {
    #[serde(default)]
    pub applicant_ids: Vec<Uuid>,
    #[serde(default)]
    pub interview_link: String,
    #[serde(default)]
    pub interview_type: String,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardRequest {
    #[serde(default)]
    pub applicant_ids: Vec<Uuid>,
    pub message: Option<String>,
    pub start_date: Option<NaiveDate>,
}

/// POST /api/applicants/send-test
pub async fn handle_send_test(
    State(state): State<AppState>,
    AuthHr(hr): AuthHr,
    Json(req): Json<TestInviteRequest>,
) -> Result<Json<DispatchReport>, AppError> {
    let campaign = Campaign::TestInvite {
        test_link: req.test_link,
        message: req.message,
    };
    let report = dispatch(&state, hr.sub, &req.applicant_ids, &campaign).await?;
    Ok(Json(report))
}

/// POST /api/applicants/send-interview
pub async fn handle_send_interview(
    State(state): State<AppState>,
    AuthHr(hr): AuthHr,
    Json(req): Json<InterviewInviteRequest>,
) -> Result<Json<DispatchReport>, AppError> {
    let campaign = Campaign::InterviewInvite {
        interview_link: req.interview_link,
        interview_type: req.interview_type,
        message: req.message,
    };
    let report = dispatch(&state, hr.sub, &req.applicant_ids, &campaign).await?;
    Ok(Json(report))
}

/// POST /api/applicants/onboard
pub async fn handle_onboard(
    State(state): State<AppState>,
    AuthHr(hr): AuthHr,
    Json(req): Json<OnboardRequest>,
) -> Result<Json<DispatchReport>, AppError> {
    let campaign = Campaign::Onboarding {
        message: req.message,
        start_date: req.start_date,
    };
    let report = dispatch(&state, hr.sub, &req.applicant_ids, &campaign).await?;
    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_shapes() {
        let req: TestInviteRequest = serde_json::from_str(
            r#"{"applicantIds":["6a0b7f62-9f65-4a3f-a8c7-2f4f0b1d9a11"],"testLink":"https://t.example/1"}"#,
        )
        .unwrap();
        assert_eq!(req.applicant_ids.len(), 1);
        assert_eq!(req.test_link, "https://t.example/1");

        let req: InterviewInviteRequest = serde_json::from_str(
            r#"{"applicantIds":[],"interviewLink":"https://meet.example/2","interviewType":"Round 2"}"#,
        )
        .unwrap();
        assert!(req.applicant_ids.is_empty());
        assert_eq!(req.interview_type, "Round 2");

        let req: OnboardRequest =
            serde_json::from_str(r#"{"applicantIds":[],"startDate":"2025-10-01"}"#).unwrap();
        assert_eq!(
            req.start_date,
            Some(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap())
        );
    }

    #[test]
    fn test_missing_fields_default_instead_of_rejecting() {
        // Scenario C relies on dispatch() rejecting the empty cohort with
        // 400, so deserialization itself must accept the bare body.
        let req: TestInviteRequest = serde_json::from_str("{}").unwrap();
        assert!(req.applicant_ids.is_empty());
        assert!(req.test_link.is_empty());
    }
}
