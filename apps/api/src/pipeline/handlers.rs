use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthHr;
use crate::errors::AppError;
use crate::models::applicant::ApplicantRow;
use crate::pipeline::guard::authorize_job;
use crate::pipeline::state::{
    next, parse_status, AptitudeOutcome, InterviewOutcome, WorkflowAction,
};
use crate::state::AppState;

/// Which recruitment round a workflow action records.
#[derive(Debug, Clone, Copy, Deserialize)]
pub enum Round {
    #[serde(rename = "aptitude_test")]
    Aptitude,
    #[serde(rename = "interview_1")]
    Interview1,
    #[serde(rename = "interview_2")]
    Interview2,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub round: Round,
    pub outcome: String,
    pub comment: Option<String>,
}

/// PUT /api/applicants/:id/status
///
/// Records a round outcome and applies the status it causes. The target
/// status is fixed per outcome; the current status is never validated.
pub async fn handle_update_status(
    State(state): State<AppState>,
    AuthHr(hr): AuthHr,
    Path(applicant_id): Path<Uuid>,
    Json(req): Json<StatusUpdateRequest>,
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

    let action = parse_action(&req)?;
    let current = parse_status(&applicant.status)?;
    let new_status = next(current, action);

    let (outcome_column, comment_column, outcome_str) = match action {
        WorkflowAction::Aptitude(o) => ("aptitude_test", None, o.as_str()),
        WorkflowAction::Interview1(o) => ("interview_1", Some("interview_1_comment"), o.as_str()),
        WorkflowAction::Interview2(o) => ("interview_2", Some("interview_2_comment"), o.as_str()),
    };

    // Column names come from the match above, never from the request.
    let sql = match comment_column {
        Some(comment_col) => format!(
            "UPDATE applicants SET {outcome_column} = $1, {comment_col} = COALESCE($2, {comment_col}), \
             status = $3, updated_at = now() WHERE id = $4 RETURNING *"
        ),
        None => format!(
            "UPDATE applicants SET {outcome_column} = $1, \
             status = $2, updated_at = now() WHERE id = $3 RETURNING *"
        ),
    };

    let mut query = sqlx::query_as::<_, ApplicantRow>(&sql).bind(outcome_str);
    if comment_column.is_some() {
        query = query.bind(req.comment.clone());
    }
    let updated = query
        .bind(new_status.as_str())
        .bind(applicant_id)
        .fetch_one(&state.db)
        .await?;

    tracing::info!(
        %applicant_id,
        hr_id = %hr.sub,
        from = applicant.status,
        to = new_status.as_str(),
        "Applied workflow action"
    );

    Ok(Json(updated))
}

fn parse_action(req: &StatusUpdateRequest) -> Result<WorkflowAction, AppError> {
    let bad_outcome = || {
        AppError::Validation(format!(
            "Unknown outcome '{}' for the requested round",
            req.outcome
        ))
    };
    match req.round {
        Round::Aptitude => AptitudeOutcome::parse(&req.outcome)
            .map(WorkflowAction::Aptitude)
            .ok_or_else(bad_outcome),
        Round::Interview1 => InterviewOutcome::parse(&req.outcome)
            .map(WorkflowAction::Interview1)
            .ok_or_else(bad_outcome),
        Round::Interview2 => InterviewOutcome::parse(&req.outcome)
            .map(WorkflowAction::Interview2)
            .ok_or_else(bad_outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request(round: Round, outcome: &str) -> StatusUpdateRequest {
        StatusUpdateRequest {
            round,
            outcome: outcome.to_string(),
            comment: None,
        }
    }

    #[test]
    fn test_parse_action_per_round() {
        assert_eq!(
            parse_action(&make_request(Round::Aptitude, "Performing_Test")).unwrap(),
            WorkflowAction::Aptitude(AptitudeOutcome::PerformingTest)
        );
        assert_eq!(
            parse_action(&make_request(Round::Interview2, "Undergoing")).unwrap(),
            WorkflowAction::Interview2(InterviewOutcome::Undergoing)
        );
    }

    #[test]
    fn test_aptitude_round_rejects_interview_outcome() {
        // "Undergoing" is only valid for interview rounds.
        assert!(matches!(
            parse_action(&make_request(Round::Aptitude, "Undergoing")),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_round_wire_names() {
        let req: StatusUpdateRequest = serde_json::from_str(
            r#"{"round":"interview_1","outcome":"Cleared","comment":"solid systems depth"}"#,
        )
        .unwrap();
        assert!(matches!(req.round, Round::Interview1));
        assert_eq!(req.comment.as_deref(), Some("solid systems depth"));
    }
}
