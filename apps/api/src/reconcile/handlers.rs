//! Bulk score reconciliation — matches imported (email, score) rows
//! against applicants of one job under the status-gated predicate.

use std::io::Write;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthHr;
use crate::errors::AppError;
use crate::pipeline::guard::authorize_job;
use crate::reconcile::parser::{detect_format, parse_score_rows, ScoreRow};
use crate::state::AppState;

/// Scores at or above this mark the aptitude test as cleared. Below it the
/// aptitude field is left untouched — a low score records the number only.
pub const CLEAR_THRESHOLD: f64 = 70.0;

const MISMATCH_REASON: &str = "not found for this job or test not sent";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdate {
    pub email: String,
    pub score: f64,
    pub applicant_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreError {
    pub email: String,
    pub score: f64,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total_processed: usize,
    pub successful_updates: usize,
    pub results: Vec<ScoreUpdate>,
    pub errors: Vec<ScoreError>,
}

/// POST /api/jobs/:job_id/applicants/import-scores
///
/// Multipart upload of a CSV/TSV/Excel file holding at least one header
/// containing `email` and one containing `score`.
pub async fn handle_import_scores(
    State(state): State<AppState>,
    AuthHr(hr): AuthHr,
    Path(job_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, AppError> {
    authorize_job(&state.db, hr.sub, job_id).await?;

    let (filename, data) = read_upload(&mut multipart).await?;
    let format = detect_format(&filename)?;

    // Spool to a temp file scoped to this request; dropped (and removed)
    // on both the success and the error path.
    let suffix = std::path::Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let mut spooled = tempfile::Builder::new()
        .suffix(&suffix)
        .tempfile()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to spool upload: {e}")))?;
    spooled
        .write_all(&data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to spool upload: {e}")))?;

    let rows = parse_score_rows(spooled.path(), format)?;
    if rows.is_empty() {
        return Err(AppError::NoValidData);
    }

    let summary = reconcile(&state.db, job_id, &rows).await;
    tracing::info!(
        %job_id,
        hr_id = %hr.sub,
        total = summary.total_processed,
        updated = summary.successful_updates,
        "Score import finished"
    );
    Ok(Json(summary))
}

/// Applies every valid row sequentially, one round-trip per row, folding
/// outcomes into two lists. A row failure never aborts its siblings.
pub async fn reconcile(pool: &PgPool, job_id: Uuid, rows: &[ScoreRow]) -> ImportSummary {
    let mut results = Vec::new();
    let mut errors = Vec::new();

    for row in rows {
        match apply_row(pool, job_id, row).await {
            Ok(Some(applicant_id)) => results.push(ScoreUpdate {
                email: row.email.clone(),
                score: row.score,
                applicant_id,
            }),
            Ok(None) => errors.push(ScoreError {
                email: row.email.clone(),
                score: row.score,
                error: MISMATCH_REASON.to_string(),
            }),
            Err(e) => {
                tracing::error!(%job_id, email = %row.email, "Row update failed: {e}");
                errors.push(ScoreError {
                    email: row.email.clone(),
                    score: row.score,
                    error: "database error while updating applicant".to_string(),
                });
            }
        }
    }

    ImportSummary {
        total_processed: rows.len(),
        successful_updates: results.len(),
        results,
        errors,
    }
}

/// The central matching rule: a score lands only on the applicant with this
/// exact email, applied to this job, and currently invited to test. The
/// below-threshold branch leaves `aptitude_test` as-is on purpose.
async fn apply_row(pool: &PgPool, job_id: Uuid, row: &ScoreRow) -> Result<Option<Uuid>, sqlx::Error> {
    sqlx::query_scalar(
        "UPDATE applicants \
         SET test_score = $1, \
             aptitude_test = CASE WHEN $1 >= $2 THEN 'Cleared' ELSE aptitude_test END, \
             updated_at = now() \
         WHERE email = $3 AND job_applied = $4 AND status = 'Test_Sent' \
         RETURNING id",
    )
    .bind(row.score)
    .bind(CLEAR_THRESHOLD)
    .bind(&row.email)
    .bind(job_id)
    .fetch_optional(pool)
    .await
}

async fn read_upload(multipart: &mut Multipart) -> Result<(String, bytes::Bytes), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
        return Ok((filename, data));
    }
    Err(AppError::Validation(
        "No file found in the upload".to_string(),
    ))
}
