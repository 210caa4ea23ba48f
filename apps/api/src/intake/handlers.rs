//! Resume intake: one applicant record per uploaded file.

use std::io::Write;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthHr;
use crate::errors::AppError;
use crate::intake::extractor::{ExtractedFields, JobContext};
use crate::pipeline::guard::authorize_job;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedApplicant {
    pub applicant_id: Uuid,
    pub file_name: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadError {
    pub file_name: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummary {
    pub total_files: usize,
    pub created: Vec<CreatedApplicant>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<UploadError>,
}

/// POST /api/jobs/:job_id/applicants/upload-resumes
///
/// Multipart upload of one or more resumes. Each file goes through the
/// external extractor independently; a failing file becomes an error
/// entry, never an abort. Records with neither email nor name are
/// discarded per the creation invariant.
pub async fn handle_upload_resumes(
    State(state): State<AppState>,
    AuthHr(hr): AuthHr,
    Path(job_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadSummary>, AppError> {
    let job = authorize_job(&state.db, hr.sub, job_id).await?;
    let job_context = JobContext::from(&job);

    let mut total_files = 0usize;
    let mut created = Vec::new();
    let mut errors = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        total_files += 1;

        let data = match field.bytes().await {
            Ok(data) => data,
            Err(e) => {
                errors.push(UploadError {
                    file_name,
                    error: format!("failed to read upload: {e}"),
                });
                continue;
            }
        };

        match process_resume(&state, &job_context, job_id, &file_name, &data).await {
            Ok(Some(applicant)) => created.push(applicant),
            Ok(None) => errors.push(UploadError {
                file_name,
                error: "no identifiable fields (email or name) could be extracted".to_string(),
            }),
            Err(e) => {
                tracing::error!(%job_id, %file_name, "Resume intake failed: {e}");
                errors.push(UploadError {
                    file_name,
                    error: "failed to store applicant record".to_string(),
                });
            }
        }
    }

    if total_files == 0 {
        return Err(AppError::Validation(
            "No files were uploaded".to_string(),
        ));
    }

    tracing::info!(
        %job_id,
        hr_id = %hr.sub,
        total_files,
        created = created.len(),
        "Resume intake finished"
    );
    Ok(Json(UploadSummary {
        total_files,
        created,
        errors,
    }))
}

/// Spools one file, extracts fields and persists the applicant.
/// `Ok(None)` means the record was discarded for lacking identity.
async fn process_resume(
    state: &AppState,
    job_context: &JobContext,
    job_id: Uuid,
    file_name: &str,
    data: &[u8],
) -> Result<Option<CreatedApplicant>, AppError> {
    let suffix = std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let mut spooled = tempfile::Builder::new()
        .suffix(&suffix)
        .tempfile()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to spool upload: {e}")))?;
    spooled
        .write_all(data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to spool upload: {e}")))?;

    // Extraction failure degrades to an empty field set; the identity
    // check below decides whether anything gets persisted.
    let fields = match state.extractor.extract(spooled.path(), job_context).await {
        Ok(fields) => fields,
        Err(e) => {
            tracing::warn!(%file_name, "Extraction degraded to empty fields: {e}");
            ExtractedFields::default()
        }
    };

    if !fields.is_identifiable() {
        return Ok(None);
    }

    let applicant_id: Uuid = sqlx::query_scalar(
        "INSERT INTO applicants \
            (full_name, email, phone, linkedin, github, skills, qualification, \
             experience, skill_match, uploaded_resume, job_applied) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 0), $9, $10, $11) \
         RETURNING id",
    )
    .bind(&fields.full_name)
    .bind(&fields.email)
    .bind(&fields.phone)
    .bind(&fields.linkedin)
    .bind(&fields.github)
    .bind(&fields.skills)
    .bind(&fields.qualification)
    .bind(fields.experience)
    .bind(fields.skill_match)
    .bind(file_name)
    .bind(job_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Some(CreatedApplicant {
        applicant_id,
        file_name: file_name.to_string(),
        full_name: fields.full_name,
        email: fields.email,
    }))
}
