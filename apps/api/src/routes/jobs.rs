use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthHr;
use crate::errors::AppError;
use crate::models::job::JobRow;
use crate::pipeline::guard::authorize_job;
use crate::state::AppState;

/// Skills/qualification fields accept either a JSON array or one
/// comma-separated string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StringList {
    Many(Vec<String>),
    One(String),
}

impl StringList {
    pub fn into_vec(self) -> Vec<String> {
        let items = match self {
            StringList::Many(items) => items,
            StringList::One(joined) => joined.split(',').map(str::to_string).collect(),
        };
        items
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[serde(default)]
    pub title: String,
    pub description: Option<String>,
    pub required_skills: Option<StringList>,
    pub qualification: Option<StringList>,
    pub experience_required: Option<f64>,
    #[serde(default)]
    pub location: String,
    pub salary: Option<f64>,
    pub job_type: Option<String>,
}

/// POST /api/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    AuthHr(hr): AuthHr,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let required_skills = req.required_skills.map(StringList::into_vec).unwrap_or_default();
    let qualification = req.qualification.map(StringList::into_vec).unwrap_or_default();
    if req.title.trim().is_empty()
        || req.location.trim().is_empty()
        || required_skills.is_empty()
        || qualification.is_empty()
        || req.experience_required.is_none()
    {
        return Err(AppError::Validation(
            "title, requiredSkills, experienceRequired, location and qualification are required"
                .to_string(),
        ));
    }

    let job: JobRow = sqlx::query_as(
        "INSERT INTO jobs \
            (title, description, required_skills, qualification, experience_required, \
             location, salary, job_type, created_by) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING *",
    )
    .bind(req.title.trim())
    .bind(req.description.unwrap_or_default())
    .bind(&required_skills)
    .bind(&qualification)
    .bind(req.experience_required.unwrap_or_default())
    .bind(req.location.trim())
    .bind(req.salary)
    .bind(req.job_type)
    .bind(hr.sub)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(job_id = %job.id, hr_id = %hr.sub, "Job posted");
    Ok((StatusCode::CREATED, Json(job)))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListResponse {
    pub jobs: Vec<JobRow>,
    pub total_jobs: usize,
}

/// GET /api/jobs — the requesting HR's own postings.
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    AuthHr(hr): AuthHr,
) -> Result<Json<JobListResponse>, AppError> {
    let jobs: Vec<JobRow> =
        sqlx::query_as("SELECT * FROM jobs WHERE created_by = $1 ORDER BY created_at DESC")
            .bind(hr.sub)
            .fetch_all(&state.db)
            .await?;
    let total_jobs = jobs.len();
    Ok(Json(JobListResponse { jobs, total_jobs }))
}

/// GET /api/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    AuthHr(hr): AuthHr,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = authorize_job(&state.db, hr.sub, job_id).await?;
    Ok(Json(job))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_list_from_comma_separated() {
        let list: StringList = serde_json::from_str(r#""rust, sql , , tokio""#).unwrap();
        assert_eq!(list.into_vec(), vec!["rust", "sql", "tokio"]);
    }

    #[test]
    fn test_string_list_from_array() {
        let list: StringList = serde_json::from_str(r#"["rust", " sql "]"#).unwrap();
        assert_eq!(list.into_vec(), vec!["rust", "sql"]);
    }
}
