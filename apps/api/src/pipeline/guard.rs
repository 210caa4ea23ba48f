//! Authorization guard — every bulk mutation goes through here before
//! touching any applicant row.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobRow;

/// Loads a job and checks the requester owns it.
///
/// `NotFound` when the job is absent, `Forbidden` when it belongs to a
/// different HR identity.
pub async fn authorize_job(pool: &PgPool, hr_id: Uuid, job_id: Uuid) -> Result<JobRow, AppError> {
    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?;
    let job = job.ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
    if job.created_by != hr_id {
        tracing::warn!(%hr_id, %job_id, "Rejected cross-tenant job access");
        return Err(AppError::Forbidden(
            "You do not own this job posting".to_string(),
        ));
    }
    Ok(job)
}

/// All-or-nothing batch rule for cohort operations: the set of distinct
/// owning HR ids across the resolved applicants must be exactly `{hr_id}`.
/// One foreign owner fails the entire batch; there is no partial
/// authorization.
pub fn authorize_cohort(
    hr_id: Uuid,
    owners: impl IntoIterator<Item = Uuid>,
) -> Result<(), AppError> {
    let mut seen_any = false;
    for owner in owners {
        seen_any = true;
        if owner != hr_id {
            tracing::warn!(%hr_id, foreign_owner = %owner, "Rejected cross-tenant cohort");
            return Err(AppError::Forbidden(
                "One or more applicants belong to another HR's job".to_string(),
            ));
        }
    }
    if !seen_any {
        return Err(AppError::Forbidden(
            "No owned applicants in the requested cohort".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cohort_with_single_matching_owner_passes() {
        let hr = Uuid::new_v4();
        assert!(authorize_cohort(hr, vec![hr, hr, hr]).is_ok());
    }

    #[test]
    fn test_one_foreign_owner_fails_whole_batch() {
        let hr = Uuid::new_v4();
        let other = Uuid::new_v4();
        let result = authorize_cohort(hr, vec![hr, other, hr]);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_empty_owner_set_is_not_authorized() {
        let hr = Uuid::new_v4();
        assert!(matches!(
            authorize_cohort(hr, vec![]),
            Err(AppError::Forbidden(_))
        ));
    }
}
