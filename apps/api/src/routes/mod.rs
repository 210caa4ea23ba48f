pub mod applicants;
pub mod health;
pub mod jobs;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::export;
use crate::intake;
use crate::notify;
use crate::pipeline;
use crate::reconcile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job postings
        .route(
            "/api/jobs",
            post(jobs::handle_create_job).get(jobs::handle_list_jobs),
        )
        .route("/api/jobs/:job_id", get(jobs::handle_get_job))
        .route(
            "/api/jobs/:job_id/applicants",
            get(applicants::handle_list_applicants),
        )
        // Intake & bulk operations scoped to one job
        .route(
            "/api/jobs/:job_id/applicants/upload-resumes",
            post(intake::handlers::handle_upload_resumes),
        )
        .route(
            "/api/jobs/:job_id/applicants/import-scores",
            post(reconcile::handlers::handle_import_scores),
        )
        .route(
            "/api/jobs/:job_id/applicants/export",
            post(export::handle_export),
        )
        // Applicants & workflow actions
        .route(
            "/api/applicants/:id",
            get(applicants::handle_get_applicant),
        )
        .route(
            "/api/applicants/:id/status",
            put(pipeline::handlers::handle_update_status),
        )
        // Campaign dispatch
        .route(
            "/api/applicants/send-test",
            post(notify::handlers::handle_send_test),
        )
        .route(
            "/api/applicants/send-interview",
            post(notify::handlers::handle_send_interview),
        )
        .route(
            "/api/applicants/onboard",
            post(notify::handlers::handle_onboard),
        )
        .with_state(state)
}
