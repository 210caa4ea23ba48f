//! Resume extraction seam.
//!
//! Turning a resume file into structured fields is an external process;
//! this module only defines the capability interface and the HTTP client
//! for it. Extraction failure degrades the applicant to a partially
//! filled record — it never aborts an upload batch.

use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::job::JobRow;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Extraction service returned status {0}")]
    Status(u16),

    #[error("Failed to read resume file: {0}")]
    Io(#[from] std::io::Error),
}

/// Structured fields returned by the extraction service. Everything is
/// optional: the service fills what it can find.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedFields {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub skills: Vec<String>,
    pub qualification: Option<String>,
    pub experience: Option<f64>,
    pub skill_match: Option<f64>,
}

impl ExtractedFields {
    /// Creation invariant: a record with neither an email nor a full name
    /// is discarded, never persisted.
    pub fn is_identifiable(&self) -> bool {
        let non_blank = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .is_some_and(|s| !s.is_empty())
        };
        non_blank(&self.email) || non_blank(&self.full_name)
    }
}

/// Job posting context sent along with the resume so the service can
/// compute the skill-match percentage.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobContext {
    pub title: String,
    pub required_skills: Vec<String>,
    pub qualification: Vec<String>,
    pub experience_required: f64,
}

impl From<&JobRow> for JobContext {
    fn from(job: &JobRow) -> Self {
        JobContext {
            title: job.title.clone(),
            required_skills: job.required_skills.clone(),
            qualification: job.qualification.clone(),
            experience_required: job.experience_required,
        }
    }
}

#[async_trait]
pub trait Extractor: Send + Sync {
    /// Called once per uploaded file.
    async fn extract(
        &self,
        path: &Path,
        job: &JobContext,
    ) -> Result<ExtractedFields, ExtractError>;
}

/// Client for the external extraction service.
pub struct HttpExtractor {
    client: reqwest::Client,
    base_url: String,
}

impl HttpExtractor {
    pub fn new(base_url: String) -> Self {
        HttpExtractor {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Extractor for HttpExtractor {
    async fn extract(
        &self,
        path: &Path,
        job: &JobContext,
    ) -> Result<ExtractedFields, ExtractError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume")
            .to_string();

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(bytes).file_name(file_name),
            )
            .text("jobTitle", job.title.clone())
            .text("requiredSkills", job.required_skills.join(","))
            .text("qualification", job.qualification.join(","))
            .text("experienceRequired", job.experience_required.to_string());

        let response = self
            .client
            .post(format!("{}/extract", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status(status.as_u16()));
        }
        Ok(response.json::<ExtractedFields>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiable_needs_email_or_name() {
        let mut fields = ExtractedFields::default();
        assert!(!fields.is_identifiable());

        fields.full_name = Some("   ".to_string());
        assert!(!fields.is_identifiable());

        fields.email = Some("alice@x.com".to_string());
        assert!(fields.is_identifiable());

        fields.email = None;
        fields.full_name = Some("Alice".to_string());
        assert!(fields.is_identifiable());
    }

    #[test]
    fn test_extracted_fields_accepts_sparse_payload() {
        let fields: ExtractedFields =
            serde_json::from_str(r#"{"email":"alice@x.com","skills":["rust","sql"]}"#).unwrap();
        assert_eq!(fields.email.as_deref(), Some("alice@x.com"));
        assert_eq!(fields.skills.len(), 2);
        assert!(fields.phone.is_none());
    }
}
