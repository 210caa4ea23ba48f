//! The three bulk-notification campaigns and their composition rules.

use chrono::NaiveDate;

use crate::errors::AppError;
use crate::notify::template::{render, TemplateOptions};
use crate::pipeline::state::Status;

/// One bulk-notification purpose. Holds the campaign-specific payload
/// already validated by `validate`.
#[derive(Debug, Clone)]
pub enum Campaign {
    TestInvite {
        test_link: String,
        message: Option<String>,
    },
    InterviewInvite {
        interview_link: String,
        interview_type: String,
        message: Option<String>,
    },
    Onboarding {
        message: Option<String>,
        start_date: Option<NaiveDate>,
    },
}

impl Campaign {
    /// Whole-batch payload precondition: the campaign's link field must be
    /// present and non-blank. Onboarding has no required field.
    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            Campaign::TestInvite { test_link, .. } if test_link.trim().is_empty() => Err(
                AppError::Validation("testLink is required and must not be blank".to_string()),
            ),
            Campaign::InterviewInvite { interview_link, .. }
                if interview_link.trim().is_empty() =>
            {
                Err(AppError::Validation(
                    "interviewLink is required and must not be blank".to_string(),
                ))
            }
            _ => Ok(()),
        }
    }

    /// The status every originally requested applicant is moved to on
    /// transport success. The interview round is picked by the content of
    /// the interview-type string: anything mentioning "2" targets round 2.
    pub fn target_status(&self) -> Status {
        match self {
            Campaign::TestInvite { .. } => Status::TestSent,
            Campaign::InterviewInvite { interview_type, .. } => {
                if interview_type.contains('2') {
                    Status::Interview2Scheduled
                } else {
                    Status::Interview1Scheduled
                }
            }
            Campaign::Onboarding { .. } => Status::Selected,
        }
    }

    pub fn subject(&self, job_title: &str) -> String {
        match self {
            Campaign::TestInvite { .. } => format!("Assessment Test Invitation - {job_title}"),
            Campaign::InterviewInvite { .. } => format!("Interview Invitation - {job_title}"),
            Campaign::Onboarding { .. } => format!("Welcome Aboard - {job_title}"),
        }
    }

    fn header_line(&self) -> &'static str {
        match self {
            Campaign::TestInvite { .. } => "Assessment Test Invitation",
            Campaign::InterviewInvite { .. } => "Interview Invitation",
            Campaign::Onboarding { .. } => "Welcome Aboard",
        }
    }

    fn default_message(&self) -> &'static str {
        match self {
            Campaign::TestInvite { .. } => {
                "You have been invited to take the assessment test for this position."
            }
            Campaign::InterviewInvite { .. } => {
                "You have been invited to an interview for this position."
            }
            Campaign::Onboarding { .. } => {
                "Congratulations! We are delighted to welcome you to the team."
            }
        }
    }

    /// Renders the single HTML body shared by the whole cohort,
    /// personalized with the job title and the owning HR's name/company.
    pub fn compose_body(&self, job_title: &str, company_name: &str, hr_name: &str) -> String {
        let (message, cta) = match self {
            Campaign::TestInvite { test_link, message } => (
                message.as_deref(),
                Some((test_link.as_str(), "Take the Test")),
            ),
            Campaign::InterviewInvite {
                interview_link,
                message,
                ..
            } => (
                message.as_deref(),
                Some((interview_link.as_str(), "Join the Interview")),
            ),
            Campaign::Onboarding { message, .. } => (message.as_deref(), None),
        };
        render(&TemplateOptions {
            company_name,
            job_title,
            hr_name,
            header_line: self.header_line(),
            message: message
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| self.default_message()),
            cta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_invite(link: &str) -> Campaign {
        Campaign::TestInvite {
            test_link: link.to_string(),
            message: None,
        }
    }

    #[test]
    fn test_blank_link_fails_validation() {
        assert!(matches!(
            test_invite("  ").validate(),
            Err(AppError::Validation(_))
        ));
        assert!(test_invite("https://t.example/1").validate().is_ok());

        let interview = Campaign::InterviewInvite {
            interview_link: String::new(),
            interview_type: "Interview 1".to_string(),
            message: None,
        };
        assert!(matches!(
            interview.validate(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_onboarding_needs_no_payload() {
        let campaign = Campaign::Onboarding {
            message: None,
            start_date: None,
        };
        assert!(campaign.validate().is_ok());
    }

    #[test]
    fn test_target_status_per_campaign() {
        assert_eq!(test_invite("x").target_status(), Status::TestSent);

        let round = |interview_type: &str| {
            Campaign::InterviewInvite {
                interview_link: "x".to_string(),
                interview_type: interview_type.to_string(),
                message: None,
            }
            .target_status()
        };
        assert_eq!(round("interview_1"), Status::Interview1Scheduled);
        assert_eq!(round("Round 2"), Status::Interview2Scheduled);
        assert_eq!(round("technical"), Status::Interview1Scheduled);

        let onboarding = Campaign::Onboarding {
            message: None,
            start_date: None,
        };
        assert_eq!(onboarding.target_status(), Status::Selected);
    }

    #[test]
    fn test_compose_uses_custom_message_over_default() {
        let campaign = Campaign::TestInvite {
            test_link: "https://t.example/1".to_string(),
            message: Some("Complete by Friday.".to_string()),
        };
        let body = campaign.compose_body("Platform Engineer", "Acme", "Dana");
        assert!(body.contains("Complete by Friday."));
        assert!(body.contains("https://t.example/1"));
        assert!(body.contains("Platform Engineer"));

        let blank_message = Campaign::TestInvite {
            test_link: "https://t.example/1".to_string(),
            message: Some("   ".to_string()),
        };
        let body = blank_message.compose_body("Platform Engineer", "Acme", "Dana");
        assert!(body.contains("invited to take the assessment test"));
    }
}
