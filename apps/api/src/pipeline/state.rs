//! Pipeline state model — the hiring stage vocabulary and the transition
//! function each workflow action causes.
//!
//! Transitions are *caused*, not validated: every action maps to a fixed
//! target status regardless of the current one, and `Selected`/`Rejected`
//! stay mutable. The permissive table is deliberate product behavior
//! (see DESIGN.md) — do not add a rejecting transition table here.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Hiring stage of an applicant. Wire representation is the literal
/// variant string (`Test_Sent`, `Interview1_Scheduled`, ...); clients
/// treat unknown strings as forward-compatible unknowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Applied,
    #[serde(rename = "Test_Sent")]
    TestSent,
    #[serde(rename = "Test_Cleared")]
    TestCleared,
    #[serde(rename = "Interview1_Scheduled")]
    Interview1Scheduled,
    #[serde(rename = "Interview1_Cleared")]
    Interview1Cleared,
    #[serde(rename = "Interview2_Scheduled")]
    Interview2Scheduled,
    #[serde(rename = "Interview2_Cleared")]
    Interview2Cleared,
    Selected,
    Rejected,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Applied => "Applied",
            Status::TestSent => "Test_Sent",
            Status::TestCleared => "Test_Cleared",
            Status::Interview1Scheduled => "Interview1_Scheduled",
            Status::Interview1Cleared => "Interview1_Cleared",
            Status::Interview2Scheduled => "Interview2_Scheduled",
            Status::Interview2Cleared => "Interview2_Cleared",
            Status::Selected => "Selected",
            Status::Rejected => "Rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Applied" => Some(Status::Applied),
            "Test_Sent" => Some(Status::TestSent),
            "Test_Cleared" => Some(Status::TestCleared),
            "Interview1_Scheduled" => Some(Status::Interview1Scheduled),
            "Interview1_Cleared" => Some(Status::Interview1Cleared),
            "Interview2_Scheduled" => Some(Status::Interview2Scheduled),
            "Interview2_Cleared" => Some(Status::Interview2Cleared),
            "Selected" => Some(Status::Selected),
            "Rejected" => Some(Status::Rejected),
            _ => None,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Applied
    }
}

/// Outcome of the aptitude test round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AptitudeOutcome {
    #[serde(rename = "NA")]
    Na,
    Cleared,
    #[serde(rename = "Not_Cleared")]
    NotCleared,
    #[serde(rename = "Performing_Test")]
    PerformingTest,
}

impl AptitudeOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            AptitudeOutcome::Na => "NA",
            AptitudeOutcome::Cleared => "Cleared",
            AptitudeOutcome::NotCleared => "Not_Cleared",
            AptitudeOutcome::PerformingTest => "Performing_Test",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NA" => Some(AptitudeOutcome::Na),
            "Cleared" => Some(AptitudeOutcome::Cleared),
            "Not_Cleared" => Some(AptitudeOutcome::NotCleared),
            "Performing_Test" => Some(AptitudeOutcome::PerformingTest),
            _ => None,
        }
    }
}

/// Outcome of an interview round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterviewOutcome {
    #[serde(rename = "NA")]
    Na,
    Cleared,
    #[serde(rename = "Not_Cleared")]
    NotCleared,
    Undergoing,
}

impl InterviewOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterviewOutcome::Na => "NA",
            InterviewOutcome::Cleared => "Cleared",
            InterviewOutcome::NotCleared => "Not_Cleared",
            InterviewOutcome::Undergoing => "Undergoing",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "NA" => Some(InterviewOutcome::Na),
            "Cleared" => Some(InterviewOutcome::Cleared),
            "Not_Cleared" => Some(InterviewOutcome::NotCleared),
            "Undergoing" => Some(InterviewOutcome::Undergoing),
            _ => None,
        }
    }
}

/// A workflow action: recording the outcome of one recruitment round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowAction {
    Aptitude(AptitudeOutcome),
    Interview1(InterviewOutcome),
    Interview2(InterviewOutcome),
}

/// Computes the status caused by a workflow action.
///
/// Every non-`NA` outcome maps to a fixed target no matter what `current`
/// is; `NA` leaves the status alone. Nothing is rejected: jumping from
/// `Applied` straight to `Interview2_Cleared` is allowed.
pub fn next(current: Status, action: WorkflowAction) -> Status {
    match action {
        WorkflowAction::Aptitude(outcome) => match outcome {
            AptitudeOutcome::Cleared => Status::TestCleared,
            AptitudeOutcome::NotCleared => Status::Rejected,
            AptitudeOutcome::PerformingTest => Status::TestSent,
            AptitudeOutcome::Na => current,
        },
        WorkflowAction::Interview1(outcome) => match outcome {
            InterviewOutcome::Cleared => Status::Interview1Cleared,
            InterviewOutcome::NotCleared => Status::Rejected,
            InterviewOutcome::Undergoing => Status::Interview1Scheduled,
            InterviewOutcome::Na => current,
        },
        WorkflowAction::Interview2(outcome) => match outcome {
            InterviewOutcome::Cleared => Status::Interview2Cleared,
            InterviewOutcome::NotCleared => Status::Rejected,
            InterviewOutcome::Undergoing => Status::Interview2Scheduled,
            InterviewOutcome::Na => current,
        },
    }
}

/// Parses a stored status string, treating unknown values as a data fault.
pub fn parse_status(s: &str) -> Result<Status, AppError> {
    Status::parse(s)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Unknown applicant status '{s}'")))
}
