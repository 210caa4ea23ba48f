pub mod applicant;
pub mod hr;
pub mod job;
