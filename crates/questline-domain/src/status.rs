//! Submission status literals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Review state of a submission.
///
/// Stored as its snake_case literal. Any value may be set directly; there is
/// no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    Pending,
    PendingReview,
    Approved,
    Denied,
    CompletedStep,
}

/// Returned when a string is not one of the known status literals.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown submission status: {0}")]
pub struct UnknownStatus(pub String);

impl SubmissionStatus {
    pub const ALL: [SubmissionStatus; 5] = [
        Self::Pending,
        Self::PendingReview,
        Self::Approved,
        Self::Denied,
        Self::CompletedStep,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::PendingReview => "pending_review",
            Self::Approved => "approved",
            Self::Denied => "denied",
            Self::CompletedStep => "completed_step",
        }
    }

    /// Whether an onboarding step with this status counts as done.
    pub fn is_completion(self) -> bool {
        matches!(self, Self::Approved | Self::CompletedStep)
    }

    /// A reviewer's decision on a challenge submission.
    pub fn is_verdict(self) -> bool {
        matches!(self, Self::Approved | Self::Denied)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubmissionStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}
