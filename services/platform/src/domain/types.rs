use chrono::{DateTime, Utc};
use uuid::Uuid;

use questline_domain::status::SubmissionStatus;
use questline_domain::user::UserRole;

/// Player profile.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
    pub points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A challenge players submit work against.
#[derive(Debug, Clone)]
pub struct Challenge {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One step of the onboarding track.
#[derive(Debug, Clone)]
pub struct OnboardingStep {
    pub id: Uuid,
    pub position: i32,
    pub title: String,
    pub description: String,
    pub challenge_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// What a submission was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionTarget {
    Challenge(Uuid),
    Step(Uuid),
}

impl SubmissionTarget {
    /// Build from the two optional ids of a request or row. Exactly one must be set.
    pub fn from_ids(challenge_id: Option<Uuid>, step_id: Option<Uuid>) -> Option<Self> {
        match (challenge_id, step_id) {
            (Some(id), None) => Some(Self::Challenge(id)),
            (None, Some(id)) => Some(Self::Step(id)),
            _ => None,
        }
    }

    pub fn challenge_id(self) -> Option<Uuid> {
        match self {
            Self::Challenge(id) => Some(id),
            Self::Step(_) => None,
        }
    }

    pub fn step_id(self) -> Option<Uuid> {
        match self {
            Self::Step(id) => Some(id),
            Self::Challenge(_) => None,
        }
    }

    /// Status a new submission gets when the caller does not pick one.
    pub fn default_status(self) -> SubmissionStatus {
        match self {
            Self::Challenge(_) => SubmissionStatus::Pending,
            Self::Step(_) => SubmissionStatus::CompletedStep,
        }
    }
}

/// A player's submission.
#[derive(Debug, Clone)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub target: SubmissionTarget,
    pub content: String,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An onboarding step joined with the caller's latest submission for it.
#[derive(Debug, Clone)]
pub struct StepProgress {
    pub step_id: Uuid,
    pub position: i32,
    pub title: String,
    pub status: Option<SubmissionStatus>,
}

impl StepProgress {
    pub fn is_completed(&self) -> bool {
        self.status.is_some_and(SubmissionStatus::is_completion)
    }
}

/// Points credited to a submitter when their challenge submission is approved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsAward {
    pub user_id: Uuid,
    pub points: i32,
}

/// Maximum display-name / title length in characters.
pub const MAX_NAME_LEN: usize = 80;

/// Non-blank after trimming and at most [`MAX_NAME_LEN`] characters.
pub fn validate_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= MAX_NAME_LEN
}
