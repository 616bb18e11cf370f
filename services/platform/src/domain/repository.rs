#![allow(async_fn_in_trait)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use questline_domain::pagination::PageRequest;
use questline_domain::status::SubmissionStatus;

use crate::domain::types::{
    Challenge, OnboardingStep, PointsAward, StepProgress, Submission, User,
};
use crate::error::PlatformError;

/// Repository for player profiles.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PlatformError>;

    /// Insert a profile. Fails with `UserAlreadyExists` on an id or email clash.
    async fn create(&self, user: &User) -> Result<(), PlatformError>;
}

/// Repository for the challenge catalogue.
pub trait ChallengeRepository: Send + Sync {
    /// Newest first.
    async fn list(&self, page: PageRequest) -> Result<Vec<Challenge>, PlatformError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Challenge>, PlatformError>;
    async fn create(&self, challenge: &Challenge) -> Result<(), PlatformError>;
}

/// Repository for onboarding steps.
pub trait StepRepository: Send + Sync {
    /// All steps in ascending `position`.
    async fn list(&self) -> Result<Vec<OnboardingStep>, PlatformError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OnboardingStep>, PlatformError>;

    /// Every step left-joined with the user's latest submission for it,
    /// in ascending `position`.
    async fn progress(&self, user_id: Uuid) -> Result<Vec<StepProgress>, PlatformError>;
}

/// Repository for submissions.
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: &Submission) -> Result<(), PlatformError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>, PlatformError>;

    /// The user's submissions, newest first, optionally filtered by status.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        status: Option<SubmissionStatus>,
        page: PageRequest,
    ) -> Result<Vec<Submission>, PlatformError>;

    /// Overwrite the status (last write wins).
    ///
    /// With `award`, the points are credited in the same transaction unless
    /// this submission has already paid out. Returns `true` if they were.
    async fn update_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
        award: Option<PointsAward>,
    ) -> Result<bool, PlatformError>;
}

/// Wall-clock source. Lets tests pin the verification window.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
