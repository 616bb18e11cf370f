use chrono::Utc;
use uuid::Uuid;

use questline_auth_types::identity::Identity;
use questline_domain::pagination::PageRequest;
use questline_domain::status::SubmissionStatus;

use crate::domain::repository::{
    ChallengeRepository, StepRepository, SubmissionRepository, UserRepository,
};
use crate::domain::types::{PointsAward, Submission, SubmissionTarget};
use crate::error::PlatformError;

// ── CreateSubmission ─────────────────────────────────────────────────────────

pub struct CreateSubmissionInput {
    pub user_id: Uuid,
    pub challenge_id: Option<Uuid>,
    pub step_id: Option<Uuid>,
    pub content: String,
    pub status: Option<SubmissionStatus>,
}

pub struct CreateSubmissionUseCase<S, C, T, U>
where
    S: SubmissionRepository,
    C: ChallengeRepository,
    T: StepRepository,
    U: UserRepository,
{
    pub submissions: S,
    pub challenges: C,
    pub steps: T,
    pub users: U,
}

impl<S, C, T, U> CreateSubmissionUseCase<S, C, T, U>
where
    S: SubmissionRepository,
    C: ChallengeRepository,
    T: StepRepository,
    U: UserRepository,
{
    /// Duplicates are allowed; every call inserts a new row.
    ///
    /// The caller needs a profile first (`POST /users`).
    pub async fn execute(&self, input: CreateSubmissionInput) -> Result<Uuid, PlatformError> {
        let target = SubmissionTarget::from_ids(input.challenge_id, input.step_id)
            .ok_or(PlatformError::InvalidTarget)?;
        if self.users.find_by_id(input.user_id).await?.is_none() {
            return Err(PlatformError::UserNotFound);
        }
        match target {
            SubmissionTarget::Challenge(id) => {
                if self.challenges.find_by_id(id).await?.is_none() {
                    return Err(PlatformError::ChallengeNotFound);
                }
            }
            SubmissionTarget::Step(id) => {
                if self.steps.find_by_id(id).await?.is_none() {
                    return Err(PlatformError::StepNotFound);
                }
            }
        }
        let now = Utc::now();
        let submission = Submission {
            id: Uuid::now_v7(),
            user_id: input.user_id,
            target,
            content: input.content,
            status: input.status.unwrap_or_else(|| target.default_status()),
            created_at: now,
            updated_at: now,
        };
        self.submissions.create(&submission).await?;
        tracing::info!(
            submission_id = %submission.id,
            user_id = %submission.user_id,
            status = %submission.status,
            "submission created"
        );
        Ok(submission.id)
    }
}

// ── ListSubmissions ──────────────────────────────────────────────────────────

pub struct ListSubmissionsUseCase<S: SubmissionRepository> {
    pub repo: S,
}

impl<S: SubmissionRepository> ListSubmissionsUseCase<S> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        status: Option<SubmissionStatus>,
        page: PageRequest,
    ) -> Result<Vec<Submission>, PlatformError> {
        self.repo
            .list_by_user(user_id, status, page.clamped())
            .await
    }
}

// ── UpdateSubmissionStatus ───────────────────────────────────────────────────

pub struct UpdateSubmissionStatusUseCase<S, C>
where
    S: SubmissionRepository,
    C: ChallengeRepository,
{
    pub submissions: S,
    pub challenges: C,
}

impl<S, C> UpdateSubmissionStatusUseCase<S, C>
where
    S: SubmissionRepository,
    C: ChallengeRepository,
{
    /// Owner or admin only. Any status may follow any other, but only an
    /// admin may give or take back a verdict on a challenge submission.
    ///
    /// Moving a challenge submission to `approved` credits the challenge's
    /// points to the submitter. The repository marks the submission as
    /// credited in the same transaction, so it pays out at most once.
    pub async fn execute(
        &self,
        caller: &Identity,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<(), PlatformError> {
        let submission = self
            .submissions
            .find_by_id(id)
            .await?
            .ok_or(PlatformError::SubmissionNotFound)?;
        if submission.user_id != caller.user_id && !caller.is_admin() {
            return Err(PlatformError::Forbidden);
        }
        if !caller.is_admin()
            && matches!(submission.target, SubmissionTarget::Challenge(_))
            && (status.is_verdict() || submission.status.is_verdict())
        {
            return Err(PlatformError::Forbidden);
        }

        let award = match submission.target {
            SubmissionTarget::Challenge(challenge_id)
                if status == SubmissionStatus::Approved
                    && submission.status != SubmissionStatus::Approved =>
            {
                let challenge = self
                    .challenges
                    .find_by_id(challenge_id)
                    .await?
                    .ok_or(PlatformError::ChallengeNotFound)?;
                Some(PointsAward {
                    user_id: submission.user_id,
                    points: challenge.points,
                })
            }
            _ => None,
        };

        let credited = self.submissions.update_status(id, status, award).await?;
        if credited {
            tracing::info!(
                submission_id = %id,
                user_id = %submission.user_id,
                points = award.map_or(0, |a| a.points),
                "challenge points credited"
            );
        }
        tracing::debug!(submission_id = %id, from = %submission.status, to = %status, "submission status updated");
        Ok(())
    }
}
