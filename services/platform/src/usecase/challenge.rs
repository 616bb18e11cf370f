use chrono::Utc;
use uuid::Uuid;

use questline_domain::pagination::PageRequest;

use crate::domain::repository::ChallengeRepository;
use crate::domain::types::{Challenge, validate_name};
use crate::error::PlatformError;

// ── ListChallenges ───────────────────────────────────────────────────────────

pub struct ListChallengesUseCase<R: ChallengeRepository> {
    pub repo: R,
}

impl<R: ChallengeRepository> ListChallengesUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<Challenge>, PlatformError> {
        self.repo.list(page.clamped()).await
    }
}

// ── GetChallenge ─────────────────────────────────────────────────────────────

pub struct GetChallengeUseCase<R: ChallengeRepository> {
    pub repo: R,
}

impl<R: ChallengeRepository> GetChallengeUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Challenge, PlatformError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(PlatformError::ChallengeNotFound)
    }
}

// ── CreateChallenge ──────────────────────────────────────────────────────────

pub struct CreateChallengeInput {
    pub title: String,
    pub description: String,
    pub points: i32,
}

/// Admin-only; the role check happens in the handler.
pub struct CreateChallengeUseCase<R: ChallengeRepository> {
    pub repo: R,
}

impl<R: ChallengeRepository> CreateChallengeUseCase<R> {
    pub async fn execute(&self, input: CreateChallengeInput) -> Result<Uuid, PlatformError> {
        if !validate_name(&input.title) {
            return Err(PlatformError::InvalidTitle);
        }
        if input.points < 0 {
            return Err(PlatformError::InvalidPoints);
        }
        let now = Utc::now();
        let challenge = Challenge {
            id: Uuid::now_v7(),
            title: input.title.trim().to_owned(),
            description: input.description,
            points: input.points,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&challenge).await?;
        tracing::info!(challenge_id = %challenge.id, points = challenge.points, "challenge created");
        Ok(challenge.id)
    }
}
