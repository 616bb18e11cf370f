use uuid::Uuid;

use crate::domain::repository::StepRepository;
use crate::domain::types::{OnboardingStep, StepProgress};
use crate::error::PlatformError;

// ── ListSteps ────────────────────────────────────────────────────────────────

pub struct ListStepsUseCase<R: StepRepository> {
    pub repo: R,
}

impl<R: StepRepository> ListStepsUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<OnboardingStep>, PlatformError> {
        self.repo.list().await
    }
}

// ── GetStep ──────────────────────────────────────────────────────────────────

pub struct GetStepUseCase<R: StepRepository> {
    pub repo: R,
}

impl<R: StepRepository> GetStepUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<OnboardingStep, PlatformError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(PlatformError::StepNotFound)
    }
}

// ── GetProgress ──────────────────────────────────────────────────────────────

/// Caller's onboarding progress.
#[derive(Debug)]
pub struct ProgressSummary {
    pub steps: Vec<StepProgress>,
    pub completed: usize,
    pub total: usize,
}

pub struct GetProgressUseCase<R: StepRepository> {
    pub repo: R,
}

impl<R: StepRepository> GetProgressUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<ProgressSummary, PlatformError> {
        let steps = self.repo.progress(user_id).await?;
        let completed = steps.iter().filter(|s| s.is_completed()).count();
        Ok(ProgressSummary {
            total: steps.len(),
            completed,
            steps,
        })
    }
}
