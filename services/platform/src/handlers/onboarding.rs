use axum::{Json, extract::State};
use serde::Serialize;
use uuid::Uuid;

use questline_auth_types::identity::Identity;
use questline_core::extract::ApiPath;
use questline_domain::status::SubmissionStatus;

use crate::domain::types::OnboardingStep;
use crate::error::PlatformError;
use crate::state::AppState;
use crate::usecase::onboarding::{GetProgressUseCase, GetStepUseCase, ListStepsUseCase};

#[derive(Serialize)]
pub struct StepResponse {
    pub id: String,
    pub position: i32,
    pub title: String,
    pub description: String,
    pub challenge_id: Option<String>,
    #[serde(serialize_with = "questline_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<OnboardingStep> for StepResponse {
    fn from(step: OnboardingStep) -> Self {
        Self {
            id: step.id.to_string(),
            position: step.position,
            title: step.title,
            description: step.description,
            challenge_id: step.challenge_id.map(|id| id.to_string()),
            created_at: step.created_at,
        }
    }
}

// ── GET /onboarding/steps ────────────────────────────────────────────────────

pub async fn list_steps(
    _identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<StepResponse>>, PlatformError> {
    let usecase = ListStepsUseCase {
        repo: state.step_repo(),
    };
    let steps = usecase.execute().await?;
    Ok(Json(steps.into_iter().map(Into::into).collect()))
}

// ── GET /onboarding/steps/{id} ───────────────────────────────────────────────

pub async fn get_step(
    _identity: Identity,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<StepResponse>, PlatformError> {
    let usecase = GetStepUseCase {
        repo: state.step_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── GET /onboarding/progress ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct StepProgressResponse {
    pub step_id: String,
    pub position: i32,
    pub title: String,
    pub status: Option<SubmissionStatus>,
}

#[derive(Serialize)]
pub struct ProgressResponse {
    pub steps: Vec<StepProgressResponse>,
    pub completed: usize,
    pub total: usize,
}

pub async fn get_progress(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<ProgressResponse>, PlatformError> {
    let usecase = GetProgressUseCase {
        repo: state.step_repo(),
    };
    let summary = usecase.execute(identity.user_id).await?;
    Ok(Json(ProgressResponse {
        steps: summary
            .steps
            .into_iter()
            .map(|s| StepProgressResponse {
                step_id: s.step_id.to_string(),
                position: s.position,
                title: s.title,
                status: s.status,
            })
            .collect(),
        completed: summary.completed,
        total: summary.total,
    }))
}
