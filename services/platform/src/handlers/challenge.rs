use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use questline_auth_types::identity::Identity;
use questline_core::extract::{ApiJson, ApiPath, ApiQuery};
use questline_domain::pagination::PageRequest;

use crate::domain::types::Challenge;
use crate::error::PlatformError;
use crate::state::AppState;
use crate::usecase::challenge::{
    CreateChallengeInput, CreateChallengeUseCase, GetChallengeUseCase, ListChallengesUseCase,
};

#[derive(Serialize)]
pub struct ChallengeResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub points: i32,
    #[serde(serialize_with = "questline_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "questline_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Challenge> for ChallengeResponse {
    fn from(c: Challenge) -> Self {
        Self {
            id: c.id.to_string(),
            title: c.title,
            description: c.description,
            points: c.points,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

// ── GET /challenges ──────────────────────────────────────────────────────────

pub async fn list_challenges(
    _identity: Identity,
    State(state): State<AppState>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> Result<Json<Vec<ChallengeResponse>>, PlatformError> {
    let usecase = ListChallengesUseCase {
        repo: state.challenge_repo(),
    };
    let challenges = usecase.execute(page).await?;
    Ok(Json(challenges.into_iter().map(Into::into).collect()))
}

// ── GET /challenges/{id} ─────────────────────────────────────────────────────

pub async fn get_challenge(
    _identity: Identity,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<ChallengeResponse>, PlatformError> {
    let usecase = GetChallengeUseCase {
        repo: state.challenge_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /challenges ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateChallengeRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub points: i32,
}

pub async fn create_challenge(
    identity: Identity,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateChallengeRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), PlatformError> {
    if !identity.is_admin() {
        return Err(PlatformError::Forbidden);
    }
    let usecase = CreateChallengeUseCase {
        repo: state.challenge_repo(),
    };
    let id = usecase
        .execute(CreateChallengeInput {
            title: body.title,
            description: body.description,
            points: body.points,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: id.to_string() }),
    ))
}
