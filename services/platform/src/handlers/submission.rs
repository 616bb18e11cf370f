use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use questline_auth_types::identity::Identity;
use questline_core::extract::{ApiJson, ApiPath, ApiQuery};
use questline_domain::pagination::PageRequest;
use questline_domain::status::SubmissionStatus;

use crate::domain::types::Submission;
use crate::error::PlatformError;
use crate::handlers::challenge::CreatedResponse;
use crate::state::AppState;
use crate::usecase::submission::{
    CreateSubmissionInput, CreateSubmissionUseCase, ListSubmissionsUseCase,
    UpdateSubmissionStatusUseCase,
};

#[derive(Serialize)]
pub struct SubmissionResponse {
    pub id: String,
    pub user_id: String,
    pub challenge_id: Option<String>,
    pub step_id: Option<String>,
    pub content: String,
    pub status: SubmissionStatus,
    #[serde(serialize_with = "questline_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "questline_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Submission> for SubmissionResponse {
    fn from(s: Submission) -> Self {
        Self {
            id: s.id.to_string(),
            user_id: s.user_id.to_string(),
            challenge_id: s.target.challenge_id().map(|id| id.to_string()),
            step_id: s.target.step_id().map(|id| id.to_string()),
            content: s.content,
            status: s.status,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

// ── POST /submissions ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSubmissionRequest {
    pub challenge_id: Option<Uuid>,
    pub step_id: Option<Uuid>,
    #[serde(default)]
    pub content: String,
    pub status: Option<SubmissionStatus>,
}

pub async fn create_submission(
    identity: Identity,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateSubmissionRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), PlatformError> {
    let usecase = CreateSubmissionUseCase {
        submissions: state.submission_repo(),
        challenges: state.challenge_repo(),
        steps: state.step_repo(),
        users: state.user_repo(),
    };
    let id = usecase
        .execute(CreateSubmissionInput {
            user_id: identity.user_id,
            challenge_id: body.challenge_id,
            step_id: body.step_id,
            content: body.content,
            status: body.status,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: id.to_string() }),
    ))
}

// ── GET /submissions ─────────────────────────────────────────────────────────

// Flattening `PageRequest` here would break number parsing in
// `serde_urlencoded`, so the page fields are spelled out.
#[derive(Deserialize)]
pub struct ListSubmissionsQuery {
    pub status: Option<SubmissionStatus>,
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl ListSubmissionsQuery {
    fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest {
            per_page: self.per_page.unwrap_or(defaults.per_page),
            page: self.page.unwrap_or(defaults.page),
        }
    }
}

pub async fn list_submissions(
    identity: Identity,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListSubmissionsQuery>,
) -> Result<Json<Vec<SubmissionResponse>>, PlatformError> {
    let usecase = ListSubmissionsUseCase {
        repo: state.submission_repo(),
    };
    let submissions = usecase
        .execute(identity.user_id, query.status, query.page_request())
        .await?;
    Ok(Json(submissions.into_iter().map(Into::into).collect()))
}

// ── PATCH /submissions/{id} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateSubmissionRequest {
    pub status: SubmissionStatus,
}

pub async fn update_submission(
    identity: Identity,
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<UpdateSubmissionRequest>,
) -> Result<StatusCode, PlatformError> {
    let usecase = UpdateSubmissionStatusUseCase {
        submissions: state.submission_repo(),
        challenges: state.challenge_repo(),
    };
    usecase.execute(&identity, id, body.status).await?;
    Ok(StatusCode::NO_CONTENT)
}
