use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use questline_auth_types::identity::Identity;
use questline_core::extract::ApiJson;

use crate::error::PlatformError;
use crate::state::AppState;
use crate::usecase::verify::{CurrentCodeUseCase, VerifyCodeUseCase};

// ── POST /verify ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyRequest {
    pub code: String,
}

#[derive(Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: &'static str,
}

/// A wrong code is a normal outcome, not an error: both answers are 200.
pub async fn verify_code(
    identity: Identity,
    State(state): State<AppState>,
    ApiJson(body): ApiJson<VerifyRequest>,
) -> Json<VerifyResponse> {
    let usecase = VerifyCodeUseCase {
        clock: state.clock.clone(),
        settings: state.verify.clone(),
    };
    let success = usecase.execute(identity.user_id, &body.code);
    Json(VerifyResponse {
        success,
        message: if success {
            "Code verified"
        } else {
            "Invalid code"
        },
    })
}

// ── GET /verify/current ──────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CurrentCodeResponse {
    pub code: String,
    pub window: i64,
    #[serde(serialize_with = "questline_core::serde::to_rfc3339_ms")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

pub async fn current_code(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<CurrentCodeResponse>, PlatformError> {
    if !identity.is_admin() {
        return Err(PlatformError::Forbidden);
    }
    let usecase = CurrentCodeUseCase {
        clock: state.clock.clone(),
        settings: state.verify.clone(),
    };
    let current = usecase.execute()?;
    Ok(Json(CurrentCodeResponse {
        code: current.code,
        window: current.window.0,
        expires_at: current.expires_at,
    }))
}
