use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Platform service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("user not found")]
    UserNotFound,
    #[error("challenge not found")]
    ChallengeNotFound,
    #[error("onboarding step not found")]
    StepNotFound,
    #[error("submission not found")]
    SubmissionNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("invalid display name")]
    InvalidDisplayName,
    #[error("invalid title")]
    InvalidTitle,
    #[error("invalid points")]
    InvalidPoints,
    #[error("exactly one of challenge_id or step_id is required")]
    InvalidTarget,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PlatformError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::ChallengeNotFound => "CHALLENGE_NOT_FOUND",
            Self::StepNotFound => "STEP_NOT_FOUND",
            Self::SubmissionNotFound => "SUBMISSION_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::InvalidDisplayName => "INVALID_DISPLAY_NAME",
            Self::InvalidTitle => "INVALID_TITLE",
            Self::InvalidPoints => "INVALID_POINTS",
            Self::InvalidTarget => "INVALID_TARGET",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::ChallengeNotFound
            | Self::StepNotFound
            | Self::SubmissionNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyExists => StatusCode::CONFLICT,
            Self::InvalidDisplayName
            | Self::InvalidTitle
            | Self::InvalidPoints
            | Self::InvalidTarget => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client errors and TraceLayer already records them.
        // Internal errors carry the anyhow chain so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
