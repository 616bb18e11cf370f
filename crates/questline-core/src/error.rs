use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors raised by shared extractors before a handler runs.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("bad request")]
    BadRequest { detail: String },
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::BadRequest { .. } => "BAD_REQUEST",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest {
            detail: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest {
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest {
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({
                    "kind": self.kind(),
                    "message": self.to_string(),
                }),
            ),
            Self::BadRequest { detail } => {
                tracing::debug!(detail = %detail, "rejected request body");
                (
                    StatusCode::BAD_REQUEST,
                    serde_json::json!({
                        "kind": self.kind(),
                        "message": self.to_string(),
                        "detail": detail,
                    }),
                )
            }
        };
        (status, axum::Json(body)).into_response()
    }
}
