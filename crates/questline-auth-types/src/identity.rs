//! Bearer-token identity extractor.

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use http::request::Parts;
use uuid::Uuid;

use questline_core::error::AppError;
use questline_domain::user::UserRole;

use crate::token::{JwtSecret, validate_access_token};

/// Caller identity resolved from `Authorization: Bearer <jwt>`.
///
/// Rejects with 401 when the header is absent, not a bearer credential, or
/// the token fails validation. Role enforcement (403) is done by handlers.
/// The secret is read from router state through `FromRef`.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role >= UserRole::Admin
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = AppError;

    // Resolve synchronously and hand back a 'static future; the trait's
    // `impl Future + Send` return must not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let resolved = match parts.headers.typed_get::<Authorization<Bearer>>() {
            None => {
                tracing::debug!("missing bearer credential");
                Err(AppError::Unauthorized)
            }
            Some(Authorization(bearer)) => validate_access_token(bearer.token(), &secret)
                .map(|info| Self {
                    user_id: info.user_id,
                    role: info.role,
                })
                .map_err(|e| {
                    tracing::debug!(error = %e, "rejected bearer credential");
                    AppError::Unauthorized
                }),
        };

        async move { resolved }
    }
}
