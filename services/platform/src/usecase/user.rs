use chrono::Utc;
use uuid::Uuid;

use questline_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{User, validate_name};
use crate::error::PlatformError;

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    /// The caller's token subject; becomes the profile id.
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
}

pub struct CreateUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> CreateUserUseCase<R> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<User, PlatformError> {
        if !validate_name(&input.display_name) {
            return Err(PlatformError::InvalidDisplayName);
        }
        if self.repo.find_by_id(input.user_id).await?.is_some() {
            return Err(PlatformError::UserAlreadyExists);
        }
        let now = Utc::now();
        let user = User {
            id: input.user_id,
            email: input.email,
            display_name: input.display_name.trim().to_owned(),
            role: UserRole::Member,
            points: 0,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        tracing::info!(user_id = %user.id, "user profile created");
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetUserUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, PlatformError> {
        self.repo
            .find_by_id(user_id)
            .await?
            .ok_or(PlatformError::UserNotFound)
    }
}
