use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use questline_auth_types::token::JwtSecret;

use crate::domain::repository::Clock;
use crate::domain::verification::VerifySettings;
use crate::infra::db::{
    DbChallengeRepository, DbStepRepository, DbSubmissionRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub verify: Arc<VerifySettings>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn challenge_repo(&self) -> DbChallengeRepository {
        DbChallengeRepository {
            db: self.db.clone(),
        }
    }

    pub fn step_repo(&self) -> DbStepRepository {
        DbStepRepository {
            db: self.db.clone(),
        }
    }

    pub fn submission_repo(&self) -> DbSubmissionRepository {
        DbSubmissionRepository {
            db: self.db.clone(),
        }
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}
