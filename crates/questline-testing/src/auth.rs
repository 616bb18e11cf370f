//! Mock caller helpers for router tests.
//!
//! The hosted auth provider normally mints the bearer token. In tests,
//! `MockAuth` signs one with the shared test secret so requests pass the
//! `Identity` extractor without a real provider.

use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;

use questline_auth_types::token::{JwtSecret, issue_access_token};
use questline_domain::user::UserRole;

/// Secret used by every test router.
pub const TEST_JWT_SECRET: &str = "questline-test-jwt-secret";

pub fn test_secret() -> JwtSecret {
    JwtSecret::new(TEST_JWT_SECRET)
}

/// Configurable caller injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl MockAuth {
    pub fn member(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: UserRole::Member,
        }
    }

    pub fn admin(user_id: Uuid) -> Self {
        Self {
            user_id,
            role: UserRole::Admin,
        }
    }

    /// Signed access token valid for one hour.
    pub fn token(&self) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_secs()
            + 3600;
        issue_access_token(self.user_id, self.role, exp, &test_secret())
            .expect("failed to sign test token")
    }
}
