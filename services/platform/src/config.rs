use serde::Deserialize;

use questline_core::config::Config;

/// Platform service configuration, read once at startup from the environment.
#[derive(Deserialize)]
pub struct PlatformConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HS256 secret shared with the auth provider. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// Reference subject hashed into verification codes. Env var: `VERIFY_SUBJECT_ID`.
    pub verify_subject_id: String,
    /// Secret salt hashed into verification codes. Env var: `VERIFY_SALT`.
    pub verify_salt: String,
    /// TCP port for the HTTP server (default 3120). Env var: `PLATFORM_PORT`.
    #[serde(default = "default_port")]
    pub platform_port: u16,
}

fn default_port() -> u16 {
    3120
}

impl Config for PlatformConfig {}
