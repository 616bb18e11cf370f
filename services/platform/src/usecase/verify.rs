use std::sync::Arc;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::Clock;
use crate::domain::verification::{HourWindow, VerifySettings};
use crate::error::PlatformError;

// ── VerifyCode ───────────────────────────────────────────────────────────────

pub struct VerifyCodeUseCase<C: Clock> {
    pub clock: C,
    pub settings: Arc<VerifySettings>,
}

impl<C: Clock> VerifyCodeUseCase<C> {
    /// Compare `code` with the code of the current hour window.
    ///
    /// No normalisation and no grace period: a code from the previous
    /// window, or the right code in uppercase, fails.
    pub fn execute(&self, user_id: Uuid, code: &str) -> bool {
        let window = HourWindow::containing(self.clock.now());
        let verified = self.settings.expected_code(window) == code;
        if verified {
            tracing::info!(user_id = %user_id, window = window.0, "verification code accepted");
        } else {
            tracing::debug!(user_id = %user_id, window = window.0, "verification code rejected");
        }
        verified
    }
}

// ── CurrentCode ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct CurrentCode {
    pub code: String,
    pub window: HourWindow,
    pub expires_at: DateTime<Utc>,
}

/// Admin-only; the role check happens in the handler.
pub struct CurrentCodeUseCase<C: Clock> {
    pub clock: C,
    pub settings: Arc<VerifySettings>,
}

impl<C: Clock> CurrentCodeUseCase<C> {
    pub fn execute(&self) -> Result<CurrentCode, PlatformError> {
        let window = HourWindow::containing(self.clock.now());
        let expires_at = window
            .ends_at()
            .ok_or_else(|| anyhow!("window {} ends outside the representable range", window.0))?;
        Ok(CurrentCode {
            code: self.settings.expected_code(window),
            window,
            expires_at,
        })
    }
}
