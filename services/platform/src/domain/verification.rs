//! Time-windowed verification codes.
//!
//! A code is the first [`CODE_LEN`] lowercase hex characters of
//! `SHA-256("{subject}-{window}-{salt}")`, where `window` is the number of
//! whole hours since the Unix epoch. Nothing is stored: the expected code is
//! recomputed on every check, and a code stays valid for any number of
//! checks until its hour ends.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

/// Verification code length in hex characters.
pub const CODE_LEN: usize = 12;

/// Width of one window.
pub const WINDOW_MILLIS: i64 = 3_600_000;

/// Whole hours elapsed since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HourWindow(pub i64);

impl HourWindow {
    /// The window containing `at` (floor division, also below the epoch).
    pub fn containing(at: DateTime<Utc>) -> Self {
        Self(at.timestamp_millis().div_euclid(WINDOW_MILLIS))
    }

    /// First instant of the following window. `None` outside chrono's range.
    pub fn ends_at(self) -> Option<DateTime<Utc>> {
        self.0
            .checked_add(1)
            .and_then(|next| next.checked_mul(WINDOW_MILLIS))
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}

/// Reference subject and salt. Loaded once at startup, immutable afterwards.
#[derive(Clone)]
pub struct VerifySettings {
    subject_id: String,
    salt: String,
}

impl VerifySettings {
    pub fn new(subject_id: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            salt: salt.into(),
        }
    }

    /// The code valid during `window`.
    pub fn expected_code(&self, window: HourWindow) -> String {
        derive_code(&self.subject_id, window, &self.salt)
    }
}

impl std::fmt::Debug for VerifySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifySettings")
            .field("subject_id", &self.subject_id)
            .finish_non_exhaustive()
    }
}

pub fn derive_code(subject_id: &str, window: HourWindow, salt: &str) -> String {
    let input = format!("{subject_id}-{}-{salt}", window.0);
    let mut code = hex::encode(Sha256::digest(input.as_bytes()));
    code.truncate(CODE_LEN);
    code
}
