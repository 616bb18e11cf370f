use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DbBackend, MockDatabase};
use uuid::Uuid;

use questline_domain::pagination::PageRequest;
use questline_domain::status::SubmissionStatus;
use questline_platform::domain::repository::{ChallengeRepository, Clock, SubmissionRepository};
use questline_platform::domain::types::{Challenge, PointsAward, Submission, SubmissionTarget};
use questline_platform::domain::verification::VerifySettings;
use questline_platform::error::PlatformError;
use questline_platform::router::build_router;
use questline_platform::state::AppState;
use questline_testing::auth::test_secret;

pub const SUBJECT: &str = "quest-subject";
pub const SALT: &str = "pepper";

/// 2023-11-14T22:13:20Z, inside hour window 472222.
pub const NOW_MILLIS: i64 = 1_700_000_000_000;

/// Code valid at [`NOW_MILLIS`] for [`SUBJECT`] and [`SALT`].
pub const CURRENT_CODE: &str = "dc7faab4a508";

// ── FixedClock ───────────────────────────────────────────────────────────────

pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn at_millis(ms: i64) -> Self {
        Self(DateTime::<Utc>::from_timestamp_millis(ms).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ── Server over a mock database ──────────────────────────────────────────────

pub fn test_server_on(db: DatabaseConnection, now_millis: i64) -> TestServer {
    let router = build_router(AppState {
        db,
        jwt_secret: test_secret(),
        verify: Arc::new(VerifySettings::new(SUBJECT, SALT)),
        clock: Arc::new(FixedClock::at_millis(now_millis)),
    });
    TestServer::new(router).unwrap()
}

/// The mock database has no results queued, so every query fails with a
/// `DbErr` and only paths that resolve before the database succeed.
pub fn test_server_at(now_millis: i64) -> TestServer {
    test_server_on(
        MockDatabase::new(DbBackend::Postgres).into_connection(),
        now_millis,
    )
}

pub fn test_server() -> TestServer {
    test_server_at(NOW_MILLIS)
}

// ── In-memory repositories ───────────────────────────────────────────────────

pub struct MockChallengeRepo {
    pub challenges: Vec<Challenge>,
}

impl MockChallengeRepo {
    pub fn new(challenges: Vec<Challenge>) -> Self {
        Self { challenges }
    }
}

impl ChallengeRepository for MockChallengeRepo {
    async fn list(&self, _page: PageRequest) -> Result<Vec<Challenge>, PlatformError> {
        Ok(self.challenges.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Challenge>, PlatformError> {
        Ok(self.challenges.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, _challenge: &Challenge) -> Result<(), PlatformError> {
        Ok(())
    }
}

/// Keeps submissions and per-user point balances. Like the database layer,
/// a submission pays out at most once.
#[derive(Clone, Default)]
pub struct InMemorySubmissionRepo {
    pub submissions: Arc<Mutex<HashMap<Uuid, Submission>>>,
    pub points: Arc<Mutex<HashMap<Uuid, i32>>>,
    pub credited: Arc<Mutex<HashSet<Uuid>>>,
}

impl InMemorySubmissionRepo {
    pub fn with(submission: Submission) -> Self {
        let repo = Self::default();
        repo.submissions
            .lock()
            .unwrap()
            .insert(submission.id, submission);
        repo
    }

    pub fn points_of(&self, user_id: Uuid) -> i32 {
        self.points
            .lock()
            .unwrap()
            .get(&user_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn status_of(&self, id: Uuid) -> SubmissionStatus {
        self.submissions.lock().unwrap()[&id].status
    }
}

impl SubmissionRepository for InMemorySubmissionRepo {
    async fn create(&self, submission: &Submission) -> Result<(), PlatformError> {
        self.submissions
            .lock()
            .unwrap()
            .insert(submission.id, submission.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>, PlatformError> {
        Ok(self.submissions.lock().unwrap().get(&id).cloned())
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        status: Option<SubmissionStatus>,
        _page: PageRequest,
    ) -> Result<Vec<Submission>, PlatformError> {
        let mut list: Vec<_> = self
            .submissions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.user_id == user_id && status.is_none_or(|st| s.status == st))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(list)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
        award: Option<PointsAward>,
    ) -> Result<bool, PlatformError> {
        let mut submissions = self.submissions.lock().unwrap();
        let Some(row) = submissions.get_mut(&id) else {
            return Ok(false);
        };
        row.status = status;
        row.updated_at = Utc::now();
        let Some(award) = award else {
            return Ok(false);
        };
        if !self.credited.lock().unwrap().insert(id) {
            return Ok(false);
        }
        *self.points.lock().unwrap().entry(award.user_id).or_insert(0) += award.points;
        Ok(true)
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_challenge(points: i32) -> Challenge {
    Challenge {
        id: Uuid::now_v7(),
        title: "Open a pull request".into(),
        description: "Contribute a fix upstream".into(),
        points,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn test_submission(user_id: Uuid, challenge_id: Uuid) -> Submission {
    Submission {
        id: Uuid::now_v7(),
        user_id,
        target: SubmissionTarget::Challenge(challenge_id),
        content: "https://example.com/pr/42".into(),
        status: SubmissionStatus::Pending,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
