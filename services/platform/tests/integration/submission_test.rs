use uuid::Uuid;

use questline_auth_types::identity::Identity;
use questline_domain::pagination::PageRequest;
use questline_domain::status::SubmissionStatus;
use questline_domain::user::UserRole;
use questline_platform::error::PlatformError;
use questline_platform::usecase::submission::{
    ListSubmissionsUseCase, UpdateSubmissionStatusUseCase,
};

use crate::helpers::{InMemorySubmissionRepo, MockChallengeRepo, test_challenge, test_submission};

fn admin() -> Identity {
    Identity {
        user_id: Uuid::now_v7(),
        role: UserRole::Admin,
    }
}

fn usecase(
    repo: &InMemorySubmissionRepo,
    challenges: Vec<questline_platform::domain::types::Challenge>,
) -> UpdateSubmissionStatusUseCase<InMemorySubmissionRepo, MockChallengeRepo> {
    UpdateSubmissionStatusUseCase {
        submissions: repo.clone(),
        challenges: MockChallengeRepo::new(challenges),
    }
}

#[tokio::test]
async fn should_credit_points_once_when_approved_twice() {
    let owner = Uuid::now_v7();
    let challenge = test_challenge(30);
    let submission = test_submission(owner, challenge.id);
    let id = submission.id;
    let repo = InMemorySubmissionRepo::with(submission);
    let usecase = usecase(&repo, vec![challenge]);

    usecase
        .execute(&admin(), id, SubmissionStatus::Approved)
        .await
        .unwrap();
    usecase
        .execute(&admin(), id, SubmissionStatus::Approved)
        .await
        .unwrap();

    assert_eq!(repo.status_of(id), SubmissionStatus::Approved);
    assert_eq!(repo.points_of(owner), 30);
}

#[tokio::test]
async fn should_not_credit_again_after_leaving_and_reentering_approved() {
    let owner = Uuid::now_v7();
    let challenge = test_challenge(10);
    let submission = test_submission(owner, challenge.id);
    let id = submission.id;
    let repo = InMemorySubmissionRepo::with(submission);
    let usecase = usecase(&repo, vec![challenge]);

    for status in [
        SubmissionStatus::Approved,
        SubmissionStatus::Denied,
        SubmissionStatus::Approved,
    ] {
        usecase.execute(&admin(), id, status).await.unwrap();
    }

    assert_eq!(repo.status_of(id), SubmissionStatus::Approved);
    assert_eq!(repo.points_of(owner), 10);
}

#[tokio::test]
async fn should_let_owner_move_between_non_verdict_statuses() {
    let owner = Uuid::now_v7();
    let challenge = test_challenge(10);
    let submission = test_submission(owner, challenge.id);
    let id = submission.id;
    let repo = InMemorySubmissionRepo::with(submission);
    let usecase = usecase(&repo, vec![challenge]);
    let caller = Identity {
        user_id: owner,
        role: UserRole::Member,
    };

    for status in [
        SubmissionStatus::PendingReview,
        SubmissionStatus::Pending,
        SubmissionStatus::CompletedStep,
    ] {
        usecase.execute(&caller, id, status).await.unwrap();
        assert_eq!(repo.status_of(id), status);
    }
    assert_eq!(repo.points_of(owner), 0);
}

#[tokio::test]
async fn should_keep_owner_from_crediting_their_own_submission() {
    let owner = Uuid::now_v7();
    let challenge = test_challenge(10);
    let submission = test_submission(owner, challenge.id);
    let id = submission.id;
    let repo = InMemorySubmissionRepo::with(submission);
    let usecase = usecase(&repo, vec![challenge]);
    let caller = Identity {
        user_id: owner,
        role: UserRole::Member,
    };

    for _ in 0..5 {
        for status in [SubmissionStatus::Approved, SubmissionStatus::Denied] {
            let result = usecase.execute(&caller, id, status).await;
            assert!(matches!(result, Err(PlatformError::Forbidden)));
        }
    }

    assert_eq!(repo.status_of(id), SubmissionStatus::Pending);
    assert_eq!(repo.points_of(owner), 0);
}

#[tokio::test]
async fn should_forbid_other_members_and_leave_row_untouched() {
    let owner = Uuid::now_v7();
    let challenge = test_challenge(10);
    let submission = test_submission(owner, challenge.id);
    let id = submission.id;
    let repo = InMemorySubmissionRepo::with(submission);
    let usecase = usecase(&repo, vec![challenge]);
    let stranger = Identity {
        user_id: Uuid::now_v7(),
        role: UserRole::Member,
    };

    let result = usecase
        .execute(&stranger, id, SubmissionStatus::Approved)
        .await;

    assert!(matches!(result, Err(PlatformError::Forbidden)));
    assert_eq!(repo.status_of(id), SubmissionStatus::Pending);
    assert_eq!(repo.points_of(owner), 0);
}

#[tokio::test]
async fn should_filter_caller_submissions_by_status() {
    let owner = Uuid::now_v7();
    let challenge = test_challenge(10);
    let pending = test_submission(owner, challenge.id);
    let mut approved = test_submission(owner, challenge.id);
    approved.status = SubmissionStatus::Approved;
    let foreign = test_submission(Uuid::now_v7(), challenge.id);

    let repo = InMemorySubmissionRepo::with(pending);
    for s in [approved.clone(), foreign] {
        repo.submissions.lock().unwrap().insert(s.id, s);
    }
    let usecase = ListSubmissionsUseCase { repo };

    let all = usecase
        .execute(owner, None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let only_approved = usecase
        .execute(owner, Some(SubmissionStatus::Approved), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(only_approved.len(), 1);
    assert_eq!(only_approved[0].id, approved.id);
}
