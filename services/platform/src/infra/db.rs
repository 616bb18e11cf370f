use anyhow::{Context as _, anyhow};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect, SqlErr, Statement,
    TransactionTrait, sea_query::Expr,
};
use uuid::Uuid;

use questline_domain::pagination::PageRequest;
use questline_domain::status::SubmissionStatus;
use questline_domain::user::UserRole;
use questline_platform_schema::{challenges, onboarding_steps, submissions, users};

use crate::domain::repository::{
    ChallengeRepository, StepRepository, SubmissionRepository, UserRepository,
};
use crate::domain::types::{
    Challenge, OnboardingStep, PointsAward, StepProgress, Submission, SubmissionTarget, User,
};
use crate::error::PlatformError;

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, PlatformError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model).transpose()?)
    }

    async fn create(&self, user: &User) -> Result<(), PlatformError> {
        let inserted = users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            display_name: Set(user.display_name.clone()),
            role: Set(i16::from(user.role.as_u8())),
            points: Set(user.points),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await;
        match inserted {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(PlatformError::UserAlreadyExists),
            Err(e) => Err(anyhow::Error::new(e).context("create user").into()),
        }
    }
}

fn user_from_model(model: users::Model) -> anyhow::Result<User> {
    let role = u8::try_from(model.role)
        .ok()
        .and_then(UserRole::from_u8)
        .ok_or_else(|| anyhow!("user {} has unknown role {}", model.id, model.role))?;
    Ok(User {
        id: model.id,
        email: model.email,
        display_name: model.display_name,
        role,
        points: model.points,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Challenge repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbChallengeRepository {
    pub db: DatabaseConnection,
}

impl ChallengeRepository for DbChallengeRepository {
    async fn list(&self, page: PageRequest) -> Result<Vec<Challenge>, PlatformError> {
        let models = challenges::Entity::find()
            .order_by_desc(challenges::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list challenges")?;
        Ok(models.into_iter().map(challenge_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Challenge>, PlatformError> {
        let model = challenges::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find challenge by id")?;
        Ok(model.map(challenge_from_model))
    }

    async fn create(&self, challenge: &Challenge) -> Result<(), PlatformError> {
        challenges::ActiveModel {
            id: Set(challenge.id),
            title: Set(challenge.title.clone()),
            description: Set(challenge.description.clone()),
            points: Set(challenge.points),
            created_at: Set(challenge.created_at),
            updated_at: Set(challenge.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create challenge")?;
        Ok(())
    }
}

fn challenge_from_model(model: challenges::Model) -> Challenge {
    Challenge {
        id: model.id,
        title: model.title,
        description: model.description,
        points: model.points,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Onboarding step repository ───────────────────────────────────────────────

#[derive(Clone)]
pub struct DbStepRepository {
    pub db: DatabaseConnection,
}

impl StepRepository for DbStepRepository {
    async fn list(&self) -> Result<Vec<OnboardingStep>, PlatformError> {
        let models = onboarding_steps::Entity::find()
            .order_by_asc(onboarding_steps::Column::Position)
            .all(&self.db)
            .await
            .context("list onboarding steps")?;
        Ok(models.into_iter().map(step_from_model).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OnboardingStep>, PlatformError> {
        let model = onboarding_steps::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find onboarding step by id")?;
        Ok(model.map(step_from_model))
    }

    async fn progress(&self, user_id: Uuid) -> Result<Vec<StepProgress>, PlatformError> {
        // The user filter lives inside the lateral subquery so steps without
        // a submission still come back with a NULL status.
        const SQL: &str = r#"
            SELECT s.id AS step_id, s.position, s.title, latest.status
            FROM onboarding_steps AS s
            LEFT JOIN LATERAL (
                SELECT sub.status
                FROM submissions AS sub
                WHERE sub.step_id = s.id AND sub.user_id = $1
                ORDER BY sub.created_at DESC, sub.id DESC
                LIMIT 1
            ) AS latest ON TRUE
            ORDER BY s.position ASC
        "#;

        #[derive(Debug, FromQueryResult)]
        struct ProgressRow {
            step_id: Uuid,
            position: i32,
            title: String,
            status: Option<String>,
        }

        let rows = ProgressRow::find_by_statement(Statement::from_sql_and_values(
            self.db.get_database_backend(),
            SQL,
            [user_id.into()],
        ))
        .all(&self.db)
        .await
        .context("load onboarding progress")?;

        let progress = rows
            .into_iter()
            .map(|row| -> anyhow::Result<StepProgress> {
                let status = row
                    .status
                    .as_deref()
                    .map(str::parse::<SubmissionStatus>)
                    .transpose()
                    .with_context(|| {
                        format!("status of latest submission for step {}", row.step_id)
                    })?;
                Ok(StepProgress {
                    step_id: row.step_id,
                    position: row.position,
                    title: row.title,
                    status,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(progress)
    }
}

fn step_from_model(model: onboarding_steps::Model) -> OnboardingStep {
    OnboardingStep {
        id: model.id,
        position: model.position,
        title: model.title,
        description: model.description,
        challenge_id: model.challenge_id,
        created_at: model.created_at,
    }
}

// ── Submission repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSubmissionRepository {
    pub db: DatabaseConnection,
}

impl SubmissionRepository for DbSubmissionRepository {
    async fn create(&self, submission: &Submission) -> Result<(), PlatformError> {
        submissions::ActiveModel {
            id: Set(submission.id),
            user_id: Set(submission.user_id),
            challenge_id: Set(submission.target.challenge_id()),
            step_id: Set(submission.target.step_id()),
            content: Set(submission.content.clone()),
            status: Set(submission.status.as_str().to_owned()),
            points_credited_at: Set(None),
            created_at: Set(submission.created_at),
            updated_at: Set(submission.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create submission")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>, PlatformError> {
        let model = submissions::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find submission by id")?;
        Ok(model.map(submission_from_model).transpose()?)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        status: Option<SubmissionStatus>,
        page: PageRequest,
    ) -> Result<Vec<Submission>, PlatformError> {
        let mut query =
            submissions::Entity::find().filter(submissions::Column::UserId.eq(user_id));
        if let Some(status) = status {
            query = query.filter(submissions::Column::Status.eq(status.as_str()));
        }
        let models = query
            .order_by_desc(submissions::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list submissions by user")?;
        let submissions = models
            .into_iter()
            .map(submission_from_model)
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(submissions)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
        award: Option<PointsAward>,
    ) -> Result<bool, PlatformError> {
        let credited = self
            .db
            .transaction::<_, bool, DbErr>(|txn| {
                Box::pin(async move {
                    let now = Utc::now();
                    let updated = submissions::Entity::update_many()
                        .col_expr(submissions::Column::Status, Expr::value(status.as_str()))
                        .col_expr(submissions::Column::UpdatedAt, Expr::value(now))
                        .filter(submissions::Column::Id.eq(id))
                        .exec(txn)
                        .await?;
                    let Some(award) = award.filter(|_| updated.rows_affected > 0) else {
                        return Ok(false);
                    };

                    // The row lock taken above serializes concurrent approvals;
                    // only the first one finds the stamp empty.
                    let stamped = submissions::Entity::update_many()
                        .col_expr(submissions::Column::PointsCreditedAt, Expr::value(now))
                        .filter(submissions::Column::Id.eq(id))
                        .filter(submissions::Column::PointsCreditedAt.is_null())
                        .exec(txn)
                        .await?;
                    if stamped.rows_affected == 0 {
                        return Ok(false);
                    }

                    users::Entity::update_many()
                        .col_expr(
                            users::Column::Points,
                            Expr::col(users::Column::Points).add(award.points),
                        )
                        .col_expr(users::Column::UpdatedAt, Expr::value(now))
                        .filter(users::Column::Id.eq(award.user_id))
                        .exec(txn)
                        .await?;
                    Ok(true)
                })
            })
            .await
            .context("update submission status")?;
        Ok(credited)
    }
}

fn submission_from_model(model: submissions::Model) -> anyhow::Result<Submission> {
    let target = SubmissionTarget::from_ids(model.challenge_id, model.step_id)
        .ok_or_else(|| anyhow!("submission {} does not have exactly one target", model.id))?;
    let status = model
        .status
        .parse::<SubmissionStatus>()
        .with_context(|| format!("status of submission {}", model.id))?;
    Ok(Submission {
        id: model.id,
        user_id: model.user_id,
        target,
        content: model.content,
        status,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
