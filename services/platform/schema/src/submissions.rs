use sea_orm::entity::prelude::*;

/// A player's submission against either a challenge or an onboarding step.
///
/// Exactly one of `challenge_id` / `step_id` is set. `status` holds a
/// submission status literal (`pending`, `approved`, ...).
/// `points_credited_at` is stamped the first time an approval pays out.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub challenge_id: Option<Uuid>,
    pub step_id: Option<Uuid>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub status: String,
    pub points_credited_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::challenges::Entity",
        from = "Column::ChallengeId",
        to = "super::challenges::Column::Id"
    )]
    Challenge,
    #[sea_orm(
        belongs_to = "super::onboarding_steps::Entity",
        from = "Column::StepId",
        to = "super::onboarding_steps::Column::Id"
    )]
    OnboardingStep,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::challenges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Challenge.def()
    }
}

impl Related<super::onboarding_steps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OnboardingStep.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
