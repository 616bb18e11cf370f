use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OnboardingSteps::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OnboardingSteps::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OnboardingSteps::Position)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(OnboardingSteps::Title).string().not_null())
                    .col(
                        ColumnDef::new(OnboardingSteps::Description)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OnboardingSteps::ChallengeId).uuid().null())
                    .col(
                        ColumnDef::new(OnboardingSteps::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(OnboardingSteps::Table, OnboardingSteps::ChallengeId)
                            .to(Challenges::Table, Challenges::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OnboardingSteps::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum OnboardingSteps {
    Table,
    Id,
    Position,
    Title,
    Description,
    ChallengeId,
    CreatedAt,
}

#[derive(Iden)]
enum Challenges {
    Table,
    Id,
}
