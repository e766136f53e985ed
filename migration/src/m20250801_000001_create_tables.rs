use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Nickname).string_len(50).not_null())
                    .col(ColumnDef::new(Users::RealName).string_len(50).not_null())
                    .col(ColumnDef::new(Users::College).string_len(100).not_null())
                    .col(ColumnDef::new(Users::StudentId).string_len(20).not_null())
                    .col(ColumnDef::new(Users::Qq).string_len(20).null())
                    .col(ColumnDef::new(Users::Email).string_len(100).null())
                    .col(
                        ColumnDef::new(Users::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::DeletedAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // 创建方向表
        manager
            .create_table(
                Table::create()
                    .table(Directions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Directions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Directions::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Directions::Description).text().not_null())
                    .col(
                        ColumnDef::new(Directions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Directions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Directions::DeletedAt).big_integer().null())
                    .to_owned(),
            )
            .await?;

        // 创建方向负责人关联表
        manager
            .create_table(
                Table::create()
                    .table(DirectionManagers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DirectionManagers::DirectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DirectionManagers::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(DirectionManagers::DirectionId)
                            .col(DirectionManagers::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DirectionManagers::Table, DirectionManagers::DirectionId)
                            .to(Directions::Table, Directions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(DirectionManagers::Table, DirectionManagers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题目表
        manager
            .create_table(
                Table::create()
                    .table(Problems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Problems::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Problems::Title).string_len(200).not_null())
                    .col(ColumnDef::new(Problems::Description).text().not_null())
                    .col(
                        ColumnDef::new(Problems::DirectionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Problems::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Problems::UpdatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Problems::DeletedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Problems::Table, Problems::DirectionId)
                            .to(Directions::Table, Directions::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提交点表
        manager
            .create_table(
                Table::create()
                    .table(SubmissionPoints::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SubmissionPoints::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SubmissionPoints::Name)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubmissionPoints::MaxScore)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubmissionPoints::ProblemId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubmissionPoints::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubmissionPoints::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SubmissionPoints::DeletedAt)
                            .big_integer()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SubmissionPoints::Table, SubmissionPoints::ProblemId)
                            .to(Problems::Table, Problems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提交表
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::Content).text().not_null())
                    .col(ColumnDef::new(Submissions::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Submissions::ProblemId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::SubmissionPointId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::DeletedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::ProblemId)
                            .to(Problems::Table, Problems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::SubmissionPointId)
                            .to(SubmissionPoints::Table, SubmissionPoints::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建评分表
        manager
            .create_table(
                Table::create()
                    .table(Scores::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scores::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Scores::Score).integer().not_null())
                    .col(ColumnDef::new(Scores::Comment).text().not_null())
                    .col(ColumnDef::new(Scores::UserId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Scores::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Scores::ReviewerId).big_integer().not_null())
                    .col(ColumnDef::new(Scores::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Scores::UpdatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Scores::DeletedAt).big_integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Scores::Table, Scores::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Scores::Table, Scores::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Scores::Table, Scores::ReviewerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 自然键唯一约束，供 upsert 使用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_submissions_user_problem_point")
                    .table(Submissions::Table)
                    .col(Submissions::UserId)
                    .col(Submissions::ProblemId)
                    .col(Submissions::SubmissionPointId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_scores_submission_reviewer")
                    .table(Scores::Table)
                    .col(Scores::SubmissionId)
                    .col(Scores::ReviewerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 普通索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_direction_managers_user_id")
                    .table(DirectionManagers::Table)
                    .col(DirectionManagers::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_problems_direction_id")
                    .table(Problems::Table)
                    .col(Problems::DirectionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submission_points_problem_id")
                    .table(SubmissionPoints::Table)
                    .col(SubmissionPoints::ProblemId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_problem_id")
                    .table(Submissions::Table)
                    .col(Submissions::ProblemId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scores_user_id")
                    .table(Scores::Table)
                    .col(Scores::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scores_reviewer_id")
                    .table(Scores::Table)
                    .col(Scores::ReviewerId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Scores::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubmissionPoints::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Problems::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DirectionManagers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Directions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    PasswordHash,
    Nickname,
    RealName,
    College,
    StudentId,
    Qq,
    Email,
    IsAdmin,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Directions {
    #[sea_orm(iden = "directions")]
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum DirectionManagers {
    #[sea_orm(iden = "direction_managers")]
    Table,
    DirectionId,
    UserId,
}

#[derive(DeriveIden)]
enum Problems {
    #[sea_orm(iden = "problems")]
    Table,
    Id,
    Title,
    Description,
    DirectionId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum SubmissionPoints {
    #[sea_orm(iden = "submission_points")]
    Table,
    Id,
    Name,
    MaxScore,
    ProblemId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    Content,
    UserId,
    ProblemId,
    SubmissionPointId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum Scores {
    #[sea_orm(iden = "scores")]
    Table,
    Id,
    Score,
    Comment,
    UserId,
    SubmissionId,
    ReviewerId,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
