use sea_orm_migration::prelude::*;
use sea_orm_migration::schema::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(pk_auto(Admins::IdAdmin))
                    .col(string(Admins::Login).unique_key())
                    .col(string(Admins::Password))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Levels::Table)
                    .if_not_exists()
                    .col(pk_auto(Levels::LevelId))
                    .col(string(Levels::LevelName).unique_key())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::UserId))
                    .col(string(Users::Login).unique_key())
                    // bcrypt hash or plaintext, depending on PASSWORD_SCHEME.
                    .col(string(Users::Password))
                    .col(integer(Users::Progress).default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(pk_auto(Questions::QuestionId))
                    .col(string(Questions::Question))
                    .col(integer(Questions::LevelId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-questions-level_id")
                            .from(Questions::Table, Questions::LevelId)
                            .to(Levels::Table, Levels::LevelId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Answers::Table)
                    .if_not_exists()
                    .col(pk_auto(Answers::AnswerId))
                    .col(string(Answers::Answer))
                    // 0=wrong, 1=correct
                    .col(
                        integer(Answers::IsGood)
                            .default(0)
                            .check(Expr::col(Answers::IsGood).gte(0))
                            .check(Expr::col(Answers::IsGood).lte(1)),
                    )
                    .col(integer(Answers::QuestionId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-answers-question_id")
                            .from(Answers::Table, Answers::QuestionId)
                            .to(Questions::Table, Questions::QuestionId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_questions_level_id")
                    .table(Questions::Table)
                    .col(Questions::LevelId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_answers_question_id")
                    .table(Answers::Table)
                    .col(Answers::QuestionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Answers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Levels::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Admins {
    Table,
    IdAdmin,
    Login,
    Password,
}

#[derive(DeriveIden)]
enum Levels {
    Table,
    LevelId,
    LevelName,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    UserId,
    Login,
    Password,
    Progress,
}

#[derive(DeriveIden)]
enum Questions {
    Table,
    QuestionId,
    Question,
    LevelId,
}

#[derive(DeriveIden)]
enum Answers {
    Table,
    AnswerId,
    Answer,
    IsGood,
    QuestionId,
}
