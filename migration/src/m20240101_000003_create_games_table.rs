use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_users_table::Users;
use crate::m20240101_000002_create_words_table::Words;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Games::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Games::UserId).uuid().not_null())
                    .col(ColumnDef::new(Games::WordId).uuid().not_null())
                    .col(
                        ColumnDef::new(Games::Status)
                            .string_len(10)
                            .not_null()
                            .default("ACTIVE"),
                    )
                    .col(
                        ColumnDef::new(Games::GuessesCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Games::MaxGuesses)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Games::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Games::CompletedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_user_id")
                            .from(Games::Table, Games::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_word_id")
                            .from(Games::Table, Games::WordId)
                            .to(Words::Table, Words::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Active-game lookup and daily-limit counting
        manager
            .create_index(
                Index::create()
                    .name("idx_games_user_status")
                    .table(Games::Table)
                    .col(Games::UserId)
                    .col(Games::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_user_created_at")
                    .table(Games::Table)
                    .col(Games::UserId)
                    .col(Games::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Games {
    Table,
    Id,
    UserId,
    WordId,
    Status,
    GuessesCount,
    MaxGuesses,
    CreatedAt,
    CompletedAt,
}
