use sea_orm_migration::prelude::*;

use crate::m20240101_000003_create_games_table::Games;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Guesses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Guesses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Guesses::GameId).uuid().not_null())
                    .col(ColumnDef::new(Guesses::GuessNumber).integer().not_null())
                    .col(ColumnDef::new(Guesses::Word).string_len(5).not_null())
                    .col(ColumnDef::new(Guesses::Feedback).json().not_null())
                    .col(
                        ColumnDef::new(Guesses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_guesses_game_id")
                            .from(Guesses::Table, Guesses::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Guess numbering must stay unique per game even under races
        manager
            .create_index(
                Index::create()
                    .name("idx_guesses_game_number")
                    .table(Guesses::Table)
                    .col(Guesses::GameId)
                    .col(Guesses::GuessNumber)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Guesses::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Guesses {
    Table,
    Id,
    GameId,
    GuessNumber,
    Word,
    Feedback,
    CreatedAt,
}
