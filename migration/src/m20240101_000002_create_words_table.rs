use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Words::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Words::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Words::Word)
                            .string_len(5)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Words::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Words::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Random word selection filters on is_active
        manager
            .create_index(
                Index::create()
                    .name("idx_words_is_active")
                    .table(Words::Table)
                    .col(Words::IsActive)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Words::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Words {
    Table,
    Id,
    Word,
    IsActive,
    CreatedAt,
}
