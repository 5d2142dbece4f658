use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_music_groups_table::MusicGroups;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Songs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Songs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Songs::Name)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Songs::GroupId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Songs::ReleaseDate)
                            .string_len(10)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Songs::Text)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Songs::Link)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Songs::Deleted)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_songs_group_id")
                            .from(Songs::Table, Songs::GroupId)
                            .to(MusicGroups::Table, MusicGroups::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_songs_group_id")
                    .table(Songs::Table)
                    .col(Songs::GroupId)
                    .to_owned(),
            )
            .await?;

        // Names only need to be unique among rows that are still live.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_songs_live_name ON songs (name) WHERE deleted IS NULL",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Songs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Songs {
    Table,
    Id,
    Name,
    GroupId,
    ReleaseDate,
    Text,
    Link,
    Deleted,
}
