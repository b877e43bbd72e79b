//! Initial migration to create the favorites table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Favorites::Table)
                    .if_not_exists()
                    // Identity: the remote catalog's stable numeric id.
                    .col(
                        ColumnDef::new(Favorites::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    // Naming
                    .col(ColumnDef::new(Favorites::Name).string().not_null())
                    .col(ColumnDef::new(Favorites::FullName).string().not_null())
                    // Content
                    .col(ColumnDef::new(Favorites::Description).text().null())
                    .col(
                        ColumnDef::new(Favorites::OwnerAvatarUrl)
                            .text()
                            .not_null(),
                    )
                    // Statistics
                    .col(
                        ColumnDef::new(Favorites::Stars)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Favorites::Forks)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Favorites::Watchers)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Favorites::OpenIssues)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    // Misc
                    .col(ColumnDef::new(Favorites::Language).string().null())
                    .col(ColumnDef::new(Favorites::HtmlUrl).text().not_null())
                    // Tracking
                    .col(
                        ColumnDef::new(Favorites::SavedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Favorites::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Favorites {
    Table,
    Id,
    Name,
    FullName,
    Description,
    OwnerAvatarUrl,
    Stars,
    Forks,
    Watchers,
    OpenIssues,
    Language,
    HtmlUrl,
    SavedAt,
}
