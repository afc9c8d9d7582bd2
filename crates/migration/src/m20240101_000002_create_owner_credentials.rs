//! Create `owner_credentials` table storing password hashes, FK to `owner`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OwnerCredentials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OwnerCredentials::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(OwnerCredentials::OwnerId).unique_key().not_null())
                    .col(string_len(OwnerCredentials::PasswordHash, 255).not_null())
                    .col(string_len(OwnerCredentials::PasswordAlgorithm, 64).not_null())
                    .col(timestamp_with_time_zone(OwnerCredentials::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(OwnerCredentials::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_owner_credentials_owner")
                            .from(OwnerCredentials::Table, OwnerCredentials::OwnerId)
                            .to(Owner::Table, Owner::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OwnerCredentials::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OwnerCredentials {
    Table,
    Id,
    OwnerId,
    PasswordHash,
    PasswordAlgorithm,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Owner { Table, Id }
