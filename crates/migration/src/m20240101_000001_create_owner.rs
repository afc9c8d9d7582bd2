//! Create `owner` table — the clinic's registered pet owners.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Owner::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Owner::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Owner::Email, 255).unique_key().not_null())
                    .col(string_len(Owner::FirstName, 128).not_null())
                    .col(string_len(Owner::LastName, 128).not_null())
                    .col(string_len(Owner::Telephone, 32).not_null())
                    .col(string_len(Owner::Address, 255).not_null())
                    .col(string_len(Owner::City, 128).not_null())
                    .col(timestamp_with_time_zone(Owner::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Owner::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Owner::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Owner { Table, Id, Email, FirstName, LastName, Telephone, Address, City, CreatedAt, UpdatedAt }
