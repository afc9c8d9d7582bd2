//! Create `vet` table — clinic veterinarians.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vet::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Vet::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string_len(Vet::FirstName, 128).not_null())
                    .col(string_len(Vet::LastName, 128).not_null())
                    .col(string_len(Vet::Specialty, 128).not_null())
                    .col(timestamp_with_time_zone(Vet::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vet::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vet { Table, Id, FirstName, LastName, Specialty, CreatedAt }
