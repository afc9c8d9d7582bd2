//! Create `pet` table with FK to `owner`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Pet::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Pet::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(Pet::OwnerId).not_null())
                    .col(string_len(Pet::Name, 128).not_null())
                    .col(string_len(Pet::Species, 64).not_null())
                    .col(ColumnDef::new(Pet::BirthDate).date().null())
                    .col(timestamp_with_time_zone(Pet::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Pet::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pet_owner")
                            .from(Pet::Table, Pet::OwnerId)
                            .to(Owner::Table, Owner::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Pet::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Pet { Table, Id, OwnerId, Name, Species, BirthDate, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Owner { Table, Id }
