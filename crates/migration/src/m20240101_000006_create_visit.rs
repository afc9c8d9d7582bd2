//! Create `visit` table — per-pet visit history, FKs to `pet` and `vet`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Visit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visit::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(Visit::PetId).not_null())
                    .col(big_integer(Visit::VetId).not_null())
                    .col(ColumnDef::new(Visit::VisitDate).date().not_null())
                    .col(text(Visit::Description).not_null())
                    .col(timestamp_with_time_zone(Visit::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visit_pet")
                            .from(Visit::Table, Visit::PetId)
                            .to(Pet::Table, Pet::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_visit_vet")
                            .from(Visit::Table, Visit::VetId)
                            .to(Vet::Table, Vet::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Visit::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Visit { Table, Id, PetId, VetId, VisitDate, Description, CreatedAt }

#[derive(DeriveIden)]
enum Pet { Table, Id }

#[derive(DeriveIden)]
enum Vet { Table, Id }
