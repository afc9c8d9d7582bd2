//! Create `appointment` table with FKs to `pet` and `vet`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Appointment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointment::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(Appointment::PetId).not_null())
                    .col(big_integer(Appointment::VetId).not_null())
                    .col(timestamp_with_time_zone(Appointment::ScheduledAt).not_null())
                    .col(string_len(Appointment::Status, 32).not_null())
                    .col(ColumnDef::new(Appointment::Notes).text().null())
                    .col(timestamp_with_time_zone(Appointment::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Appointment::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_pet")
                            .from(Appointment::Table, Appointment::PetId)
                            .to(Pet::Table, Pet::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointment_vet")
                            .from(Appointment::Table, Appointment::VetId)
                            .to(Vet::Table, Vet::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Appointment { Table, Id, PetId, VetId, ScheduledAt, Status, Notes, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Pet { Table, Id }

#[derive(DeriveIden)]
enum Vet { Table, Id }
