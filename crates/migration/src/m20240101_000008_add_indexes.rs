use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Pets: index on owner_id
        manager
            .create_index(
                Index::create()
                    .name("idx_pet_owner")
                    .table(Pet::Table)
                    .col(Pet::OwnerId)
                    .to_owned(),
            )
            .await?;

        // Appointments: per-pet and per-vet lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_pet")
                    .table(Appointment::Table)
                    .col(Appointment::PetId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_appointment_vet")
                    .table(Appointment::Table)
                    .col(Appointment::VetId)
                    .to_owned(),
            )
            .await?;

        // Visits: history queries order by date within a pet
        manager
            .create_index(
                Index::create()
                    .name("idx_visit_pet_date")
                    .table(Visit::Table)
                    .col(Visit::PetId)
                    .col(Visit::VisitDate)
                    .to_owned(),
            )
            .await?;

        // Reviews: per-vet listing
        manager
            .create_index(
                Index::create()
                    .name("idx_review_vet")
                    .table(Review::Table)
                    .col(Review::VetId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_pet_owner").table(Pet::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_appointment_pet").table(Appointment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_appointment_vet").table(Appointment::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_visit_pet_date").table(Visit::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_review_vet").table(Review::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Pet { Table, OwnerId }

#[derive(DeriveIden)]
enum Appointment { Table, PetId, VetId }

#[derive(DeriveIden)]
enum Visit { Table, PetId, VisitDate }

#[derive(DeriveIden)]
enum Review { Table, VetId }
