//! Create `review` table — owner reviews of vets, FKs to `owner` and `vet`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Review::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Review::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(big_integer(Review::OwnerId).not_null())
                    .col(big_integer(Review::VetId).not_null())
                    .col(small_integer(Review::Score).not_null())
                    .col(ColumnDef::new(Review::Comment).text().null())
                    .col(timestamp_with_time_zone(Review::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_owner")
                            .from(Review::Table, Review::OwnerId)
                            .to(Owner::Table, Owner::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_vet")
                            .from(Review::Table, Review::VetId)
                            .to(Vet::Table, Vet::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Review::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Review { Table, Id, OwnerId, VetId, Score, Comment, CreatedAt }

#[derive(DeriveIden)]
enum Owner { Table, Id }

#[derive(DeriveIden)]
enum Vet { Table, Id }
