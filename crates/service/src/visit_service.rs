use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use models::{pet, vet, visit};

async fn owned_pet(db: &DatabaseConnection, owner_id: i64, pet_id: i64) -> Result<pet::Model, ServiceError> {
    let pet = pet::Entity::find_by_id(pet_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("pet"))?;
    if pet.owner_id != owner_id {
        return Err(ServiceError::Forbidden("pet belongs to another owner".into()));
    }
    Ok(pet)
}

/// Record a visit for one of the requesting owner's pets.
#[instrument(skip(db, description))]
pub async fn record_visit(
    db: &DatabaseConnection,
    owner_id: i64,
    pet_id: i64,
    vet_id: i64,
    visit_date: NaiveDate,
    description: &str,
) -> Result<visit::Model, ServiceError> {
    owned_pet(db, owner_id, pet_id).await?;
    vet::Entity::find_by_id(vet_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("vet"))?;
    let created = visit::record(db, pet_id, vet_id, visit_date, description).await?;
    info!(visit_id = created.id, "visit_recorded");
    Ok(created)
}

/// Visit history for a pet, most recent first; the pet must belong to the
/// requesting owner.
pub async fn pet_history(db: &DatabaseConnection, owner_id: i64, pet_id: i64) -> Result<Vec<visit::Model>, ServiceError> {
    owned_pet(db, owner_id, pet_id).await?;
    Ok(visit::list_by_pet(db, pet_id).await?)
}
