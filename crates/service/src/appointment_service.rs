use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use models::{appointment, pet, vet};

/// Fetch a pet and enforce that it belongs to the requesting owner.
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

/// Book an appointment for one of the requesting owner's pets.
#[instrument(skip(db))]
pub async fn create_appointment(
    db: &DatabaseConnection,
    owner_id: i64,
    pet_id: i64,
    vet_id: i64,
    scheduled_at: DateTime<Utc>,
    notes: Option<&str>,
) -> Result<appointment::Model, ServiceError> {
    owned_pet(db, owner_id, pet_id).await?;
    vet::Entity::find_by_id(vet_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("vet"))?;
    if scheduled_at <= Utc::now() {
        return Err(ServiceError::Validation("appointment must be in the future".into()));
    }
    let created = appointment::create(db, pet_id, vet_id, scheduled_at.into(), notes).await?;
    info!(appointment_id = created.id, "appointment_booked");
    Ok(created)
}

/// All appointments across the owner's pets, soonest first.
pub async fn list_for_owner(db: &DatabaseConnection, owner_id: i64) -> Result<Vec<appointment::Model>, ServiceError> {
    let pets = pet::list_by_owner(db, owner_id).await?;
    let pet_ids: Vec<i64> = pets.iter().map(|p| p.id).collect();
    if pet_ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(appointment::list_by_pets(db, &pet_ids).await?)
}

/// Cancel an appointment; only the pet's owner may do so.
#[instrument(skip(db))]
pub async fn cancel_appointment(db: &DatabaseConnection, owner_id: i64, id: i64) -> Result<appointment::Model, ServiceError> {
    let appt = appointment::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("appointment"))?;
    owned_pet(db, owner_id, appt.pet_id).await?;
    if appt.status == appointment::STATUS_CANCELLED {
        return Err(ServiceError::Validation("appointment already cancelled".into()));
    }
    let updated = appointment::set_status(db, id, appointment::STATUS_CANCELLED).await?;
    info!(appointment_id = id, "appointment_cancelled");
    Ok(updated)
}
