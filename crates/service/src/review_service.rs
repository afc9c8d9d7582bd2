use sea_orm::{DatabaseConnection, EntityTrait};
use tracing::{info, instrument};

use crate::errors::ServiceError;
use models::{review, vet};

/// Leave a review for a vet on behalf of the authenticated owner.
#[instrument(skip(db, comment))]
pub async fn create_review(
    db: &DatabaseConnection,
    owner_id: i64,
    vet_id: i64,
    score: i16,
    comment: Option<&str>,
) -> Result<review::Model, ServiceError> {
    if !(1..=5).contains(&score) {
        return Err(ServiceError::Validation("score must be between 1 and 5".into()));
    }
    vet::Entity::find_by_id(vet_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("vet"))?;
    let created = review::create(db, owner_id, vet_id, score, comment).await?;
    info!(review_id = created.id, "review_created");
    Ok(created)
}

/// Reviews for a vet, most recent first.
pub async fn list_for_vet(db: &DatabaseConnection, vet_id: i64) -> Result<Vec<review::Model>, ServiceError> {
    vet::Entity::find_by_id(vet_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("vet"))?;
    Ok(review::list_by_vet(db, vet_id).await?)
}
