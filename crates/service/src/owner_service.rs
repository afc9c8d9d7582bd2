use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::errors::ServiceError;
use models::owner;

/// Get an owner's profile by id.
pub async fn get_owner(db: &DatabaseConnection, id: i64) -> Result<owner::Model, ServiceError> {
    owner::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("owner"))
}

/// Update the mutable parts of an owner's profile.
pub async fn update_profile(
    db: &DatabaseConnection,
    id: i64,
    telephone: Option<&str>,
    address: Option<&str>,
    city: Option<&str>,
) -> Result<owner::Model, ServiceError> {
    let mut am: owner::ActiveModel = owner::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("owner"))?
        .into();
    if let Some(telephone) = telephone {
        am.telephone = Set(telephone.to_string());
    }
    if let Some(address) = address {
        am.address = Set(address.to_string());
    }
    if let Some(city) = city {
        am.city = Set(city.to_string());
    }
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}
