use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::errors::ServiceError;

#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<models::pet::Model>, ServiceError>;
    async fn create(&self, owner_id: i64, name: &str, species: &str, birth_date: Option<NaiveDate>) -> Result<models::pet::Model, ServiceError>;
    async fn get(&self, id: i64) -> Result<Option<models::pet::Model>, ServiceError>;
    async fn update(&self, id: i64, name: Option<&str>, species: Option<&str>, birth_date: Option<NaiveDate>) -> Result<models::pet::Model, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmPetRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl PetRepository for SeaOrmPetRepository {
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<models::pet::Model>, ServiceError> {
        Ok(models::pet::list_by_owner(&self.db, owner_id).await?)
    }

    async fn create(&self, owner_id: i64, name: &str, species: &str, birth_date: Option<NaiveDate>) -> Result<models::pet::Model, ServiceError> {
        Ok(models::pet::create(&self.db, owner_id, name, species, birth_date).await?)
    }

    async fn get(&self, id: i64) -> Result<Option<models::pet::Model>, ServiceError> {
        models::pet::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, id: i64, name: Option<&str>, species: Option<&str>, birth_date: Option<NaiveDate>) -> Result<models::pet::Model, ServiceError> {
        let mut am: models::pet::ActiveModel = models::pet::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?
            .ok_or_else(|| ServiceError::not_found("pet"))?
            .into();
        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(ServiceError::Validation("pet name required".into()));
            }
            am.name = Set(name.to_string());
        }
        if let Some(species) = species {
            am.species = Set(species.to_string());
        }
        if let Some(birth_date) = birth_date {
            am.birth_date = Set(Some(birth_date));
        }
        am.updated_at = Set(Utc::now().into());
        am.update(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = models::pet::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }
}
