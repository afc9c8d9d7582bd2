use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::owner;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "owner_credentials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner_id: i64,
    pub password_hash: String,
    pub password_algorithm: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Owner }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(owner::Entity)
                .from(Column::OwnerId)
                .to(owner::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn upsert_password(
    db: &DatabaseConnection,
    owner_id: i64,
    password_hash: String,
    algorithm: &str,
) -> Result<Model, crate::errors::ModelError> {
    if password_hash.trim().is_empty() {
        return Err(crate::errors::ModelError::Validation("password hash required".into()));
    }
    let now = Utc::now().into();
    if let Some(existing) = Entity::find()
        .filter(Column::OwnerId.eq(owner_id))
        .one(db)
        .await
        .map_err(|e| crate::errors::ModelError::Db(e.to_string()))?
    {
        let mut am: ActiveModel = existing.into();
        am.password_hash = Set(password_hash);
        am.password_algorithm = Set(algorithm.to_string());
        am.updated_at = Set(now);
        let updated = am
            .update(db)
            .await
            .map_err(|e| crate::errors::ModelError::Db(e.to_string()))?;
        Ok(updated)
    } else {
        let am = ActiveModel {
            owner_id: Set(owner_id),
            password_hash: Set(password_hash),
            password_algorithm: Set(algorithm.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let created = am
            .insert(db)
            .await
            .map_err(|e| crate::errors::ModelError::Db(e.to_string()))?;
        Ok(created)
    }
}

pub async fn find_by_owner(
    db: &DatabaseConnection,
    owner_id: i64,
) -> Result<Option<Model>, crate::errors::ModelError> {
    Entity::find()
        .filter(Column::OwnerId.eq(owner_id))
        .one(db)
        .await
        .map_err(|e| crate::errors::ModelError::Db(e.to_string()))
}
