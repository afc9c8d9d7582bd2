use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, QueryOrder, Set};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::owner;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub species: String,
    pub birth_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
}

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

pub async fn create(
    db: &DatabaseConnection,
    owner_id: i64,
    name: &str,
    species: &str,
    birth_date: Option<NaiveDate>,
) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("pet name required".into()));
    }
    if species.trim().is_empty() {
        return Err(errors::ModelError::Validation("species required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        owner_id: Set(owner_id),
        name: Set(name.to_string()),
        species: Set(species.to_string()),
        birth_date: Set(birth_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_by_owner(db: &DatabaseConnection, owner_id: i64) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::OwnerId.eq(owner_id))
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
