use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub specialty: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    specialty: &str,
) -> Result<Model, errors::ModelError> {
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(errors::ModelError::Validation("vet name required".into()));
    }
    let am = ActiveModel {
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        specialty: Set(specialty.to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
