use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "owner")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub telephone: String,
    pub address: String,
    pub city: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') {
        return Err(errors::ModelError::Validation("invalid email".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    email: &str,
    first_name: &str,
    last_name: &str,
    telephone: &str,
    address: &str,
    city: &str,
) -> Result<Model, errors::ModelError> {
    validate_email(email)?;
    validate_name(first_name)?;
    validate_name(last_name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        email: Set(email.to_string()),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        telephone: Set(telephone.to_string()),
        address: Set(address.to_string()),
        city: Set(city.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::Email.eq(email))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
