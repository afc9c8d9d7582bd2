use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, QueryOrder, Set};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::pet;
use crate::vet;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "visit")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub pet_id: i64,
    pub vet_id: i64,
    pub visit_date: Date,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Pet,
    Vet,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Pet => Entity::belongs_to(pet::Entity)
                .from(Column::PetId)
                .to(pet::Column::Id)
                .into(),
            Relation::Vet => Entity::belongs_to(vet::Entity)
                .from(Column::VetId)
                .to(vet::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn record(
    db: &DatabaseConnection,
    pet_id: i64,
    vet_id: i64,
    visit_date: NaiveDate,
    description: &str,
) -> Result<Model, errors::ModelError> {
    if description.trim().is_empty() {
        return Err(errors::ModelError::Validation("description required".into()));
    }
    let am = ActiveModel {
        pet_id: Set(pet_id),
        vet_id: Set(vet_id),
        visit_date: Set(visit_date),
        description: Set(description.to_string()),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Visit history for a pet, most recent first.
pub async fn list_by_pet(db: &DatabaseConnection, pet_id: i64) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::PetId.eq(pet_id))
        .order_by_desc(Column::VisitDate)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
