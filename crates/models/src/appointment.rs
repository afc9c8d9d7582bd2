use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::pet;
use crate::vet;

pub const STATUS_SCHEDULED: &str = "scheduled";
pub const STATUS_CANCELLED: &str = "cancelled";
pub const STATUS_COMPLETED: &str = "completed";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "appointment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub pet_id: i64,
    pub vet_id: i64,
    pub scheduled_at: DateTimeWithTimeZone,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
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

pub async fn create(
    db: &DatabaseConnection,
    pet_id: i64,
    vet_id: i64,
    scheduled_at: DateTimeWithTimeZone,
    notes: Option<&str>,
) -> Result<Model, errors::ModelError> {
    let now = Utc::now().into();
    let am = ActiveModel {
        pet_id: Set(pet_id),
        vet_id: Set(vet_id),
        scheduled_at: Set(scheduled_at),
        status: Set(STATUS_SCHEDULED.to_string()),
        notes: Set(notes.map(|n| n.to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_by_pets(db: &DatabaseConnection, pet_ids: &[i64]) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::PetId.is_in(pet_ids.iter().copied()))
        .order_by_asc(Column::ScheduledAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn set_status(db: &DatabaseConnection, id: i64, status: &str) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?
        .ok_or_else(|| errors::ModelError::Validation("appointment not found".into()))?
        .into();
    am.status = Set(status.to_string());
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
