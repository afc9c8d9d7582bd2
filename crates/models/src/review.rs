use sea_orm::{entity::prelude::*, DatabaseConnection, QueryFilter, QueryOrder, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::owner;
use crate::vet;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner_id: i64,
    pub vet_id: i64,
    pub score: i16,
    pub comment: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Owner,
    Vet,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Owner => Entity::belongs_to(owner::Entity)
                .from(Column::OwnerId)
                .to(owner::Column::Id)
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
    owner_id: i64,
    vet_id: i64,
    score: i16,
    comment: Option<&str>,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        owner_id: Set(owner_id),
        vet_id: Set(vet_id),
        score: Set(score),
        comment: Set(comment.map(|c| c.to_string())),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn list_by_vet(db: &DatabaseConnection, vet_id: i64) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::VetId.eq(vet_id))
        .order_by_desc(Column::CreatedAt)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}
