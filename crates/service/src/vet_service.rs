use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder};

use crate::errors::ServiceError;
use crate::pagination::Pagination;
use models::vet;

/// List vets with pagination.
pub async fn list_vets(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<vet::Model>, ServiceError> {
    let (page_idx, per_page) = opts.normalize();
    vet::Entity::find()
        .order_by_asc(vet::Column::Id)
        .paginate(db, per_page)
        .fetch_page(page_idx)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// Get a vet by id.
pub async fn get_vet(db: &DatabaseConnection, id: i64) -> Result<vet::Model, ServiceError> {
    vet::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("vet"))
}
