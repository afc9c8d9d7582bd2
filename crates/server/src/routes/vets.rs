use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use service::pagination::Pagination;
use service::vet_service;

use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn list(
    State(state): State<ServerState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<models::vet::Model>>, ApiError> {
    let opts = Pagination {
        page: q.page.unwrap_or(1),
        per_page: q.per_page.unwrap_or(20),
    };
    Ok(Json(vet_service::list_vets(&state.db, opts).await?))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<models::vet::Model>, ApiError> {
    Ok(Json(vet_service::get_vet(&state.db, id).await?))
}
