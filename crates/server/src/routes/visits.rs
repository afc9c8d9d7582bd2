use axum::{
    extract::{Path, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use service::visit_service;

use crate::auth::CurrentOwner;
use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[derive(Deserialize)]
pub struct RecordVisitInput {
    pub vet_id: i64,
    pub visit_date: NaiveDate,
    pub description: String,
}

pub async fn record(
    State(state): State<ServerState>,
    owner: CurrentOwner,
    Path(pet_id): Path<i64>,
    Json(input): Json<RecordVisitInput>,
) -> Result<Json<models::visit::Model>, ApiError> {
    let created = visit_service::record_visit(
        &state.db,
        owner.0,
        pet_id,
        input.vet_id,
        input.visit_date,
        &input.description,
    )
    .await?;
    Ok(Json(created))
}

pub async fn history(
    State(state): State<ServerState>,
    owner: CurrentOwner,
    Path(pet_id): Path<i64>,
) -> Result<Json<Vec<models::visit::Model>>, ApiError> {
    Ok(Json(visit_service::pet_history(&state.db, owner.0, pet_id).await?))
}
