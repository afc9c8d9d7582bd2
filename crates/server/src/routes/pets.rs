use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use service::pet::repository::SeaOrmPetRepository;
use service::pet::PetService;

use crate::auth::CurrentOwner;
use crate::errors::ApiError;
use crate::routes::auth::ServerState;

fn pet_service(state: &ServerState) -> PetService<SeaOrmPetRepository> {
    PetService::new(Arc::new(SeaOrmPetRepository { db: state.db.clone() }))
}

#[derive(Deserialize)]
pub struct CreatePetInput {
    pub name: String,
    pub species: String,
    pub birth_date: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct UpdatePetInput {
    pub name: Option<String>,
    pub species: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

pub async fn list(
    State(state): State<ServerState>,
    owner: CurrentOwner,
) -> Result<Json<Vec<models::pet::Model>>, ApiError> {
    Ok(Json(pet_service(&state).list(owner.0).await?))
}

pub async fn create(
    State(state): State<ServerState>,
    owner: CurrentOwner,
    Json(input): Json<CreatePetInput>,
) -> Result<Json<models::pet::Model>, ApiError> {
    let created = pet_service(&state)
        .create(owner.0, &input.name, &input.species, input.birth_date)
        .await?;
    Ok(Json(created))
}

pub async fn get(
    State(state): State<ServerState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
) -> Result<Json<models::pet::Model>, ApiError> {
    Ok(Json(pet_service(&state).get_owned(owner.0, id).await?))
}

pub async fn update(
    State(state): State<ServerState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
    Json(input): Json<UpdatePetInput>,
) -> Result<Json<models::pet::Model>, ApiError> {
    let updated = pet_service(&state)
        .update(owner.0, id, input.name.as_deref(), input.species.as_deref(), input.birth_date)
        .await?;
    Ok(Json(updated))
}

pub async fn remove(
    State(state): State<ServerState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    pet_service(&state).delete(owner.0, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
