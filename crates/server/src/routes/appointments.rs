use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use service::appointment_service;

use crate::auth::CurrentOwner;
use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[derive(Deserialize)]
pub struct CreateAppointmentInput {
    pub pet_id: i64,
    pub vet_id: i64,
    pub scheduled_at: DateTime<Utc>,
    pub notes: Option<String>,
}

pub async fn create(
    State(state): State<ServerState>,
    owner: CurrentOwner,
    Json(input): Json<CreateAppointmentInput>,
) -> Result<Json<models::appointment::Model>, ApiError> {
    let created = appointment_service::create_appointment(
        &state.db,
        owner.0,
        input.pet_id,
        input.vet_id,
        input.scheduled_at,
        input.notes.as_deref(),
    )
    .await?;
    Ok(Json(created))
}

pub async fn list(
    State(state): State<ServerState>,
    owner: CurrentOwner,
) -> Result<Json<Vec<models::appointment::Model>>, ApiError> {
    Ok(Json(appointment_service::list_for_owner(&state.db, owner.0).await?))
}

pub async fn cancel(
    State(state): State<ServerState>,
    owner: CurrentOwner,
    Path(id): Path<i64>,
) -> Result<Json<models::appointment::Model>, ApiError> {
    Ok(Json(appointment_service::cancel_appointment(&state.db, owner.0, id).await?))
}
