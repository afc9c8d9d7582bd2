use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use service::owner_service;

use crate::auth::CurrentOwner;
use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[derive(Serialize)]
pub struct MeOutput {
    pub owner_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub telephone: String,
    pub address: String,
    pub city: String,
}

#[derive(Deserialize)]
pub struct UpdateMeInput {
    pub telephone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

fn to_output(o: models::owner::Model) -> MeOutput {
    MeOutput {
        owner_id: o.id,
        email: o.email,
        first_name: o.first_name,
        last_name: o.last_name,
        telephone: o.telephone,
        address: o.address,
        city: o.city,
    }
}

/// Profile of the owner making the request.
pub async fn me(State(state): State<ServerState>, owner: CurrentOwner) -> Result<Json<MeOutput>, ApiError> {
    let o = owner_service::get_owner(&state.db, owner.0).await?;
    Ok(Json(to_output(o)))
}

pub async fn update_me(
    State(state): State<ServerState>,
    owner: CurrentOwner,
    Json(input): Json<UpdateMeInput>,
) -> Result<Json<MeOutput>, ApiError> {
    let o = owner_service::update_profile(
        &state.db,
        owner.0,
        input.telephone.as_deref(),
        input.address.as_deref(),
        input.city.as_deref(),
    )
    .await?;
    Ok(Json(to_output(o)))
}
