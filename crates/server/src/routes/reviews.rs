use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use service::review_service;

use crate::auth::CurrentOwner;
use crate::errors::ApiError;
use crate::routes::auth::ServerState;

#[derive(Deserialize)]
pub struct CreateReviewInput {
    pub score: i16,
    pub comment: Option<String>,
}

pub async fn create(
    State(state): State<ServerState>,
    owner: CurrentOwner,
    Path(vet_id): Path<i64>,
    Json(input): Json<CreateReviewInput>,
) -> Result<Json<models::review::Model>, ApiError> {
    let created = review_service::create_review(
        &state.db,
        owner.0,
        vet_id,
        input.score,
        input.comment.as_deref(),
    )
    .await?;
    Ok(Json(created))
}

pub async fn list(
    State(state): State<ServerState>,
    Path(vet_id): Path<i64>,
) -> Result<Json<Vec<models::review::Model>>, ApiError> {
    Ok(Json(review_service::list_for_vet(&state.db, vet_id).await?))
}
