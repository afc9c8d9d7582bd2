use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use service::auth::domain::{LoginInput, RegisterInput, TokenPair};
use service::auth::repo::seaorm::SeaOrmOwnerRepository;
use service::auth::{AccountService, TokenService};

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub tokens: Arc<TokenService>,
}

fn account_service(state: &ServerState) -> AccountService<SeaOrmOwnerRepository> {
    AccountService::new(
        Arc::new(SeaOrmOwnerRepository { db: state.db.clone() }),
        Arc::clone(&state.tokens),
    )
}

#[derive(Serialize)]
pub struct RegisterOutput {
    pub owner_id: i64,
}

#[derive(Serialize)]
pub struct LoginOutput {
    pub owner_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub tokens: TokenPair,
}

#[derive(Deserialize)]
pub struct RefreshInput {
    pub refresh_token: String,
}

#[derive(Deserialize, Default)]
pub struct LogoutInput {
    pub refresh_token: Option<String>,
}

#[utoipa::path(post, path = "/auth/register", tag = "auth", request_body = crate::openapi::RegisterRequest, responses((status = 200, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<RegisterInput>,
) -> Result<Json<RegisterOutput>, ApiError> {
    models::owner::validate_email(&input.email).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    models::owner::validate_name(&input.first_name).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    models::owner::validate_name(&input.last_name).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let owner = account_service(&state).register(input).await?;
    Ok(Json(RegisterOutput { owner_id: owner.id }))
}

#[utoipa::path(post, path = "/auth/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged in"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<LoginOutput>, ApiError> {
    let session = account_service(&state).login(input).await?;
    Ok(Json(LoginOutput {
        owner_id: session.owner.id,
        email: session.owner.email,
        first_name: session.owner.first_name,
        last_name: session.owner.last_name,
        tokens: session.tokens,
    }))
}

/// Exchange a refresh token for a fresh pair. The presented token is
/// revoked as part of the exchange, so it cannot be replayed.
#[utoipa::path(post, path = "/auth/refresh", tag = "auth", request_body = crate::openapi::RefreshRequest, responses((status = 200, description = "New token pair"), (status = 401, description = "Unauthorized")))]
pub async fn refresh(
    State(state): State<ServerState>,
    Json(input): Json<RefreshInput>,
) -> Result<Json<TokenPair>, ApiError> {
    let tokens = state.tokens.refresh(&input.refresh_token)?;
    Ok(Json(tokens))
}

/// Revoke the presented access token (and the refresh token, when the
/// client sends it along) so neither can be used again.
#[utoipa::path(post, path = "/auth/logout", tag = "auth", responses((status = 204, description = "Logged out"), (status = 401, description = "Unauthorized")))]
pub async fn logout(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Option<Json<LogoutInput>>,
) -> StatusCode {
    if let Some(token) = crate::auth::bearer_token(&headers) {
        state.tokens.revoke(&token);
    }
    if let Some(Json(input)) = body {
        if let Some(refresh_token) = input.refresh_token {
            state.tokens.revoke(&refresh_token);
        }
    }
    StatusCode::NO_CONTENT
}
