use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub telephone: String,
    pub address: String,
    pub city: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(ToSchema)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub access_expires_at: String,
    pub refresh_token: String,
    pub refresh_expires_at: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::refresh,
        crate::routes::auth::logout,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            RefreshRequest,
            TokenPairResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth")
    )
)]
pub struct ApiDoc;
