use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::routes::auth::ServerState;

pub mod auth;
pub mod owners;
pub mod pets;
pub mod vets;
pub mod appointments;
pub mod visits;
pub mod reviews;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service healthy")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: public routes, the gated API surface,
/// API docs, and static assets.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let static_assets = ServeDir::new("frontend").fallback(ServeFile::new("frontend/index.html"));

    // Public: health and the unauthenticated auth surface
    let public = Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh));

    // Everything else goes through the bearer-token gate exactly once
    let api = Router::new()
        .route("/auth/logout", post(auth::logout))
        .route("/api/me", get(owners::me).put(owners::update_me))
        .route("/api/pets", get(pets::list).post(pets::create))
        .route("/api/pets/:id", get(pets::get).put(pets::update).delete(pets::remove))
        .route("/api/pets/:id/visits", get(visits::history).post(visits::record))
        .route("/api/vets", get(vets::list))
        .route("/api/vets/:id", get(vets::get))
        .route("/api/vets/:id/reviews", get(reviews::list).post(reviews::create))
        .route("/api/appointments", get(appointments::list).post(appointments::create))
        .route("/api/appointments/:id/cancel", post(appointments::cancel))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            crate::auth::require_auth,
        ));

    public
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .fallback_service(static_assets)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // span per request with method and path, at INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // response status and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx and friends logged as errors
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
