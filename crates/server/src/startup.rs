use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, auth::ServerState};
use service::auth::token::{TokenConfig, TokenService};
use service::runtime;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8081);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    runtime::ensure_env("frontend").await?;

    // config.toml first; env vars cover the essentials when it is absent
    let (db, token_cfg) = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => {
            let db = models::db::connect_from(&cfg.database).await?;
            let token_cfg = TokenConfig {
                secret: cfg.auth.secret.clone(),
                access_ttl_hours: cfg.auth.access_ttl_hours,
                refresh_ttl_hours: cfg.auth.refresh_ttl_hours,
            };
            (db, token_cfg)
        }
        Err(_) => {
            let db = models::db::connect().await?;
            let secret = env::var("JWT_SECRET")
                .unwrap_or_else(|_| "dev-secret-change-me-0123456789ab".to_string());
            let token_cfg = TokenConfig { secret, access_ttl_hours: 2, refresh_ttl_hours: 168 };
            (db, token_cfg)
        }
    };

    let state = ServerState {
        db,
        tokens: Arc::new(TokenService::new(&token_cfg)),
    };

    // Build router
    let cors = build_cors();
    let app: Router = routes::build_router(state, cors);

    // Bind and serve
    let addr = load_bind_addr()?;
    info!(%addr, "starting clinic server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
