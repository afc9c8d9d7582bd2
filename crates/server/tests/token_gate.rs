use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{middleware, routing::get, Router};
use chrono::{Duration, Utc};
use tower::Service;

use server::auth::{require_auth, CurrentOwner};
use service::auth::codec::TokenCodec;
use service::auth::domain::Claims;
use service::auth::token::{TokenConfig, TokenService};

const SECRET: &str = "test-secret-0123456789abcdef01234567";

fn token_service() -> Arc<TokenService> {
    Arc::new(TokenService::new(&TokenConfig {
        secret: SECRET.into(),
        access_ttl_hours: 1,
        refresh_ttl_hours: 24,
    }))
}

/// Minimal router: one gated route that counts handler invocations and
/// echoes the authenticated owner id, plus one public route outside the
/// gate.
fn app(tokens: Arc<TokenService>, hits: Arc<AtomicUsize>) -> Router {
    let gated = Router::new()
        .route(
            "/api/whoami",
            get(move |owner: CurrentOwner| {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    owner.0.to_string()
                }
            }),
        )
        .route_layer(middleware::from_fn_with_state(tokens, require_auth));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(gated)
}

fn get_request(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn missing_token_is_denied_before_the_handler_runs() {
    let hits = Arc::new(AtomicUsize::new(0));
    let mut app = app(token_service(), hits.clone());

    let resp = app.call(get_request("/api/whoami", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn valid_token_reaches_the_handler_with_the_subject() {
    let tokens = token_service();
    let hits = Arc::new(AtomicUsize::new(0));
    let mut app = app(tokens.clone(), hits.clone());

    let pair = tokens.issue_token(42).unwrap();
    let resp = app
        .call(get_request("/api/whoami", Some(&pair.access_token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "42");
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn expired_token_gets_the_distinguishable_code() {
    let tokens = token_service();
    let hits = Arc::new(AtomicUsize::new(0));
    let mut app = app(tokens, hits.clone());

    let codec = TokenCodec::new(SECRET);
    let stale = codec
        .encode(&Claims::for_subject(42), Utc::now() - Duration::hours(1))
        .unwrap();
    let resp = app.call(get_request("/api/whoami", Some(&stale))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_string(resp).await.contains("token_expired"));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let tokens = token_service();
    let hits = Arc::new(AtomicUsize::new(0));
    let mut app = app(tokens.clone(), hits.clone());

    let pair = tokens.issue_token(42).unwrap();
    let (head, sig) = pair.access_token.rsplit_once('.').unwrap();
    let replacement = if sig.starts_with('A') { 'B' } else { 'A' };
    let tampered = format!("{}.{}{}", head, replacement, &sig[1..]);

    let resp = app.call(get_request("/api/whoami", Some(&tampered))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn revoked_token_is_rejected_at_the_gate() {
    let tokens = token_service();
    let hits = Arc::new(AtomicUsize::new(0));
    let mut app = app(tokens.clone(), hits.clone());

    let pair = tokens.issue_token(42).unwrap();
    tokens.revoke(&pair.access_token);

    let resp = app
        .call(get_request("/api/whoami", Some(&pair.access_token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(body_string(resp).await.contains("revoked"));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn preflight_requests_pass_the_gate_untouched() {
    let mut app = app(token_service(), Arc::new(AtomicUsize::new(0)));

    let req = Request::builder()
        .method("OPTIONS")
        .uri("/api/whoami")
        .body(Body::empty())
        .unwrap();
    let resp = app.call(req).await.unwrap();
    // no 401: the gate let it through to the method router
    assert_ne!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_routes_are_not_gated() {
    let mut app = app(token_service(), Arc::new(AtomicUsize::new(0)));

    let resp = app.call(get_request("/health", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
