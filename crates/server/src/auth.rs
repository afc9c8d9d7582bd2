use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use service::auth::errors::AuthError;
use service::auth::TokenService;

use crate::errors::ApiError;

/// Authenticated owner id for the current request. Installed into the
/// request's extensions by [`require_auth`] once the bearer token checks
/// out; handlers receive it through the extractor impl below instead of
/// re-deriving identity from the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentOwner(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentOwner
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentOwner>()
            .copied()
            .ok_or_else(|| ApiError::Unauthorized("missing authenticated owner".into()))
    }
}

/// Extract the bearer credential from the canonical `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// Single per-request gate for protected routes.
///
/// One header contract (`Authorization: Bearer <token>`), validated once in
/// the pipeline. CORS pre-flight passes untouched; public routes and static
/// assets are simply not behind this layer. Any token failure ends the
/// request here with 401 before the handler runs, so business code only
/// ever sees the already-validated owner id.
pub async fn require_auth(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path().to_owned();
    let token = match bearer_token(req.headers()) {
        Some(token) => token,
        None => {
            warn!(path = %path, "missing bearer token");
            return Err(ApiError::Unauthorized("missing bearer token".into()));
        }
    };

    match tokens.validate_token(&token) {
        Ok(owner_id) => {
            req.extensions_mut().insert(CurrentOwner(owner_id));
            Ok(next.run(req).await)
        }
        Err(err @ AuthError::ExpiredToken) => {
            warn!(path = %path, code = err.code(), "token expired");
            Err(ApiError::TokenExpired)
        }
        Err(err) => {
            warn!(path = %path, error = %err, code = err.code(), "token validation failed");
            Err(ApiError::Unauthorized(err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        map
    }

    #[test]
    fn bearer_token_parses_canonical_form() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi".into()));
    }

    #[test]
    fn bearer_token_rejects_other_schemes_and_empties() {
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
