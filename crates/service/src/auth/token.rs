use chrono::{Duration, Utc};
use tracing::{debug, instrument, warn};

use super::codec::TokenCodec;
use super::domain::{Claims, TokenPair};
use super::errors::AuthError;
use super::revocation::RevocationStore;

/// Token service configuration. The secret and both lifetimes come from the
/// configs crate at startup; nothing here changes at runtime.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub access_ttl_hours: i64,
    pub refresh_ttl_hours: i64,
}

/// Issues and validates access/refresh tokens for owner identities.
///
/// The only component that knows the two expiry horizons; everything else
/// treats tokens as opaque strings. Validation enforces all three of the
/// trust conditions: signature, expiration, and absence from the revocation
/// store. Every operation is synchronous in-memory work, safe to call from
/// any number of request tasks.
///
/// # Examples
/// ```
/// use service::auth::token::{TokenService, TokenConfig};
/// let svc = TokenService::new(&TokenConfig {
///     secret: "0123456789abcdef0123456789abcdef".into(),
///     access_ttl_hours: 1,
///     refresh_ttl_hours: 24,
/// });
/// let pair = svc.issue_token(42).unwrap();
/// assert_eq!(svc.validate_token(&pair.access_token).unwrap(), 42);
/// ```
pub struct TokenService {
    codec: TokenCodec,
    access_ttl: Duration,
    refresh_ttl: Duration,
    revoked: RevocationStore,
}

impl TokenService {
    pub fn new(cfg: &TokenConfig) -> Self {
        Self {
            codec: TokenCodec::new(&cfg.secret),
            access_ttl: Duration::hours(cfg.access_ttl_hours),
            refresh_ttl: Duration::hours(cfg.refresh_ttl_hours),
            revoked: RevocationStore::new(),
        }
    }

    /// Issue an access/refresh pair for an owner. The same claims map is
    /// encoded twice under the two expiry horizons.
    #[instrument(skip(self))]
    pub fn issue_token(&self, subject_id: i64) -> Result<TokenPair, AuthError> {
        let now = Utc::now();
        let claims = Claims::for_subject(subject_id);
        let access_expires_at = now + self.access_ttl;
        let refresh_expires_at = now + self.refresh_ttl;
        let access_token = self.codec.encode(&claims, access_expires_at)?;
        let refresh_token = self.codec.encode(&claims, refresh_expires_at)?;
        debug!(subject_id, "issued token pair");
        Ok(TokenPair {
            access_token,
            access_expires_at,
            refresh_token,
            refresh_expires_at,
        })
    }

    /// Validate an inbound token and extract the owner id it was issued for.
    ///
    /// Revocation is checked first, independent of signature/expiry
    /// validity. Codec failures are normalized: signature and shape problems
    /// become `InvalidToken`, while `ExpiredToken` stays distinct so callers
    /// can tell clients to refresh instead of re-authenticate.
    pub fn validate_token(&self, token: &str) -> Result<i64, AuthError> {
        if self.revoked.is_revoked(token) {
            return Err(AuthError::Revoked);
        }
        let claims = self.codec.decode(token)?;
        claims.subject_id().ok_or(AuthError::MissingSubject)
    }

    /// Record a token as revoked until its natural expiration. Strings that
    /// do not verify get a conservative refresh-TTL bound so they cannot
    /// linger forever.
    pub fn revoke(&self, token: &str) {
        let expires_at = match self.codec.decode_allow_expired(token) {
            Ok((_, expires_at)) => expires_at,
            Err(e) => {
                warn!(error = %e, "revoking unverifiable token with fallback lifetime");
                Utc::now() + self.refresh_ttl
            }
        };
        self.revoked.add(token, expires_at);
    }

    /// Exchange a refresh token for a new pair. The presented token is
    /// single-use: it is revoked before the replacement pair is issued.
    pub fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        let subject_id = self.validate_token(refresh_token)?;
        self.revoke(refresh_token);
        self.issue_token(subject_id)
    }

    pub fn revocations(&self) -> &RevocationStore {
        &self.revoked
    }
}
