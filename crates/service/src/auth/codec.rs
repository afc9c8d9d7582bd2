use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::domain::Claims;
use super::errors::CodecError;

/// Wire payload: the claims map plus the registered timestamps. `exp` lives
/// inside the signed payload, so it cannot be altered independently of the
/// signature.
#[derive(Serialize, Deserialize)]
struct Payload {
    exp: i64,
    iat: i64,
    #[serde(flatten)]
    claims: BTreeMap<String, serde_json::Value>,
}

/// Serializes a claims map plus expiration into a compact HS256-signed
/// string (three dot-separated base64url segments), and reverses that
/// operation with failure classification per [`CodecError`].
///
/// The secret is process-wide configuration loaded once at startup; the
/// codec holds the derived keys for the life of the process.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // an expiration in the past is expired, full stop
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Deterministic for identical claims, expiry, and issue instant.
    pub fn encode(&self, claims: &Claims, expires_at: DateTime<Utc>) -> Result<String, CodecError> {
        let payload = Payload {
            exp: expires_at.timestamp(),
            iat: Utc::now().timestamp(),
            claims: claims.values().clone(),
        };
        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding)
            .map_err(|e| CodecError::Encoding(e.to_string()))
    }

    /// Verify the signature, then the expiration, then hand back the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, CodecError> {
        let data = decode::<Payload>(token, &self.decoding, &self.validation).map_err(classify)?;
        Ok(Claims::from_values(data.claims.claims))
    }

    /// Decode without enforcing expiry; the signature must still verify.
    /// Used to learn a token's natural lifetime when recording a revocation.
    pub fn decode_allow_expired(&self, token: &str) -> Result<(Claims, DateTime<Utc>), CodecError> {
        let mut validation = self.validation.clone();
        validation.validate_exp = false;
        let data = decode::<Payload>(token, &self.decoding, &validation).map_err(classify)?;
        let expires_at = DateTime::<Utc>::from_timestamp(data.claims.exp, 0)
            .ok_or_else(|| CodecError::Malformed("expiration out of range".into()))?;
        Ok((Claims::from_values(data.claims.claims), expires_at))
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> CodecError {
    use jsonwebtoken::errors::ErrorKind;
    match err.kind() {
        ErrorKind::ExpiredSignature => CodecError::Expired,
        ErrorKind::InvalidSignature => CodecError::InvalidSignature,
        _ => CodecError::Malformed(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET)
    }

    #[test]
    fn encode_decode_roundtrip() {
        let codec = codec();
        let claims = Claims::for_subject(42);
        let token = codec.encode(&claims, Utc::now() + Duration::hours(1)).unwrap();
        assert_eq!(token.split('.').count(), 3);
        let decoded = codec.decode(&token).unwrap();
        assert_eq!(decoded.subject_id(), Some(42));
    }

    #[test]
    fn extra_claims_survive_roundtrip() {
        let codec = codec();
        let mut claims = Claims::for_subject(7);
        claims.set("scope", "owner");
        let token = codec.encode(&claims, Utc::now() + Duration::hours(1)).unwrap();
        let decoded = codec.decode(&token).unwrap();
        assert_eq!(decoded.get("scope").and_then(|v| v.as_str()), Some("owner"));
        assert_eq!(decoded.subject_id(), Some(7));
    }

    #[test]
    fn past_expiration_is_expired_not_invalid() {
        let codec = codec();
        let claims = Claims::for_subject(42);
        let token = codec.encode(&claims, Utc::now() - Duration::hours(1)).unwrap();
        assert_eq!(codec.decode(&token).unwrap_err(), CodecError::Expired);
    }

    #[test]
    fn altered_signature_fails_verification() {
        let codec = codec();
        let token = codec
            .encode(&Claims::for_subject(42), Utc::now() + Duration::hours(1))
            .unwrap();
        let (head, sig) = token.rsplit_once('.').unwrap();
        // flip the first signature character; the high bits of byte zero change
        let replacement = if sig.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{}.{}{}", head, replacement, &sig[1..]);
        assert_eq!(codec.decode(&tampered).unwrap_err(), CodecError::InvalidSignature);
    }

    #[test]
    fn wrong_key_fails_verification() {
        let token = codec()
            .encode(&Claims::for_subject(42), Utc::now() + Duration::hours(1))
            .unwrap();
        let other = TokenCodec::new("ffffffffffffffffffffffffffffffff");
        assert_eq!(other.decode(&token).unwrap_err(), CodecError::InvalidSignature);
    }

    #[test]
    fn garbage_is_malformed() {
        let codec = codec();
        assert!(matches!(codec.decode("not-a-token").unwrap_err(), CodecError::Malformed(_)));
        assert!(matches!(codec.decode("a.b").unwrap_err(), CodecError::Malformed(_)));
        assert!(matches!(codec.decode("").unwrap_err(), CodecError::Malformed(_)));
    }

    #[test]
    fn decode_allow_expired_reports_lifetime() {
        let codec = codec();
        let expires_at = Utc::now() - Duration::hours(2);
        let token = codec.encode(&Claims::for_subject(9), expires_at).unwrap();
        let (claims, exp) = codec.decode_allow_expired(&token).unwrap();
        assert_eq!(claims.subject_id(), Some(9));
        assert_eq!(exp.timestamp(), expires_at.timestamp());
    }
}
