use thiserror::Error;

/// Low-level token parse/verify failures raised by the codec.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Payload/signature does not verify against the current secret key.
    #[error("invalid signature")]
    InvalidSignature,
    /// Signature valid, but the embedded expiration is in the past.
    #[error("token expired")]
    Expired,
    /// Not a valid three-segment token, or the payload is undecodable.
    #[error("malformed token: {0}")]
    Malformed(String),
    /// Issuance-side failure (unusable key or unserializable claims).
    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("owner already exists")]
    Conflict,
    #[error("owner not found")]
    NotFound,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("invalid token")]
    InvalidToken,
    #[error("token expired")]
    ExpiredToken,
    #[error("token missing subject claim")]
    MissingSubject,
    #[error("token revoked")]
    Revoked,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::NotFound => 1003,
            AuthError::Unauthorized => 1004,
            AuthError::InvalidToken => 1010,
            AuthError::ExpiredToken => 1011,
            AuthError::MissingSubject => 1012,
            AuthError::Revoked => 1013,
            AuthError::Hash(_) => 1101,
            AuthError::Token(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<CodecError> for AuthError {
    fn from(err: CodecError) -> Self {
        match err {
            // Callers only care whether the client should refresh or re-login,
            // so signature and shape failures collapse into one kind.
            CodecError::InvalidSignature | CodecError::Malformed(_) => AuthError::InvalidToken,
            CodecError::Expired => AuthError::ExpiredToken,
            CodecError::Encoding(e) => AuthError::Token(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_failures_normalize() {
        assert!(matches!(AuthError::from(CodecError::InvalidSignature), AuthError::InvalidToken));
        assert!(matches!(AuthError::from(CodecError::Malformed("x".into())), AuthError::InvalidToken));
        assert!(matches!(AuthError::from(CodecError::Expired), AuthError::ExpiredToken));
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(AuthError::InvalidToken.code(), 1010);
        assert_eq!(AuthError::ExpiredToken.code(), 1011);
        assert_eq!(AuthError::Revoked.code(), 1013);
    }
}
