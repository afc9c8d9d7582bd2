use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Claim key carrying the authenticated owner's id.
pub const SUBJECT_CLAIM: &str = "sub";

/// Claims payload embedded in a signed token: a small map from string keys
/// to JSON scalars. Built fresh per issuance and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims {
    values: BTreeMap<String, serde_json::Value>,
}

impl Claims {
    pub fn new() -> Self { Self::default() }

    /// Claims for an authenticated owner.
    pub fn for_subject(subject_id: i64) -> Self {
        let mut claims = Self::default();
        claims.set(SUBJECT_CLAIM, subject_id);
        claims
    }

    pub fn set(&mut self, key: &str, value: impl Into<serde_json::Value>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.values.get(key)
    }

    /// The subject id, if present and integral.
    pub fn subject_id(&self) -> Option<i64> {
        self.values.get(SUBJECT_CLAIM).and_then(serde_json::Value::as_i64)
    }

    pub fn is_empty(&self) -> bool { self.values.is_empty() }

    pub(crate) fn values(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.values
    }

    pub(crate) fn from_values(values: BTreeMap<String, serde_json::Value>) -> Self {
        Self { values }
    }
}

/// Access/refresh pair returned on login and refresh. The two tokens are
/// structurally identical; only their lifetimes differ.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_expires_at: DateTime<Utc>,
}

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub telephone: String,
    pub address: String,
    pub city: String,
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Domain owner account (business view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerAccount {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub telephone: String,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub owner_id: i64,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Login result: the owner plus their freshly issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerSession {
    pub owner: OwnerAccount,
    pub tokens: TokenPair,
}
