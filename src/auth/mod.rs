pub mod extract;
pub mod issue;
pub mod verify;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;

pub use extract::{extract_token, AUTHORIZATION_PREFIX, DEFAULT_COOKIE_NAME};
pub use issue::TokenIssuer;
pub use verify::TokenVerifier;

/// Caller role carried by a credential.
///
/// Roles outside the three known ones are kept verbatim as `Other` and get no
/// elevated access.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Company,
    Consumer,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::Company => "company",
            Role::Consumer => "consumer",
            Role::Other(name) => name,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        match value.as_str() {
            "admin" => Role::Admin,
            "company" => Role::Company,
            "consumer" => Role::Consumer,
            _ => Role::Other(value),
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::from(value.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verified identity payload carried by a credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimSet {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub session_id: String,
    pub iat: f64,
    pub exp: f64,
}

impl ClaimSet {
    /// Structural validation of a decoded token payload.
    ///
    /// Every field must be present with the right JSON type; anything else is
    /// rejected.
    pub fn from_payload(payload: &Map<String, Value>) -> Result<Self, TokenError> {
        Ok(Self {
            user_id: string_claim(payload, "userId")?,
            email: string_claim(payload, "email")?,
            role: Role::from(string_claim(payload, "role")?),
            session_id: string_claim(payload, "sessionId")?,
            iat: number_claim(payload, "iat")?,
            exp: number_claim(payload, "exp")?,
        })
    }
}

fn string_claim(payload: &Map<String, Value>, name: &'static str) -> Result<String, TokenError> {
    match payload.get(name) {
        None => Err(TokenError::MissingClaim(name)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(TokenError::InvalidClaim(name)),
    }
}

fn number_claim(payload: &Map<String, Value>, name: &'static str) -> Result<f64, TokenError> {
    match payload.get(name) {
        None => Err(TokenError::MissingClaim(name)),
        Some(Value::Number(n)) => n.as_f64().ok_or(TokenError::InvalidClaim(name)),
        Some(_) => Err(TokenError::InvalidClaim(name)),
    }
}

/// Claims written into a freshly minted token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub session_id: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Token lifetime of {0} hours is out of range")]
    InvalidExpiry(u64),

    #[error("Missing claim '{0}'")]
    MissingClaim(&'static str),

    #[error("Claim '{0}' has the wrong type")]
    InvalidClaim(&'static str),
}

/// Short, non-reversible token identifier for log lines.
pub fn fingerprint(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    digest[..6].iter().map(|b| format!("{:02x}", b)).collect()
}
