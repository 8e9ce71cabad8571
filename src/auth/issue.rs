use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use super::{Claims, Role, TokenError};

/// Mints HS256 credentials with the same secret the gate verifies against.
///
/// Production tokens come from the login service; this exists for tooling and
/// tests.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    expiry_hours: u64,
}

impl TokenIssuer {
    pub fn new(secret: &str, expiry_hours: u64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            expiry_hours,
        })
    }

    pub fn mint(
        &self,
        user_id: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        session_id: impl Into<String>,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let exp = i64::try_from(self.expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or(TokenError::InvalidExpiry(self.expiry_hours))?;

        self.sign(&Claims {
            user_id: user_id.into(),
            email: email.into(),
            role,
            session_id: session_id.into(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        })
    }

    /// Sign a fully specified claim set, timestamps included.
    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        Ok(encode(&Header::default(), claims, &self.encoding_key)?)
    }
}
