use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::{Map, Value};

use super::{fingerprint, ClaimSet, TokenError};

/// HS256 credential verifier bound to the shared secret.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of logs
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(secret: &str, leeway_secs: u64) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::InvalidSecret);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;
        validation.validate_exp = true;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Verify signature and expiry, then validate the payload shape.
    pub fn verify_strict(&self, token: &str) -> Result<ClaimSet, TokenError> {
        let data = decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)?;
        ClaimSet::from_payload(&data.claims)
    }

    /// Gate entry point: every failure collapses to `None`.
    pub fn verify(&self, token: Option<&str>) -> Option<ClaimSet> {
        let token = token?;

        match self.verify_strict(token) {
            Ok(claims) => Some(claims),
            Err(e) => {
                tracing::debug!(token = %fingerprint(token), error = %e, "credential rejected");
                None
            }
        }
    }
}
