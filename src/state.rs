// Shared, read-only request context. Cloned per request; everything inside is Arc'd.
use std::sync::Arc;

use crate::auth::{TokenError, TokenVerifier};
use crate::config::AppConfig;
use crate::policy::{GatePolicy, PolicyError};

#[derive(Clone, Debug)]
pub struct GateState {
    pub config: Arc<AppConfig>,
    pub policy: Arc<GatePolicy>,
    pub verifier: Arc<TokenVerifier>,
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl GateState {
    pub fn new(config: AppConfig, policy: GatePolicy) -> Result<Self, StateError> {
        let verifier = TokenVerifier::new(&config.security.jwt_secret, config.security.jwt_leeway_secs)?;

        Ok(Self {
            config: Arc::new(config),
            policy: Arc::new(policy),
            verifier: Arc::new(verifier),
        })
    }

    /// Use the policy file named in config, or the built-in tables.
    pub fn from_config(config: AppConfig) -> Result<Self, StateError> {
        let policy = match &config.policy_file {
            Some(path) => {
                tracing::info!("Loading gate policy from {}", path.display());
                GatePolicy::from_file(path)?
            }
            None => GatePolicy::default(),
        };

        Self::new(config, policy)
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.security.auth_cookie_name
    }
}
