use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::DEFAULT_COOKIE_NAME;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    /// Optional YAML file replacing the built-in route and access tables.
    pub policy_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing, default)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub jwt_leeway_secs: u64,
    pub auth_cookie_name: String,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl std::fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("jwt_leeway_secs", &self.jwt_leeway_secs)
            .field("auth_cookie_name", &self.auth_cookie_name)
            .field("enable_cors", &self.enable_cors)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_overrides(&lookup)?;

        if config.security.jwt_secret.is_empty() {
            return Err(ConfigError::Missing("JWT_SECRET"));
        }

        Ok(config)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Security overrides
        if let Some(v) = lookup("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Some(v) = lookup("JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().map_err(|_| ConfigError::Invalid("JWT_EXPIRY_HOURS"))?;
        }
        if let Some(v) = lookup("JWT_LEEWAY_SECS") {
            self.security.jwt_leeway_secs = v.parse().map_err(|_| ConfigError::Invalid("JWT_LEEWAY_SECS"))?;
        }
        if let Some(v) = lookup("AUTH_COOKIE_NAME") {
            if v.trim().is_empty() {
                return Err(ConfigError::Invalid("AUTH_COOKIE_NAME"));
            }
            self.security.auth_cookie_name = v.trim().to_string();
        }
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // API overrides
        if let Some(v) = lookup("GATE_PORT").or_else(|| lookup("PORT")) {
            self.api.port = v.parse().map_err(|_| ConfigError::Invalid("GATE_PORT"))?;
        }
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        if let Some(v) = lookup("GATE_POLICY_FILE") {
            self.policy_file = Some(PathBuf::from(v)).filter(|p| !p.as_os_str().is_empty());
        }

        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24 * 7, // 1 week
                jwt_leeway_secs: 0,
                auth_cookie_name: DEFAULT_COOKIE_NAME.to_string(),
                enable_cors: true,
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
            },
            policy_file: None,
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                port: 3000,
                enable_request_logging: true,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                jwt_leeway_secs: 0,
                auth_cookie_name: DEFAULT_COOKIE_NAME.to_string(),
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
            policy_file: None,
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                port: 3000,
                enable_request_logging: false,
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                jwt_leeway_secs: 0,
                auth_cookie_name: DEFAULT_COOKIE_NAME.to_string(),
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
            policy_file: None,
        }
    }

    /// Development defaults with the given secret; handy for tests and tooling.
    pub fn with_secret(secret: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.security.jwt_secret = secret.into();
        config
    }

    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_secret_is_required() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));

        let err = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.security.auth_cookie_name, "auth-token");
        assert_eq!(config.security.jwt_leeway_secs, 0);
        assert_eq!(config.api.port, 3000);
        assert!(config.policy_file.is_none());
    }

    #[test]
    fn test_default_production_config() {
        let config =
            AppConfig::from_lookup(lookup(&[("APP_ENV", "prod"), ("JWT_SECRET", "s3cret")])).unwrap();
        assert!(config.is_production());
        assert_eq!(config.security.jwt_expiry_hours, 4);
        assert!(!config.api.enable_request_logging);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("JWT_LEEWAY_SECS", "30"),
            ("AUTH_COOKIE_NAME", "session"),
            ("SECURITY_CORS_ORIGINS", "https://a.example, https://b.example,"),
            ("PORT", "8080"),
            ("GATE_POLICY_FILE", "/etc/gate/policy.yaml"),
        ]))
        .unwrap();

        assert_eq!(config.security.jwt_leeway_secs, 30);
        assert_eq!(config.security.auth_cookie_name, "session");
        assert_eq!(config.security.cors_origins, vec!["https://a.example", "https://b.example"]);
        assert_eq!(config.api.port, 8080);
        assert_eq!(config.policy_file, Some(PathBuf::from("/etc/gate/policy.yaml")));
    }

    #[test]
    fn test_invalid_numbers_fail() {
        let err = AppConfig::from_lookup(lookup(&[("JWT_SECRET", "s"), ("GATE_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("GATE_PORT")));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AppConfig::with_secret("do-not-print");
        assert!(!format!("{:?}", config).contains("do-not-print"));
    }
}
