pub mod access;
pub mod routes;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use access::{Access, AccessPolicy};
pub use routes::{RouteClass, RouteTable};

/// Route table plus access rules, fixed for the life of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatePolicy {
    pub routes: RouteTable,
    pub access: AccessPolicy,
    pub login_path: String,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            routes: RouteTable::default(),
            access: AccessPolicy::default(),
            login_path: "/login".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("Failed to read policy file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid policy file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
}

impl GatePolicy {
    /// Parse a YAML policy; keys left out keep their built-in values.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let contents = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: display.clone(),
            source,
        })?;

        Self::from_yaml(&contents).map_err(|source| PolicyError::Parse {
            path: display,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let policy = GatePolicy::from_yaml(
            r#"
access:
  role_prefixes:
    consumer: ["/consumer", "/billing"]
"#,
        )
        .unwrap();

        assert_eq!(policy.routes, RouteTable::default());
        assert_eq!(policy.login_path, "/login");
        assert_eq!(policy.access.resolve(&Role::Consumer, "/billing"), Access::Allow);
        // The whole map is replaced, so company loses its entries
        assert_eq!(policy.access.resolve(&Role::Company, "/company"), Access::Deny);
        assert_eq!(policy.access.dashboard_for(&Role::Admin), "/admin");
    }

    #[test]
    fn test_route_override() {
        let policy = GatePolicy::from_yaml(
            r#"
routes:
  protected: ["/fleet"]
login_path: /signin
"#,
        )
        .unwrap();

        assert_eq!(policy.routes.classify("/fleet/7"), RouteClass::Protected);
        assert_eq!(policy.routes.classify("/admin"), RouteClass::Unclassified);
        assert_eq!(policy.login_path, "/signin");
    }

    #[test]
    fn test_malformed_yaml() {
        assert!(GatePolicy::from_yaml("routes: [not, a, map]").is_err());
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/gate-policy.example.yaml");
        assert_eq!(GatePolicy::from_file(path).unwrap(), GatePolicy::default());
    }

    #[test]
    fn test_missing_file() {
        let err = GatePolicy::from_file("/nonexistent/gate-policy.yaml").unwrap_err();
        assert!(matches!(err, PolicyError::Io { .. }));
    }
}
