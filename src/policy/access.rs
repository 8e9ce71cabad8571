use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::routes::{starts_with_any, strings};
use crate::auth::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Allow,
    Deny,
}

/// Role to path-prefix access rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessPolicy {
    /// Prefixes each role may reach beyond the general list.
    pub role_prefixes: HashMap<String, Vec<String>>,
    /// Reachable by any authenticated role.
    pub general_protected: Vec<String>,
    /// Landing page per role for signed-in visitors of auth-only routes.
    pub dashboards: HashMap<String, String>,
    pub default_dashboard: String,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        let role_prefixes = HashMap::from([
            ("company".to_string(), strings(&["/company", "/billing"])),
            ("consumer".to_string(), strings(&["/consumer"])),
        ]);

        let dashboards = HashMap::from([
            ("admin".to_string(), "/admin".to_string()),
            ("company".to_string(), "/company".to_string()),
            ("consumer".to_string(), "/consumer".to_string()),
        ]);

        Self {
            role_prefixes,
            general_protected: strings(&["/dashboard", "/devices", "/analytics", "/profile", "/settings"]),
            dashboards,
            default_dashboard: "/dashboard".to_string(),
        }
    }
}

impl AccessPolicy {
    pub fn resolve(&self, role: &Role, path: &str) -> Access {
        if role.is_admin() {
            return Access::Allow;
        }

        let role_match = self
            .role_prefixes
            .get(role.as_str())
            .is_some_and(|prefixes| starts_with_any(path, prefixes));

        if role_match || starts_with_any(path, &self.general_protected) {
            Access::Allow
        } else {
            Access::Deny
        }
    }

    pub fn dashboard_for(&self, role: &Role) -> &str {
        self.dashboards
            .get(role.as_str())
            .map(String::as_str)
            .unwrap_or(self.default_dashboard.as_str())
    }
}
