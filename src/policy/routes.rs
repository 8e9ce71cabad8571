use serde::{Deserialize, Serialize};

/// Where a request path falls in the gate's route table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteClass {
    /// Static assets and auth endpoints; never gated.
    Bypass,
    Public,
    AuthOnly,
    Protected,
    ProtectedApi,
    Unclassified,
}

impl RouteClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteClass::Bypass => "bypass",
            RouteClass::Public => "public",
            RouteClass::AuthOnly => "auth_only",
            RouteClass::Protected => "protected",
            RouteClass::ProtectedApi => "protected_api",
            RouteClass::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for RouteClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static prefix lists the classifier scans, in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    pub bypass_prefixes: Vec<String>,
    pub protected: Vec<String>,
    pub auth_only: Vec<String>,
    pub protected_api: Vec<String>,
    /// Exact paths; informational only, treated like unclassified routes.
    pub public: Vec<String>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            bypass_prefixes: strings(&["/_next", "/api/auth", "/favicon"]),
            protected: strings(&[
                "/admin",
                "/company",
                "/consumer",
                "/dashboard",
                "/devices",
                "/analytics",
                "/billing",
                "/profile",
                "/settings",
            ]),
            auth_only: strings(&["/login", "/register", "/forgot-password", "/reset-password"]),
            protected_api: strings(&[
                "/api/devices",
                "/api/analytics",
                "/api/billing",
                "/api/profile",
                "/api/admin",
            ]),
            public: strings(&["/", "/about", "/contact", "/pricing", "/features"]),
        }
    }
}

impl RouteTable {
    /// Paths skipped before classification: bypass prefixes, or anything that
    /// looks like a file (contains a dot).
    pub fn is_bypass(&self, path: &str) -> bool {
        path.contains('.') || starts_with_any(path, &self.bypass_prefixes)
    }

    /// First match wins: Protected, then AuthOnly, then ProtectedApi.
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.is_bypass(path) {
            RouteClass::Bypass
        } else if starts_with_any(path, &self.protected) {
            RouteClass::Protected
        } else if starts_with_any(path, &self.auth_only) {
            RouteClass::AuthOnly
        } else if starts_with_any(path, &self.protected_api) {
            RouteClass::ProtectedApi
        } else if self.public.iter().any(|p| p == path) {
            RouteClass::Public
        } else {
            RouteClass::Unclassified
        }
    }
}

pub(crate) fn starts_with_any(path: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
}

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
