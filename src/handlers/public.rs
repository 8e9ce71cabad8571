use axum::extract::Query;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::middleware::ApiResponse;

/// GET / - service description
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "IoT Gate",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Request-authorization gate for the IoT management dashboards",
        "sections": {
            "admin": "/admin (admin)",
            "company": "/company, /billing (company)",
            "consumer": "/consumer (consumer)",
            "shared": "/dashboard, /devices, /analytics, /profile, /settings (any role)",
            "api": "/api/devices, /api/analytics, /api/billing, /api/profile, /api/admin",
        }
    }))
}

/// GET /health
pub async fn health() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "status": "ok",
        "timestamp": Utc::now(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub redirect: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub page: &'static str,
    pub redirect: Option<String>,
}

/// GET /login - only reached by visitors without a valid credential
pub async fn login(Query(query): Query<LoginQuery>) -> ApiResponse<LoginPage> {
    ApiResponse::success(LoginPage {
        page: "login",
        redirect: query.redirect,
    })
}
