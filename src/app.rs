use axum::{http::HeaderValue, middleware, routing::get, Router};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{self, api, pages, public};
use crate::middleware::gate_middleware;
use crate::state::GateState;

/// Dashboard sections served behind the gate's role checks.
const SECTIONS: [&str; 9] = [
    "/admin",
    "/company",
    "/consumer",
    "/dashboard",
    "/devices",
    "/analytics",
    "/billing",
    "/profile",
    "/settings",
];

pub fn app(state: GateState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/login", get(public::login))
        // Identity-forwarding API
        .merge(api_routes());

    for section in SECTIONS {
        router = router
            .route(section, get(pages::section))
            .route(&format!("{}/*rest", section), get(pages::section));
    }

    let router = router
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), gate_middleware));

    let router = match cors_layer(&state) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    if state.config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn api_routes() -> Router {
    Router::new()
        .route("/api/profile", get(api::profile))
        .route("/api/devices", get(api::devices))
}

fn cors_layer(state: &GateState) -> Option<CorsLayer> {
    let security = &state.config.security;
    if !security.enable_cors {
        return None;
    }

    if security.cors_origins.iter().any(|origin| origin == "*") {
        return Some(CorsLayer::new().allow_origin(AllowOrigin::any()));
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(CorsLayer::new().allow_origin(AllowOrigin::list(origins)))
}
