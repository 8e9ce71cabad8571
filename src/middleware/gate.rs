use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{extract_token, ClaimSet, Role};
use crate::error::ApiError;
use crate::policy::{Access, RouteClass};
use crate::state::GateState;

pub const USER_ID_HEADER: HeaderName = HeaderName::from_static("x-user-id");
pub const USER_EMAIL_HEADER: HeaderName = HeaderName::from_static("x-user-email");
pub const USER_ROLE_HEADER: HeaderName = HeaderName::from_static("x-user-role");
pub const SESSION_ID_HEADER: HeaderName = HeaderName::from_static("x-session-id");

const IDENTITY_HEADERS: [HeaderName; 4] = [USER_ID_HEADER, USER_EMAIL_HEADER, USER_ROLE_HEADER, SESSION_ID_HEADER];

/// Authenticated caller, forwarded to handlers as a request extension.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub session_id: String,
}

impl From<ClaimSet> for AuthUser {
    fn from(claims: ClaimSet) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
            session_id: claims.session_id,
        }
    }
}

impl AuthUser {
    /// The four `x-user-*` identity headers. Values that are not valid header
    /// text are left out.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        let fields = [
            (USER_ID_HEADER, self.user_id.as_str()),
            (USER_EMAIL_HEADER, self.email.as_str()),
            (USER_ROLE_HEADER, self.role.as_str()),
            (SESSION_ID_HEADER, self.session_id.as_str()),
        ];

        for (name, value) in fields {
            match HeaderValue::from_str(value) {
                Ok(value) => {
                    map.insert(name, value);
                }
                Err(_) => {
                    tracing::warn!("Dropping identity header {}: value is not valid header text", name);
                }
            }
        }

        map
    }
}

/// Outcome of the gate for a single request.
#[derive(Debug, Clone, PartialEq)]
pub enum Disposition {
    Pass,
    /// Allowed page: no identity headers, caller kept in request extensions.
    PassAuthenticated(AuthUser),
    PassWithIdentity(AuthUser),
    Redirect(String),
    Reject(ApiError),
}

/// Decide what to do with a request from its path and headers alone.
pub fn decide(state: &GateState, path: &str, headers: &HeaderMap) -> Disposition {
    let policy = &state.policy;
    let class = policy.routes.classify(path);

    if class == RouteClass::Bypass {
        return Disposition::Pass;
    }

    let token = extract_token(headers, state.cookie_name());
    let claims = state.verifier.verify(token.as_deref());

    match (class, claims) {
        (RouteClass::Protected, None) => Disposition::Redirect(login_redirect(&policy.login_path, path)),
        (RouteClass::Protected, Some(claims)) => match policy.access.resolve(&claims.role, path) {
            Access::Deny => {
                tracing::info!(
                    user_id = %claims.user_id,
                    role = %claims.role,
                    path,
                    "access denied"
                );
                Disposition::Reject(ApiError::insufficient_permissions("Access denied"))
            }
            Access::Allow if path.starts_with("/api") => Disposition::PassWithIdentity(claims.into()),
            Access::Allow => Disposition::PassAuthenticated(claims.into()),
        },
        (RouteClass::AuthOnly, Some(claims)) => {
            Disposition::Redirect(policy.access.dashboard_for(&claims.role).to_string())
        }
        (RouteClass::ProtectedApi, None) => {
            Disposition::Reject(ApiError::unauthorized("Authentication required"))
        }
        (RouteClass::ProtectedApi, Some(claims)) => Disposition::PassWithIdentity(claims.into()),
        _ => Disposition::Pass,
    }
}

/// `<login>?redirect=<path>` with the path form-encoded.
pub fn login_redirect(login_path: &str, original_path: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("redirect", original_path)
        .finish();
    format!("{}?{}", login_path, query)
}

/// Gate middleware applied in front of every route
pub async fn gate_middleware(State(state): State<GateState>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();
    let disposition = decide(&state, &path, request.headers());

    tracing::debug!(path = %path, disposition = ?disposition, "gate decision");

    match disposition {
        Disposition::Pass => next.run(request).await,
        Disposition::PassAuthenticated(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Disposition::PassWithIdentity(user) => {
            let identity = user.headers();

            // Client values never survive, even for claims that could not be forwarded
            for name in IDENTITY_HEADERS {
                request.headers_mut().remove(name);
            }
            request.headers_mut().extend(identity.clone());
            request.extensions_mut().insert(user);

            let mut response = next.run(request).await;
            response.headers_mut().extend(identity);
            response
        }
        Disposition::Redirect(location) => redirect(&location),
        Disposition::Reject(error) => error.into_response(),
    }
}

fn redirect(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => {
            tracing::error!("Redirect target is not a valid Location header: {}", location);
            ApiError::internal_server_error("Invalid redirect target").into_response()
        }
    }
}
