use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, HeaderName},
};
use serde::Serialize;

use crate::error::ApiError;
use crate::middleware::gate::{SESSION_ID_HEADER, USER_EMAIL_HEADER, USER_ID_HEADER, USER_ROLE_HEADER};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// Caller identity as forwarded by the gate.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub role: String,
    pub session_id: String,
}

impl From<&AuthUser> for Identity {
    fn from(user: &AuthUser) -> Self {
        Self {
            user_id: user.user_id.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            session_id: user.session_id.clone(),
        }
    }
}

impl Identity {
    /// Read the `x-user-*` headers. Values are UTF-8, not just visible ASCII.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let get = |name: &HeaderName| {
            headers
                .get(name)
                .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
                .map(str::to_string)
        };

        Some(Self {
            user_id: get(&USER_ID_HEADER)?,
            email: get(&USER_EMAIL_HEADER)?,
            role: get(&USER_ROLE_HEADER)?,
            session_id: get(&SESSION_ID_HEADER)?,
        })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(Identity::from(user));
        }

        // Missing headers mean the route is not behind the gate's identity forwarding
        Identity::from_headers(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// GET /api/profile - whoami
pub async fn profile(identity: Identity) -> ApiResponse<Identity> {
    ApiResponse::success(identity)
}

#[derive(Debug, Serialize)]
pub struct DeviceList {
    pub owner: Identity,
    pub devices: Vec<String>,
}

/// GET /api/devices
pub async fn devices(identity: Identity) -> ApiResult<DeviceList> {
    tracing::debug!("Listing devices for {} ({})", identity.user_id, identity.role);

    Ok(ApiResponse::success(DeviceList {
        owner: identity,
        devices: Vec::new(),
    }))
}
