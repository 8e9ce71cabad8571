use axum::{http::Uri, Extension};
use serde::Serialize;

use super::api::Identity;
use crate::middleware::{ApiResponse, AuthUser};

#[derive(Debug, Serialize)]
pub struct SectionPage {
    pub section: String,
    pub path: String,
    pub viewer: Option<Identity>,
}

/// Dashboard sections (/admin, /company, /devices, ...). The gate has already
/// checked the caller's role when this runs.
pub async fn section(uri: Uri, user: Option<Extension<AuthUser>>) -> ApiResponse<SectionPage> {
    let path = uri.path().to_string();
    let section = path
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string();

    let viewer = user.map(|Extension(user)| Identity::from(&user));

    ApiResponse::success(SectionPage { section, path, viewer })
}
