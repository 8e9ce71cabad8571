use reqwest::{header, redirect::Policy};

use crate::auth::DEFAULT_COOKIE_NAME;
use crate::cli::utils::output_fields;
use crate::cli::OutputFormat;

const IDENTITY_HEADERS: [&str; 4] = ["x-user-id", "x-user-email", "x-user-role", "x-session-id"];

pub async fn handle(url: &str, token: Option<&str>, cookie: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    // Redirects are part of the gate's answer, so never follow them
    let client = reqwest::Client::builder().redirect(Policy::none()).build()?;

    let mut request = client.get(url);
    if let Some(token) = token {
        request = if cookie {
            let name = std::env::var("AUTH_COOKIE_NAME").unwrap_or_else(|_| DEFAULT_COOKIE_NAME.to_string());
            request.header(header::COOKIE, format!("{}={}", name, token))
        } else {
            request.bearer_auth(token)
        };
    }

    let response = request.send().await?;

    let mut fields = vec![("status", response.status().to_string())];

    if let Some(location) = response.headers().get(header::LOCATION) {
        fields.push(("location", location.to_str().unwrap_or("<binary>").to_string()));
    }

    for name in IDENTITY_HEADERS {
        if let Some(value) = response.headers().get(name) {
            fields.push((name, value.to_str().unwrap_or("<binary>").to_string()));
        }
    }

    if response.status().is_client_error() {
        let body = response.text().await.unwrap_or_default();
        fields.push(("body", body));
    }

    output_fields(&output_format, &fields)
}
