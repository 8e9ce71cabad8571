mod common;

use anyhow::Result;
use reqwest::StatusCode;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = common::client()
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn root_is_public() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = common::client().get(format!("{}/", server.base_url)).send().await?;

    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().get("x-user-id").is_none());
    Ok(())
}
