use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;

/// What the recommendation service answered with: its JSON body plus the
/// status it used, so application errors keep their status on the way back.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

#[async_trait]
pub trait RecommenderApi: Send + Sync {
    /// Forwards the client's body untouched and returns whatever JSON the
    /// service produced. Errors cover transport failures and non-JSON
    /// replies; a non-2xx status with a JSON body is not an error here.
    async fn search(&self, body: Bytes) -> Result<UpstreamReply>;
}

#[derive(Debug, Clone)]
pub struct RecommenderClient {
    client: Client,
    url: String,
}

impl RecommenderClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl RecommenderApi for RecommenderClient {
    async fn search(&self, body: Bytes) -> Result<UpstreamReply> {
        let res = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .context("request failed")?;
        let status = res.status().as_u16();
        let text = res.text().await.context("reading body failed")?;
        let body: Value = serde_json::from_str(&text).context("JSON parse failed")?;
        Ok(UpstreamReply { status, body })
    }
}
