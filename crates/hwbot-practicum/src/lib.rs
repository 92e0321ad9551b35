//! Review API adapter (reqwest).
//!
//! Implements the `hwbot-core` StatusApi over the homework status endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use hwbot_core::{api::StatusApi, config::Config, errors::Error, Result};

const BODY_SNIPPET_LEN: usize = 200;

#[derive(Clone, Debug)]
pub struct PracticumClient {
    endpoint: String,
    token: String,
    http: reqwest::Client,
}

impl PracticumClient {
    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("http client build failed: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            token: token.into(),
            http,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(
            cfg.endpoint.clone(),
            cfg.practicum_token.clone(),
            cfg.request_timeout,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StatusApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> Result<serde_json::Value> {
        let resp = self
            .http
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(|e| Error::Transport(format!("homework api request error: {e}")))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Protocol {
                status: status.as_u16(),
                body: body.chars().take(BODY_SNIPPET_LEN).collect(),
            });
        }
        info!(from_date, "server responded");

        resp.json::<serde_json::Value>().await.map_err(|e| {
            if e.is_decode() {
                Error::Decode(e.to_string())
            } else {
                Error::Transport(format!("homework api read error: {e}"))
            }
        })
    }
}
