//! HTTP client for communicating with floodd.

use anyhow::{anyhow, Context, Result};
use flood_common::{ErrorResponse, MessageResponse, DEFAULT_PORT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:3000";

/// Client for the floodd HTTP API
pub struct FloodClient {
    base_url: String,
    http: reqwest::Client,
}

impl FloodClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Send a request and decode the success body.
    ///
    /// Non-2xx replies become errors carrying the daemon's message.
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            anyhow!(
                "Cannot reach flood daemon at {}: {}\n\n\
                 Is floodd running? It listens on port {} by default.",
                self.base_url,
                e,
                DEFAULT_PORT
            )
        })?;

        let status = response.status();
        let text = response.text().await?;
        if status.is_success() {
            return serde_json::from_str(&text)
                .with_context(|| format!("Unexpected response from {}", path));
        }

        Err(anyhow!("{} ({})", failure_message(&text), status.as_u16()))
    }
}

/// Pull the human-readable message out of an error body
fn failure_message(text: &str) -> String {
    if let Ok(body) = serde_json::from_str::<MessageResponse>(text) {
        return body.message;
    }
    if let Ok(body) = serde_json::from_str::<ErrorResponse>(text) {
        return body.error;
    }
    text.trim().to_string()
}
