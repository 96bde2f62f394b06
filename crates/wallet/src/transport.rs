//! JSON-RPC 2.0 over HTTP.

use crate::{EthereumRequest, ProviderError, RpcError, Transport};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};

/// A single JSON-RPC response; `result` is `null` for "not found" style answers.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

/// Sends EIP-1193 requests as JSON-RPC 2.0 calls to an HTTP endpoint, e.g. a wallet bridge or a
/// development node with unlocked accounts.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    url: Url,
    next_id: AtomicU64,
}

impl HttpTransport {
    pub fn new(url: Url) -> Self {
        Self::with_client(Client::new(), url)
    }

    pub fn with_client(client: Client, url: Url) -> Self {
        Self { client, url, next_id: AtomicU64::new(1) }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn envelope(&self, request: &EthereumRequest) -> Result<Value, ProviderError> {
        let mut body = serde_json::to_value(request)?;
        body["jsonrpc"] = json!("2.0");
        body["id"] = json!(self.next_id.fetch_add(1, Ordering::Relaxed));
        if body.get("params").is_none() {
            body["params"] = json!([]);
        }
        Ok(body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, request: &EthereumRequest) -> Result<Value, ProviderError> {
        let body = self.envelope(request)?;
        let response: RpcResponse = self
            .client
            .post(self.url.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match response {
            RpcResponse { error: Some(err), .. } => Err(err.into()),
            RpcResponse { result, .. } => Ok(result.unwrap_or(Value::Null)),
        }
    }
}
