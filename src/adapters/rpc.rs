// Minimal Solana JSON-RPC transport shared by the chain readers
use crate::error::ProviderError;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use url::Url;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Thin JSON-RPC client for the configured Solana endpoint.
///
/// Owned by each reader that needs it; no process-wide singleton.
#[derive(Debug, Clone)]
pub struct SolanaRpcClient {
    client: Client,
    endpoint: Url,
}

impl SolanaRpcClient {
    pub fn new(rpc_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let endpoint = rpc_url
            .parse::<Url>()
            .map_err(|e| ProviderError::malformed("chain_rpc", format!("invalid RPC URL: {}", e)))?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("token-risk-engine/0.1")
            .build()
            .map_err(|e| ProviderError::unavailable("chain_rpc", e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    /// Issue one JSON-RPC call and deserialize the `result` member.
    pub async fn call<T: DeserializeOwned>(
        &self,
        provider: &'static str,
        method: &str,
        params: Value,
    ) -> Result<T, ProviderError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(provider, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::from_status(
                provider,
                status,
                format!("{} returned HTTP {}", method, status),
            ));
        }

        let body: RpcResponse<T> = response
            .json()
            .await
            .map_err(|e| ProviderError::malformed(provider, e.to_string()))?;

        if let Some(err) = body.error {
            return Err(ProviderError::unavailable(
                provider,
                format!("RPC error {}: {}", err.code, err.message),
            ));
        }

        body.result
            .ok_or_else(|| ProviderError::malformed(provider, format!("{}: empty result", method)))
    }
}
