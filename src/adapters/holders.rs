// Holder list reader backed by Solana JSON-RPC getTokenLargestAccounts
use crate::adapters::rpc::SolanaRpcClient;
use crate::adapters::traits::{HolderBalance, HolderListReader};
use crate::config::Settings;
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const PROVIDER: &str = "holder_rpc";

#[derive(Debug, Deserialize)]
struct LargestAccountsResult {
    value: Vec<LargestAccount>,
}

#[derive(Debug, Deserialize)]
struct LargestAccount {
    address: String,
    /// Raw base-unit amount as a decimal string.
    amount: String,
}

/// Reads the largest token accounts (descending by balance) over JSON-RPC.
pub struct RpcHolderListReader {
    rpc: SolanaRpcClient,
}

impl RpcHolderListReader {
    pub fn new(settings: &Settings) -> Result<Self, ProviderError> {
        let timeout = Duration::from_secs(settings.engine.provider_timeout_seconds);
        Ok(Self {
            rpc: SolanaRpcClient::new(&settings.chain.rpc_url, timeout)?,
        })
    }
}

#[async_trait]
impl HolderListReader for RpcHolderListReader {
    async fn get_top_holders(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<HolderBalance>, ProviderError> {
        let params = json!([address]);
        let result: LargestAccountsResult = self
            .rpc
            .call(PROVIDER, "getTokenLargestAccounts", params)
            .await?;

        debug!(
            address = %address,
            returned = result.value.len(),
            limit = limit,
            "Fetched largest token accounts"
        );

        Ok(result
            .value
            .into_iter()
            .take(limit)
            .map(|account| HolderBalance {
                owner: account.address,
                amount_raw: account.amount,
            })
            .collect())
    }
}
