// Chain-state reader backed by Solana JSON-RPC getAccountInfo
use crate::adapters::rpc::SolanaRpcClient;
use crate::adapters::traits::{ChainStateReader, MintInfo};
use crate::config::Settings;
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const PROVIDER: &str = "chain_rpc";

#[derive(Debug, Deserialize)]
struct AccountInfoResult {
    value: Option<AccountValue>,
}

#[derive(Debug, Deserialize)]
struct AccountValue {
    data: AccountData,
}

#[derive(Debug, Deserialize)]
struct AccountData {
    parsed: ParsedData,
}

#[derive(Debug, Deserialize)]
struct ParsedData {
    #[serde(rename = "type")]
    account_type: String,
    info: ParsedMintInfo,
}

#[derive(Debug, Deserialize)]
struct ParsedMintInfo {
    decimals: u8,
    supply: String,
    #[serde(rename = "mintAuthority")]
    mint_authority: Option<String>,
    #[serde(rename = "freezeAuthority")]
    freeze_authority: Option<String>,
}

/// Reads mint account state (authorities, supply, decimals) over JSON-RPC.
pub struct RpcChainStateReader {
    rpc: SolanaRpcClient,
}

impl RpcChainStateReader {
    pub fn new(settings: &Settings) -> Result<Self, ProviderError> {
        let timeout = Duration::from_secs(settings.engine.provider_timeout_seconds);
        Ok(Self {
            rpc: SolanaRpcClient::new(&settings.chain.rpc_url, timeout)?,
        })
    }
}

#[async_trait]
impl ChainStateReader for RpcChainStateReader {
    async fn get_mint_info(&self, address: &str) -> Result<MintInfo, ProviderError> {
        let params = json!([address, { "encoding": "jsonParsed" }]);
        let result: AccountInfoResult = self.rpc.call(PROVIDER, "getAccountInfo", params).await?;

        let value = result
            .value
            .ok_or_else(|| ProviderError::not_found(PROVIDER, format!("no account for {}", address)))?;

        if value.data.parsed.account_type != "mint" {
            return Err(ProviderError::malformed(
                PROVIDER,
                format!("{} is not a mint account", address),
            ));
        }

        let info = value.data.parsed.info;
        debug!(
            address = %address,
            decimals = info.decimals,
            mint_authority = info.mint_authority.is_some(),
            freeze_authority = info.freeze_authority.is_some(),
            "Fetched mint account state"
        );

        Ok(MintInfo {
            decimals: info.decimals,
            supply_raw: info.supply,
            mint_authority: info.mint_authority,
            freeze_authority: info.freeze_authority,
        })
    }
}
