// Provider adapter contracts
//
// One trait per external collaborator shape. Adapters are stateless, make
// exactly one outbound call per invocation, and map every expected failure
// onto ProviderError. Retry policy, if any, belongs to the caller.
use crate::error::ProviderError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// On-chain mint account state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintInfo {
    pub decimals: u8,
    /// Raw base-unit supply as reported by the chain.
    pub supply_raw: String,
    pub mint_authority: Option<String>,
    pub freeze_authority: Option<String>,
}

/// Token directory metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMeta {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub description: Option<String>,
    pub creator_address: Option<String>,
    pub creator_share_percent: Option<f64>,
    pub supply_raw: Option<String>,
    pub decimals: Option<u8>,
    pub holder_count: Option<u64>,
}

/// One holder account balance, raw base units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderBalance {
    pub owner: String,
    pub amount_raw: String,
}

/// One DEX trading pair for the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DexPair {
    pub dex_id: String,
    pub pair_address: String,
    pub liquidity_usd: f64,
    pub volume_24h_usd: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Transfer,
    Burn,
    Mint,
    Other,
}

/// One recent token transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenTransaction {
    pub kind: TransactionKind,
    pub amount_raw: String,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate social metrics for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialSummary {
    pub social_volume: u64,
    /// Relative sentiment on a [0,1] scale.
    pub relative_sentiment: f64,
    pub galaxy_score: Option<f64>,
}

/// One sampled social post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialPost {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Chain-state reader: mint account authorities, supply and decimals.
#[async_trait]
pub trait ChainStateReader: Send + Sync {
    async fn get_mint_info(&self, address: &str) -> Result<MintInfo, ProviderError>;
}

/// Token metadata reader: off-chain token directory facts.
#[async_trait]
pub trait TokenMetadataReader: Send + Sync {
    async fn get_meta(&self, address: &str) -> Result<TokenMeta, ProviderError>;
}

/// Holder list reader: largest accounts, descending by balance.
#[async_trait]
pub trait HolderListReader: Send + Sync {
    async fn get_top_holders(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<HolderBalance>, ProviderError>;
}

/// DEX pair reader: trading pairs with USD-denominated depth.
#[async_trait]
pub trait DexPairReader: Send + Sync {
    async fn get_pairs(&self, address: &str) -> Result<Vec<DexPair>, ProviderError>;
}

/// Transaction history reader: recent token transactions.
#[async_trait]
pub trait TransactionHistoryReader: Send + Sync {
    async fn get_recent_transactions(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<TokenTransaction>, ProviderError>;
}

/// Social metrics reader: aggregate sentiment plus sampled posts.
#[async_trait]
pub trait SocialMetricsReader: Send + Sync {
    async fn get_social_summary(&self, symbol: &str) -> Result<SocialSummary, ProviderError>;

    async fn get_recent_posts(&self, query: &str) -> Result<Vec<SocialPost>, ProviderError>;
}
