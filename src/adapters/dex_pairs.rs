// DEX pair reader backed by the DexScreener token-pairs API
use crate::adapters::traits::{DexPair, DexPairReader};
use crate::config::Settings;
use crate::error::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const PROVIDER: &str = "dexscreener";

#[derive(Debug, Deserialize)]
struct TokenPairsResponse {
    /// DexScreener returns `null` instead of an empty array for unknown
    /// tokens.
    pairs: Option<Vec<PairPayload>>,
}

#[derive(Debug, Deserialize)]
struct PairPayload {
    #[serde(rename = "dexId")]
    dex_id: String,
    #[serde(rename = "pairAddress")]
    pair_address: String,
    liquidity: Option<PairLiquidity>,
    volume: Option<PairVolume>,
}

#[derive(Debug, Deserialize)]
struct PairLiquidity {
    usd: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct PairVolume {
    h24: Option<f64>,
}

/// Reads trading pairs and their USD-denominated depth from DexScreener.
pub struct DexScreenerPairReader {
    client: Client,
    base_url: Url,
}

impl DexScreenerPairReader {
    pub fn new(settings: &Settings) -> Result<Self, ProviderError> {
        let base_url = settings
            .providers
            .dexscreener_base_url
            .parse::<Url>()
            .map_err(|e| ProviderError::malformed(PROVIDER, format!("invalid base URL: {}", e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.engine.provider_timeout_seconds))
            .user_agent("token-risk-engine/0.1")
            .build()
            .map_err(|e| ProviderError::unavailable(PROVIDER, e.to_string()))?;
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl DexPairReader for DexScreenerPairReader {
    async fn get_pairs(&self, address: &str) -> Result<Vec<DexPair>, ProviderError> {
        let url = self
            .base_url
            .join(&format!("latest/dex/tokens/{}", address))
            .map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::from_status(
                PROVIDER,
                status,
                format!("token-pairs lookup returned HTTP {}", status),
            ));
        }

        let body: TokenPairsResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))?;

        let pairs: Vec<DexPair> = body
            .pairs
            .unwrap_or_default()
            .into_iter()
            .map(|pair| DexPair {
                dex_id: pair.dex_id,
                pair_address: pair.pair_address,
                liquidity_usd: pair.liquidity.and_then(|l| l.usd).unwrap_or(0.0),
                volume_24h_usd: pair.volume.and_then(|v| v.h24),
            })
            .collect();

        debug!(address = %address, pair_count = pairs.len(), "Fetched DEX pairs");
        Ok(pairs)
    }
}
