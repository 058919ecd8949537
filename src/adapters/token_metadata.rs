// Token metadata reader backed by a Solscan-style token directory API
use crate::adapters::traits::{TokenMeta, TokenMetadataReader};
use crate::config::Settings;
use crate::error::ProviderError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const PROVIDER: &str = "token_api";

#[derive(Debug, Deserialize)]
struct TokenMetaPayload {
    name: Option<String>,
    symbol: Option<String>,
    description: Option<String>,
    decimals: Option<u8>,
    supply: Option<String>,
    #[serde(rename = "holder")]
    holder_count: Option<u64>,
    creator: Option<CreatorPayload>,
}

#[derive(Debug, Deserialize)]
struct CreatorPayload {
    address: Option<String>,
    #[serde(rename = "sharePercent")]
    share_percent: Option<f64>,
}

/// Reads token directory metadata (name, supply, holder count, creator).
pub struct HttpTokenMetadataReader {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpTokenMetadataReader {
    pub fn new(settings: &Settings) -> Result<Self, ProviderError> {
        let base_url = settings
            .providers
            .token_api_base_url
            .parse::<Url>()
            .map_err(|e| ProviderError::malformed(PROVIDER, format!("invalid base URL: {}", e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.engine.provider_timeout_seconds))
            .user_agent("token-risk-engine/0.1")
            .build()
            .map_err(|e| ProviderError::unavailable(PROVIDER, e.to_string()))?;
        Ok(Self {
            client,
            base_url,
            api_key: settings.providers.token_api_key.clone(),
        })
    }
}

#[async_trait]
impl TokenMetadataReader for HttpTokenMetadataReader {
    async fn get_meta(&self, address: &str) -> Result<TokenMeta, ProviderError> {
        let url = self
            .base_url
            .join("token/meta")
            .map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))?;

        let mut request = self.client.get(url).query(&[("tokenAddress", address)]);
        if let Some(key) = &self.api_key {
            request = request.header("token", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::from_status(
                PROVIDER,
                status,
                format!("token meta lookup returned HTTP {}", status),
            ));
        }

        let payload: TokenMetaPayload = response
            .json()
            .await
            .map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))?;

        debug!(
            address = %address,
            symbol = payload.symbol.as_deref().unwrap_or("?"),
            holder_count = ?payload.holder_count,
            "Fetched token metadata"
        );

        let (creator_address, creator_share_percent) = match payload.creator {
            Some(creator) => (creator.address, creator.share_percent),
            None => (None, None),
        };

        Ok(TokenMeta {
            name: payload.name,
            symbol: payload.symbol,
            description: payload.description,
            creator_address,
            creator_share_percent,
            supply_raw: payload.supply,
            decimals: payload.decimals,
            holder_count: payload.holder_count,
        })
    }
}
