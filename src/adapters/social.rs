// Social metrics reader backed by the LunarCrush public API
use crate::adapters::traits::{SocialMetricsReader, SocialPost, SocialSummary};
use crate::config::Settings;
use crate::error::{ConfigurationError, ProviderError};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const PROVIDER: &str = "lunarcrush";

#[derive(Debug, Deserialize)]
struct CoinResponse {
    data: CoinData,
}

#[derive(Debug, Deserialize)]
struct CoinData {
    /// Sentiment on the API's 0-100 scale.
    sentiment: Option<f64>,
    galaxy_score: Option<f64>,
    #[serde(rename = "social_volume_24h")]
    social_volume: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    data: Vec<PostPayload>,
}

#[derive(Debug, Deserialize)]
struct PostPayload {
    #[serde(rename = "post_title")]
    title: Option<String>,
    #[serde(rename = "post_created")]
    created: Option<i64>,
}

/// Reads aggregate social metrics and sampled posts. Requires an API key;
/// construction fails with `MissingCredentials` when none is configured so
/// the aggregator can degrade to a note instead of an error.
pub struct LunarCrushReader {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl LunarCrushReader {
    pub fn new(settings: &Settings) -> Result<Self, ConfigurationError> {
        let api_key = settings
            .providers
            .lunarcrush_api_key
            .clone()
            .ok_or_else(|| ConfigurationError::MissingCredentials {
                source_name: "lunarcrush".to_string(),
            })?;
        let base_url = settings
            .providers
            .lunarcrush_base_url
            .parse::<Url>()
            .map_err(|_| ConfigurationError::MissingCredentials {
                source_name: "lunarcrush".to_string(),
            })?;
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.engine.provider_timeout_seconds))
            .user_agent("token-risk-engine/0.1")
            .build()
            .map_err(|_| ConfigurationError::MissingCredentials {
                source_name: "lunarcrush".to_string(),
            })?;
        Ok(Self {
            client,
            base_url,
            api_key,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ProviderError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::from_status(
                PROVIDER,
                status,
                format!("{} returned HTTP {}", path, status),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))
    }
}

#[async_trait]
impl SocialMetricsReader for LunarCrushReader {
    async fn get_social_summary(&self, symbol: &str) -> Result<SocialSummary, ProviderError> {
        let path = format!("public/coins/{}/v1", symbol.to_lowercase());
        let body: CoinResponse = self.get_json(&path).await?;

        let sentiment = body.data.sentiment.ok_or_else(|| {
            ProviderError::malformed(PROVIDER, "coin payload missing sentiment".to_string())
        })?;

        debug!(
            symbol = %symbol,
            sentiment = sentiment,
            social_volume = ?body.data.social_volume,
            "Fetched social summary"
        );

        Ok(SocialSummary {
            social_volume: body.data.social_volume.unwrap_or(0),
            // The API reports sentiment on 0-100; the contract is [0,1].
            relative_sentiment: sentiment / 100.0,
            galaxy_score: body.data.galaxy_score,
        })
    }

    async fn get_recent_posts(&self, query: &str) -> Result<Vec<SocialPost>, ProviderError> {
        let path = format!("public/topic/{}/posts/v1", query.to_lowercase());
        let body: PostsResponse = self.get_json(&path).await?;

        let posts: Vec<SocialPost> = body
            .data
            .into_iter()
            .filter_map(|post| {
                let text = post.title?;
                let timestamp = DateTime::from_timestamp(post.created.unwrap_or(0), 0)?;
                Some(SocialPost { text, timestamp })
            })
            .collect();

        debug!(query = %query, sampled = posts.len(), "Fetched social posts");
        Ok(posts)
    }
}
