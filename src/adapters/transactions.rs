// Transaction history reader backed by the token directory transfer API
use crate::adapters::traits::{TokenTransaction, TransactionHistoryReader, TransactionKind};
use crate::config::Settings;
use crate::error::ProviderError;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

const PROVIDER: &str = "transaction_api";

#[derive(Debug, Deserialize)]
struct TransferListPayload {
    data: Vec<TransferPayload>,
}

#[derive(Debug, Deserialize)]
struct TransferPayload {
    #[serde(rename = "type")]
    kind: String,
    /// Raw base-unit amount as a decimal string.
    amount: String,
    #[serde(rename = "blockTime")]
    block_time: i64,
}

/// Reads recent token transactions from the configured history API.
pub struct HttpTransactionHistoryReader {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl HttpTransactionHistoryReader {
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

fn parse_kind(raw: &str) -> TransactionKind {
    match raw.to_lowercase().as_str() {
        "transfer" => TransactionKind::Transfer,
        "burn" => TransactionKind::Burn,
        "mint" | "mintto" => TransactionKind::Mint,
        _ => TransactionKind::Other,
    }
}

#[async_trait]
impl TransactionHistoryReader for HttpTransactionHistoryReader {
    async fn get_recent_transactions(
        &self,
        address: &str,
        limit: usize,
    ) -> Result<Vec<TokenTransaction>, ProviderError> {
        let url = self
            .base_url
            .join("token/transfer")
            .map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))?;

        let limit_param = limit.to_string();
        let mut request = self
            .client
            .get(url)
            .query(&[("address", address), ("limit", limit_param.as_str())]);
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
                format!("transfer lookup returned HTTP {}", status),
            ));
        }

        let payload: TransferListPayload = response
            .json()
            .await
            .map_err(|e| ProviderError::malformed(PROVIDER, e.to_string()))?;

        let transactions: Vec<TokenTransaction> = payload
            .data
            .into_iter()
            .filter_map(|t| {
                let timestamp = DateTime::from_timestamp(t.block_time, 0)?;
                Some(TokenTransaction {
                    kind: parse_kind(&t.kind),
                    amount_raw: t.amount,
                    timestamp,
                })
            })
            .collect();

        debug!(
            address = %address,
            sampled = transactions.len(),
            "Fetched recent token transactions"
        );
        Ok(transactions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_kinds_parse_case_insensitively() {
        assert_eq!(parse_kind("Transfer"), TransactionKind::Transfer);
        assert_eq!(parse_kind("BURN"), TransactionKind::Burn);
        assert_eq!(parse_kind("mintTo"), TransactionKind::Mint);
        assert_eq!(parse_kind("swap"), TransactionKind::Other);
    }
}
