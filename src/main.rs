use std::sync::Arc;
use token_risk_engine::adapters::{
    DexScreenerPairReader, HttpTokenMetadataReader, HttpTransactionHistoryReader, LunarCrushReader,
    RpcChainStateReader, RpcHolderListReader, SocialMetricsReader,
};
use token_risk_engine::config::Settings;
use token_risk_engine::{ProviderSet, RiskAggregator};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let settings = Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone())),
        )
        .init();

    let identifier = std::env::args()
        .nth(1)
        .ok_or("usage: token-risk-engine <mint-address>")?;

    info!("Starting token risk engine");

    let social: Option<Arc<dyn SocialMetricsReader>> = if settings.social_configured() {
        Some(Arc::new(LunarCrushReader::new(&settings)?))
    } else {
        None
    };

    let providers = ProviderSet {
        chain: Arc::new(RpcChainStateReader::new(&settings)?),
        metadata: Arc::new(HttpTokenMetadataReader::new(&settings)?),
        holders: Arc::new(RpcHolderListReader::new(&settings)?),
        dex: Arc::new(DexScreenerPairReader::new(&settings)?),
        transactions: Arc::new(HttpTransactionHistoryReader::new(&settings)?),
        social,
    };

    let aggregator = RiskAggregator::new(providers, settings);
    let report = aggregator.analyze(&identifier).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
