use crate::rules::RuleThresholds;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub chain: ChainSettings,
    pub providers: ProviderSettings,
    pub engine: EngineSettings,
    pub thresholds: RuleThresholds,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSettings {
    /// Solana JSON-RPC endpoint used by the chain-state and holder readers.
    pub rpc_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Base URL of the token metadata / transaction history API.
    pub token_api_base_url: String,
    pub token_api_key: Option<String>,
    /// Base URL of the DEX pair aggregator.
    pub dexscreener_base_url: String,
    /// Base URL of the social metrics API.
    pub lunarcrush_base_url: String,
    /// Credential gating the optional social source.
    pub lunarcrush_api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Per-provider-call deadline. Expired calls count as Failed for
    /// scoring and become section error markers.
    pub provider_timeout_seconds: u64,
    /// Holder-list page size requested from the holder reader.
    pub holder_limit: usize,
    /// Transaction-history sample size.
    pub transaction_limit: usize,
    /// Transactions older than this window are ignored for dump detection.
    pub transaction_window_hours: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            chain: ChainSettings::default(),
            providers: ProviderSettings::default(),
            engine: EngineSettings::default(),
            thresholds: RuleThresholds::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ChainSettings {
    fn default() -> Self {
        ChainSettings {
            rpc_url: "https://api.mainnet-beta.solana.com".to_string(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        ProviderSettings {
            token_api_base_url: "https://public-api.solscan.io".to_string(),
            token_api_key: None,
            dexscreener_base_url: "https://api.dexscreener.com".to_string(),
            lunarcrush_base_url: "https://lunarcrush.com/api4".to_string(),
            lunarcrush_api_key: None,
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            provider_timeout_seconds: 10,
            holder_limit: 20,
            transaction_limit: 50,
            transaction_window_hours: 24,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, config::ConfigError> {
        let _settings = config::Config::builder()
            .add_source(config::Environment::default())
            .build()?;

        let defaults = EngineSettings::default();
        let default_thresholds = RuleThresholds::default();

        Ok(Settings {
            chain: ChainSettings {
                rpc_url: env::var("SOLANA_RPC_URL")
                    .unwrap_or_else(|_| ChainSettings::default().rpc_url),
            },
            providers: ProviderSettings {
                token_api_base_url: env::var("TOKEN_API_BASE_URL")
                    .unwrap_or_else(|_| ProviderSettings::default().token_api_base_url),
                token_api_key: env::var("TOKEN_API_KEY").ok(),
                dexscreener_base_url: env::var("DEXSCREENER_BASE_URL")
                    .unwrap_or_else(|_| ProviderSettings::default().dexscreener_base_url),
                lunarcrush_base_url: env::var("LUNARCRUSH_BASE_URL")
                    .unwrap_or_else(|_| ProviderSettings::default().lunarcrush_base_url),
                lunarcrush_api_key: env::var("LUNARCRUSH_API_KEY").ok(),
            },
            engine: EngineSettings {
                provider_timeout_seconds: parse_env("PROVIDER_TIMEOUT_SECONDS", defaults.provider_timeout_seconds),
                holder_limit: parse_env("HOLDER_LIMIT", defaults.holder_limit),
                transaction_limit: parse_env("TRANSACTION_LIMIT", defaults.transaction_limit),
                transaction_window_hours: parse_env("TRANSACTION_WINDOW_HOURS", defaults.transaction_window_hours),
            },
            thresholds: RuleThresholds {
                large_dump_amount: parse_decimal_env("LARGE_DUMP_AMOUNT", default_thresholds.large_dump_amount),
                duplicate_post_ratio_above: parse_env(
                    "DUPLICATE_POST_RATIO",
                    default_thresholds.duplicate_post_ratio_above,
                ),
                ..default_thresholds
            },
            logging: LoggingSettings {
                level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
        })
    }

    /// True when the optional social source has credentials configured.
    pub fn social_configured(&self) -> bool {
        self.providers.lunarcrush_api_key.is_some()
    }
}

fn parse_env<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

fn parse_decimal_env(name: &str, default: BigDecimal) -> BigDecimal {
    env::var(name)
        .ok()
        .and_then(|raw| BigDecimal::from_str(&raw).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let settings = Settings::default();
        assert!(settings.chain.rpc_url.starts_with("https://"));
        assert_eq!(settings.engine.provider_timeout_seconds, 10);
        assert_eq!(settings.engine.holder_limit, 20);
        assert!(!settings.social_configured());
    }

    #[test]
    fn social_gated_on_api_key() {
        let mut settings = Settings::default();
        settings.providers.lunarcrush_api_key = Some("key".to_string());
        assert!(settings.social_configured());
    }
}
