// Risk Aggregator - fans out to providers, normalizes, scores, reports
use crate::adapters::{
    ChainStateReader, DexPairReader, HolderListReader, SocialMetricsReader, TokenMetadataReader,
    TransactionHistoryReader,
};
use crate::config::Settings;
use crate::error::{EngineError, NormalizationError, ProviderError};
use crate::models::{
    AuthoritySection, DistributionSection, LiquiditySection, Report, RiskLevel, Section,
    SentimentSection, Signal, SignalSet, TransactionSection,
};
use crate::normalize::{
    normalize_holders, normalize_meta, normalize_mint_info, normalize_pairs, normalize_posts,
    normalize_social_summary, normalize_transactions, SupplyContext,
};
use crate::rules::{evaluate_all, fold_score, RuleThresholds};
use chrono::{Duration as ChronoDuration, Utc};
use futures::join;
use regex::Regex;
use std::future::Future;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::{info, warn};

/// Social volume at or above this adds a hype note to the report.
const HIGH_SOCIAL_VOLUME: u64 = 100_000;

/// The collaborator clients one aggregation run fans out to.
///
/// Injected explicitly; the engine holds no process-wide client state.
/// The chain reader is mandatory; the social reader is optional and gated
/// by credentials at construction time.
#[derive(Clone)]
pub struct ProviderSet {
    pub chain: Arc<dyn ChainStateReader>,
    pub metadata: Arc<dyn TokenMetadataReader>,
    pub holders: Arc<dyn HolderListReader>,
    pub dex: Arc<dyn DexPairReader>,
    pub transactions: Arc<dyn TransactionHistoryReader>,
    pub social: Option<Arc<dyn SocialMetricsReader>>,
}

/// Orchestrates one batch aggregation run per token.
///
/// Stateless across runs: every `analyze` call owns its own fan-out,
/// signal set and report.
pub struct RiskAggregator {
    providers: ProviderSet,
    settings: Settings,
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").expect("hardcoded pattern is valid")
    })
}

/// Validate the caller-supplied token identifier (base58 mint address).
/// This is the only run-fatal check; it happens before any provider call.
pub fn validate_identifier(input: &str) -> Result<(), EngineError> {
    if identifier_pattern().is_match(input) {
        Ok(())
    } else {
        Err(EngineError::InvalidIdentifier {
            input: input.to_string(),
        })
    }
}

/// Impose the per-run deadline on one provider call. An expired call is
/// indistinguishable from an unavailable provider for scoring purposes.
async fn with_deadline<T, F>(
    provider: &'static str,
    limit: Duration,
    fut: F,
) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            warn!(
                provider = provider,
                timeout_seconds = limit.as_secs(),
                "Provider call exceeded deadline"
            );
            Err(ProviderError::unavailable(
                provider,
                format!("deadline of {}s expired", limit.as_secs()),
            ))
        }
    }
}

fn normalized_or_message<T>(
    fetched: &Result<T, ProviderError>,
    normalize: impl FnOnce(&T) -> Result<Vec<Signal>, NormalizationError>,
) -> Result<Vec<Signal>, String> {
    match fetched {
        Ok(payload) => normalize(payload).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    }
}

impl RiskAggregator {
    pub fn new(providers: ProviderSet, settings: Settings) -> Self {
        Self {
            providers,
            settings,
        }
    }

    pub fn thresholds(&self) -> &RuleThresholds {
        &self.settings.thresholds
    }

    /// Run one aggregation for `identifier` and return the Report.
    ///
    /// Never fails because a provider failed: each failed source becomes a
    /// section error marker and silently withholds its signals, so the
    /// rules that depend on them do not fire. The only fatal condition is
    /// a malformed identifier.
    pub async fn analyze(&self, identifier: &str) -> Result<Report, EngineError> {
        validate_identifier(identifier)?;

        let deadline = Duration::from_secs(self.settings.engine.provider_timeout_seconds);
        let holder_limit = self.settings.engine.holder_limit;
        let tx_limit = self.settings.engine.transaction_limit;
        let now = Utc::now();

        info!(identifier = %identifier, "Starting aggregation run");

        // Fan out every mandatory source at once and wait for all of them
        // to settle before any scoring happens.
        let (chain_res, meta_res, holders_res, dex_res, tx_res) = join!(
            with_deadline(
                "chain_rpc",
                deadline,
                self.providers.chain.get_mint_info(identifier)
            ),
            with_deadline(
                "token_api",
                deadline,
                self.providers.metadata.get_meta(identifier)
            ),
            with_deadline(
                "holder_rpc",
                deadline,
                self.providers.holders.get_top_holders(identifier, holder_limit)
            ),
            with_deadline(
                "dexscreener",
                deadline,
                self.providers.dex.get_pairs(identifier)
            ),
            with_deadline(
                "transaction_api",
                deadline,
                self.providers
                    .transactions
                    .get_recent_transactions(identifier, tx_limit)
            ),
        );

        let mut signals = SignalSet::new();
        let mut notes: Vec<String> = Vec::new();

        // Authorities section - chain reader only.
        let authorities = match &chain_res {
            Ok(mint) => match normalize_mint_info(mint) {
                Ok(sigs) => {
                    signals.extend(sigs);
                    Section::ok(AuthoritySection {
                        mint_authority_active: mint.mint_authority.is_some(),
                        freeze_authority_active: mint.freeze_authority.is_some(),
                    })
                }
                Err(e) => Section::error(e.to_string()),
            },
            Err(e) => {
                warn!(error = %e, "Chain state unavailable");
                Section::error(e.to_string())
            }
        };

        // Metadata contributes optional distribution signals; a failure
        // here only costs those signals.
        match normalized_or_message(&meta_res, normalize_meta) {
            Ok(sigs) => signals.extend(sigs),
            Err(message) => warn!(error = %message, "Token metadata unavailable"),
        }

        // Supply denomination for every raw-amount division in this run.
        let supply_ctx = SupplyContext::resolve(
            chain_res.as_ref().ok(),
            meta_res.as_ref().ok(),
        );

        // Distribution section - holder list divided against supply.
        let distribution = match &holders_res {
            Err(e) => Section::error(e.to_string()),
            Ok(holders) => match &supply_ctx {
                Err(e) => Section::error(e.to_string()),
                Ok(ctx) => match normalize_holders(holders, ctx) {
                    Err(e) => Section::error(e.to_string()),
                    Ok(sigs) => {
                        let share = sigs.iter().find_map(|s| match s {
                            Signal::Top10HolderSharePercent(v) => Some(v.clone()),
                            _ => None,
                        });
                        signals.extend(sigs);
                        match share {
                            Some(top10) => Section::ok(DistributionSection {
                                top10_holder_share_percent: top10,
                                creator_share_percent: signals.creator_share_percent().cloned(),
                                holder_count: signals.holder_count(),
                            }),
                            None => Section::error("holder list empty"),
                        }
                    }
                },
            },
        };

        // Liquidity section - an empty pair list is an explicit error
        // marker, but the PairCount signal stays present so the
        // no-liquidity rule fires on evidence, not absence.
        let liquidity = match &dex_res {
            Err(e) => Section::error(e.to_string()),
            Ok(pairs) => match normalize_pairs(pairs) {
                Err(e) => Section::error(e.to_string()),
                Ok(sigs) => {
                    signals.extend(sigs);
                    match signals.liquidity_usd().cloned() {
                        Some(main_pair_liquidity_usd) => Section::ok(LiquiditySection {
                            pair_count: pairs.len(),
                            main_pair_liquidity_usd,
                            main_pair_volume_24h_usd: signals.volume_24h_usd().cloned(),
                        }),
                        None => Section::error("no liquidity pools found"),
                    }
                }
            },
        };

        // Transaction patterns section - dump detection needs the same
        // supply denomination as the holder math.
        let transaction_patterns = match (&tx_res, &supply_ctx) {
            (Err(e), _) => Section::error(e.to_string()),
            (Ok(_), Err(e)) => Section::error(e.to_string()),
            (Ok(transactions), Ok(ctx)) => {
                let window = ChronoDuration::hours(self.settings.engine.transaction_window_hours);
                match normalize_transactions(
                    transactions,
                    ctx,
                    &self.settings.thresholds.large_dump_amount,
                    window,
                    now,
                ) {
                    Err(e) => Section::error(e.to_string()),
                    Ok(sigs) => {
                        signals.extend(sigs);
                        Section::ok(TransactionSection {
                            sampled_transactions: transactions.len(),
                            large_dump_count: signals.large_dump_count().unwrap_or(0),
                        })
                    }
                }
            }
        };

        // Sentiment section - optional source, engaged only with
        // credentials, and fetched after metadata so the query can use the
        // resolved symbol.
        let symbol = meta_res
            .as_ref()
            .ok()
            .and_then(|meta| meta.symbol.clone())
            .unwrap_or_else(|| identifier.to_string());

        let sentiment = match &self.providers.social {
            None => {
                notes.push(
                    "Social metrics not configured (missing credentials); sentiment checks skipped"
                        .to_string(),
                );
                Section::error("social source not configured")
            }
            Some(social) => {
                let (summary_res, posts_res) = join!(
                    with_deadline(
                        "social_summary",
                        deadline,
                        social.get_social_summary(&symbol)
                    ),
                    with_deadline("social_posts", deadline, social.get_recent_posts(&symbol)),
                );

                let summary_sigs = normalized_or_message(&summary_res, normalize_social_summary);
                let posts_sigs = normalized_or_message(&posts_res, |p| normalize_posts(p));

                match (summary_sigs, posts_sigs) {
                    (Err(a), Err(b)) => Section::error(format!("{}; {}", a, b)),
                    (summary, posts) => {
                        // One half failed: keep the surviving metrics but
                        // surface the loss instead of swallowing it.
                        match summary {
                            Ok(sigs) => signals.extend(sigs),
                            Err(message) => {
                                warn!(error = %message, "Social summary unavailable");
                                notes.push(format!("Social summary unavailable: {}", message));
                            }
                        }
                        match posts {
                            Ok(sigs) => signals.extend(sigs),
                            Err(message) => {
                                warn!(error = %message, "Social posts unavailable");
                                notes.push(format!("Social posts unavailable: {}", message));
                            }
                        }
                        Section::ok(SentimentSection {
                            social_volume: signals.social_volume(),
                            relative_sentiment: signals.relative_sentiment(),
                            galaxy_score: signals.galaxy_score(),
                            duplicate_post_ratio: signals.duplicate_post_ratio(),
                        })
                    }
                }
            }
        };

        if let Some(volume) = signals.social_volume() {
            if volume >= HIGH_SOCIAL_VOLUME {
                notes.push(format!("High social volume ({} mentions in 24h)", volume));
            }
        }

        // All sources have settled; score in fixed rule-declaration order.
        let hits = evaluate_all(&signals, &self.settings.thresholds);
        let risk_score = fold_score(&hits);
        let flags: Vec<String> = hits.iter().map(|hit| hit.flag.to_string()).collect();

        info!(
            identifier = %identifier,
            risk_score = risk_score,
            flag_count = flags.len(),
            signal_count = signals.len(),
            "Aggregation run complete"
        );

        Ok(Report {
            identifier: identifier.to_string(),
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            flags,
            authorities,
            distribution,
            liquidity,
            transaction_patterns,
            sentiment,
            notes,
        })
    }
}
