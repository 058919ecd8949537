// Canonical rule threshold table
//
// Every rule reads its cutoff from this one table; no analysis module
// carries its own copy of a constant.
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleThresholds {
    /// Creator share above this fires CreatorShare (percent).
    pub creator_share_percent: BigDecimal,

    /// Main-pair liquidity below this fires TinyLiquidity (USD).
    pub tiny_liquidity_usd: BigDecimal,

    /// Top-10 holder share above this fires HighConcentration (percent).
    pub high_concentration_percent: BigDecimal,

    /// Top-10 holder share above this (and at or below the high cutoff)
    /// fires ModerateConcentration (percent).
    pub moderate_concentration_percent: BigDecimal,

    /// A single outbound transfer above this many whole tokens counts as
    /// a large dump.
    pub large_dump_amount: BigDecimal,

    /// More than this many large dumps in the sampled window fires
    /// LargeDumps.
    pub large_dump_count: u32,

    /// Relative sentiment below this (on a [0,1] scale) fires
    /// BearishSentiment.
    pub bearish_sentiment_below: f64,

    /// Duplicate-text ratio in sampled posts above this fires BotActivity.
    pub duplicate_post_ratio_above: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        RuleThresholds {
            creator_share_percent: BigDecimal::from(10),
            tiny_liquidity_usd: BigDecimal::from(20_000),
            high_concentration_percent: BigDecimal::from(50),
            moderate_concentration_percent: BigDecimal::from(20),
            large_dump_amount: BigDecimal::from(1_000_000),
            large_dump_count: 2,
            bearish_sentiment_below: 0.4,
            duplicate_post_ratio_above: 0.5,
        }
    }
}
