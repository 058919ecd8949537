// Report model - the engine's sole output
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

/// A report section: either fully populated from its signals or carrying
/// an explicit error marker. Sections are never silently absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Section<T> {
    Ok { data: T },
    Error { message: String },
}

impl<T> Section<T> {
    pub fn ok(data: T) -> Self {
        Section::Ok { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Section::Error {
            message: message.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Section::Ok { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Section::Error { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Section::Ok { data } => Some(data),
            Section::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Section::Error { message } => Some(message.as_str()),
            Section::Ok { .. } => None,
        }
    }
}

/// Mint and freeze authority state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoritySection {
    pub mint_authority_active: bool,
    pub freeze_authority_active: bool,
}

/// Holder distribution facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSection {
    pub top10_holder_share_percent: BigDecimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_share_percent: Option<BigDecimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holder_count: Option<u64>,
}

/// DEX liquidity facts for the main trading pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiquiditySection {
    pub pair_count: usize,
    pub main_pair_liquidity_usd: BigDecimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_pair_volume_24h_usd: Option<BigDecimal>,
}

/// Recent transaction pattern facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSection {
    pub sampled_transactions: usize,
    pub large_dump_count: u32,
}

/// Social sentiment facts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_volume: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relative_sentiment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub galaxy_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duplicate_post_ratio: Option<f64>,
}

/// Coarse banding of the clamped risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    VeryLow,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            s if s >= 80 => RiskLevel::Critical,
            s if s >= 60 => RiskLevel::High,
            s if s >= 40 => RiskLevel::Medium,
            s if s >= 20 => RiskLevel::Low,
            _ => RiskLevel::VeryLow,
        }
    }
}

/// The root aggregate: one normalized risk report per run.
///
/// Built once per aggregation run and never mutated after return. Carries
/// no wall-clock fields so identical provider responses always produce
/// byte-identical serialized reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// The token identifier the run was asked about.
    pub identifier: String,

    /// Summed rule deltas clamped to [0, 100].
    pub risk_score: u8,

    pub risk_level: RiskLevel,

    /// Risk/hype flags in rule-declaration order.
    pub flags: Vec<String>,

    pub authorities: Section<AuthoritySection>,
    pub distribution: Section<DistributionSection>,
    pub liquidity: Section<LiquiditySection>,
    pub transaction_patterns: Section<TransactionSection>,
    pub sentiment: Section<SentimentSection>,

    /// Free-text notes (e.g. optional sources that were not configured).
    pub notes: Vec<String>,
}
