// Heuristic rules - pure functions from signals to (flag, delta) pairs
//
// Rules only ever fire on present signals; a source that failed upstream
// simply withholds its signals and the dependent rules stay silent.
// Absence is not evidence of risk.
use crate::models::SignalSet;
use crate::rules::{RuleThresholds, MAX_RISK_SCORE, MIN_RISK_SCORE};

pub const FLAG_MINT_AUTHORITY: &str = "Mint authority active";
pub const FLAG_FREEZE_AUTHORITY: &str = "Freeze authority active";
pub const FLAG_CREATOR_SHARE: &str = "Creator holds >10% share";
pub const FLAG_TINY_LIQUIDITY: &str = "Tiny LP (<$20k)";
pub const FLAG_NO_LIQUIDITY: &str = "No liquidity pools detected";
pub const FLAG_HIGH_CONCENTRATION: &str = "High concentration (>50% in top 10)";
pub const FLAG_MODERATE_CONCENTRATION: &str = "Moderate concentration (>20% in top 10)";
pub const FLAG_LARGE_DUMPS: &str = "Recent large dumps detected";
pub const FLAG_BEARISH_SENTIMENT: &str = "Bearish sentiment detected";
pub const FLAG_BOT_ACTIVITY: &str = "Potential bot activity detected";

/// One rule firing: the flag it raises and its score contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleHit {
    pub rule: &'static str,
    pub flag: &'static str,
    pub delta: i32,
}

impl RuleHit {
    fn new(rule: &'static str, flag: &'static str, delta: i32) -> Self {
        Self { rule, flag, delta }
    }
}

pub fn mint_authority(signals: &SignalSet, _t: &RuleThresholds) -> Vec<RuleHit> {
    match signals.mint_authority_active() {
        Some(true) => vec![RuleHit::new("MintAuthority", FLAG_MINT_AUTHORITY, 30)],
        _ => vec![],
    }
}

pub fn freeze_authority(signals: &SignalSet, _t: &RuleThresholds) -> Vec<RuleHit> {
    match signals.freeze_authority_active() {
        Some(true) => vec![RuleHit::new("FreezeAuthority", FLAG_FREEZE_AUTHORITY, 20)],
        _ => vec![],
    }
}

pub fn creator_share(signals: &SignalSet, t: &RuleThresholds) -> Vec<RuleHit> {
    match signals.creator_share_percent() {
        Some(share) if *share > t.creator_share_percent => {
            vec![RuleHit::new("CreatorShare", FLAG_CREATOR_SHARE, 15)]
        }
        _ => vec![],
    }
}

pub fn tiny_liquidity(signals: &SignalSet, t: &RuleThresholds) -> Vec<RuleHit> {
    match signals.liquidity_usd() {
        Some(liquidity) if *liquidity < t.tiny_liquidity_usd => {
            vec![RuleHit::new("TinyLiquidity", FLAG_TINY_LIQUIDITY, 25)]
        }
        _ => vec![],
    }
}

pub fn no_liquidity(signals: &SignalSet, _t: &RuleThresholds) -> Vec<RuleHit> {
    match signals.pair_count() {
        Some(0) => vec![RuleHit::new("NoLiquidity", FLAG_NO_LIQUIDITY, 30)],
        _ => vec![],
    }
}

/// High and moderate concentration are mutually exclusive by construction:
/// the higher-severity band wins.
pub fn concentration(signals: &SignalSet, t: &RuleThresholds) -> Vec<RuleHit> {
    let share = match signals.top10_holder_share_percent() {
        Some(share) => share,
        None => return vec![],
    };
    if *share > t.high_concentration_percent {
        return vec![RuleHit::new(
            "HighConcentration",
            FLAG_HIGH_CONCENTRATION,
            25,
        )];
    }
    if *share > t.moderate_concentration_percent {
        return vec![RuleHit::new(
            "ModerateConcentration",
            FLAG_MODERATE_CONCENTRATION,
            10,
        )];
    }
    vec![]
}

pub fn large_dumps(signals: &SignalSet, t: &RuleThresholds) -> Vec<RuleHit> {
    match signals.large_dump_count() {
        Some(count) if count > t.large_dump_count => {
            vec![RuleHit::new("LargeDumps", FLAG_LARGE_DUMPS, 20)]
        }
        _ => vec![],
    }
}

pub fn bearish_sentiment(signals: &SignalSet, t: &RuleThresholds) -> Vec<RuleHit> {
    match signals.relative_sentiment() {
        Some(sentiment) if sentiment < t.bearish_sentiment_below => {
            vec![RuleHit::new("BearishSentiment", FLAG_BEARISH_SENTIMENT, 0)]
        }
        _ => vec![],
    }
}

pub fn bot_activity(signals: &SignalSet, t: &RuleThresholds) -> Vec<RuleHit> {
    match signals.duplicate_post_ratio() {
        Some(ratio) if ratio > t.duplicate_post_ratio_above => {
            vec![RuleHit::new("BotActivity", FLAG_BOT_ACTIVITY, 0)]
        }
        _ => vec![],
    }
}

type RuleFn = fn(&SignalSet, &RuleThresholds) -> Vec<RuleHit>;

/// All rules in declaration order. Flags appear in the Report in exactly
/// this order, independent of provider completion order.
pub const RULES: &[RuleFn] = &[
    mint_authority,
    freeze_authority,
    creator_share,
    tiny_liquidity,
    no_liquidity,
    concentration,
    large_dumps,
    bearish_sentiment,
    bot_activity,
];

/// Run every rule in declaration order over the union of present signals.
pub fn evaluate_all(signals: &SignalSet, thresholds: &RuleThresholds) -> Vec<RuleHit> {
    RULES
        .iter()
        .flat_map(|rule| rule(signals, thresholds))
        .collect()
}

/// Fold rule deltas into a score clamped to [0, 100].
pub fn fold_score(hits: &[RuleHit]) -> u8 {
    let sum: i64 = hits.iter().map(|hit| hit.delta as i64).sum();
    sum.clamp(MIN_RISK_SCORE as i64, MAX_RISK_SCORE as i64) as u8
}
