// Payload normalizers - raw provider payloads to unit-consistent signals
//
// All raw base-unit amounts pass through one arbitrary-precision division
// path (`raw_to_ui`). Native floats never touch supply arithmetic, and a
// payload missing `decimals` or `supply` fails closed instead of assuming
// a default.
use crate::adapters::{
    DexPair, HolderBalance, MintInfo, SocialPost, SocialSummary, TokenMeta, TokenTransaction,
    TransactionKind,
};
use crate::error::NormalizationError;
use crate::models::Signal;
use bigdecimal::num_bigint::BigInt;
use bigdecimal::BigDecimal;
use num_traits::{FromPrimitive, Zero};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;
use std::str::FromStr;

/// Supply denomination shared by every normalizer that divides raw amounts.
///
/// Resolved once per run from whichever of the chain reader or the metadata
/// reader succeeded (chain wins when both did).
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyContext {
    pub decimals: u8,
    pub supply_raw: String,
}

impl SupplyContext {
    /// Build from the sources that can denominate supply, failing closed
    /// when neither provides both `decimals` and `supply`.
    pub fn resolve(
        mint: Option<&MintInfo>,
        meta: Option<&TokenMeta>,
    ) -> Result<Self, NormalizationError> {
        if let Some(mint) = mint {
            return Ok(SupplyContext {
                decimals: mint.decimals,
                supply_raw: mint.supply_raw.clone(),
            });
        }
        if let Some(meta) = meta {
            if let (Some(decimals), Some(supply_raw)) = (meta.decimals, meta.supply_raw.clone()) {
                return Ok(SupplyContext {
                    decimals,
                    supply_raw,
                });
            }
        }
        Err(NormalizationError::missing_field("decimals/supply"))
    }

    pub fn supply_ui(&self) -> Result<BigDecimal, NormalizationError> {
        raw_to_ui(&self.supply_raw, self.decimals)
    }
}

/// Divide a raw base-unit amount by `10^decimals` exactly.
pub fn raw_to_ui(amount_raw: &str, decimals: u8) -> Result<BigDecimal, NormalizationError> {
    let digits = BigInt::from_str(amount_raw)
        .map_err(|_| NormalizationError::out_of_range("raw amount", amount_raw))?;
    Ok(BigDecimal::new(digits, decimals as i64))
}

/// Mint account state to authority signals.
pub fn normalize_mint_info(info: &MintInfo) -> Result<Vec<Signal>, NormalizationError> {
    Ok(vec![
        Signal::MintAuthorityActive(info.mint_authority.is_some()),
        Signal::FreezeAuthorityActive(info.freeze_authority.is_some()),
    ])
}

/// Token directory metadata to creator-share and holder-count signals.
pub fn normalize_meta(meta: &TokenMeta) -> Result<Vec<Signal>, NormalizationError> {
    let mut signals = Vec::new();

    if let Some(share) = meta.creator_share_percent {
        let share = BigDecimal::from_f64(share)
            .ok_or_else(|| NormalizationError::out_of_range("creator share", share))?;
        if share < BigDecimal::zero() || share > BigDecimal::from(100) {
            return Err(NormalizationError::out_of_range("creator share", share));
        }
        signals.push(Signal::CreatorSharePercent(share.normalized()));
    }

    if let Some(count) = meta.holder_count {
        signals.push(Signal::HolderCount(count));
    }

    Ok(signals)
}

/// Holder balances to the top-10 concentration signal.
pub fn normalize_holders(
    holders: &[HolderBalance],
    supply: &SupplyContext,
) -> Result<Vec<Signal>, NormalizationError> {
    if holders.is_empty() {
        return Ok(vec![]);
    }

    let supply_ui = supply.supply_ui()?;
    if supply_ui.is_zero() {
        return Err(NormalizationError::divide_by_zero("top-10 holder share"));
    }

    let mut top10_ui = BigDecimal::zero();
    for holder in holders.iter().take(10) {
        top10_ui += raw_to_ui(&holder.amount_raw, supply.decimals)?;
    }

    let share = (top10_ui * BigDecimal::from(100)) / supply_ui;
    if share > BigDecimal::from(100) {
        return Err(NormalizationError::out_of_range("top-10 holder share", share));
    }

    Ok(vec![Signal::Top10HolderSharePercent(share.normalized())])
}

/// DEX pairs to liquidity signals. The pair with the deepest liquidity is
/// treated as the main pair. An empty pair list still yields a PairCount
/// signal so the no-liquidity rule can fire on present evidence.
pub fn normalize_pairs(pairs: &[DexPair]) -> Result<Vec<Signal>, NormalizationError> {
    let mut signals = vec![Signal::PairCount(pairs.len())];

    let main_pair = pairs
        .iter()
        .max_by(|a, b| a.liquidity_usd.total_cmp(&b.liquidity_usd));

    if let Some(pair) = main_pair {
        let liquidity = BigDecimal::from_f64(pair.liquidity_usd)
            .ok_or_else(|| NormalizationError::out_of_range("liquidity USD", pair.liquidity_usd))?;
        signals.push(Signal::LiquidityUsd(liquidity.normalized()));

        if let Some(volume) = pair.volume_24h_usd {
            let volume = BigDecimal::from_f64(volume)
                .ok_or_else(|| NormalizationError::out_of_range("24h volume USD", volume))?;
            signals.push(Signal::Volume24hUsd(volume.normalized()));
        }
    }

    Ok(signals)
}

/// Recent transactions to dump-pattern signals. Only outbound transfers
/// inside the window count; burns and mints are not dumps.
pub fn normalize_transactions(
    transactions: &[TokenTransaction],
    supply: &SupplyContext,
    large_dump_amount: &BigDecimal,
    window: Duration,
    now: DateTime<Utc>,
) -> Result<Vec<Signal>, NormalizationError> {
    let window_start = now - window;
    let mut dump_count: u32 = 0;

    for tx in transactions {
        if tx.kind != TransactionKind::Transfer || tx.timestamp < window_start {
            continue;
        }
        let amount_ui = raw_to_ui(&tx.amount_raw, supply.decimals)?;
        if amount_ui > *large_dump_amount {
            dump_count += 1;
        }
    }

    Ok(vec![
        Signal::SampledTransactionCount(transactions.len()),
        Signal::LargeDumpCount(dump_count),
    ])
}

/// Social summary to sentiment signals.
pub fn normalize_social_summary(summary: &SocialSummary) -> Result<Vec<Signal>, NormalizationError> {
    if !(0.0..=1.0).contains(&summary.relative_sentiment) {
        return Err(NormalizationError::out_of_range(
            "relative sentiment",
            summary.relative_sentiment,
        ));
    }

    let mut signals = vec![
        Signal::RelativeSentiment(summary.relative_sentiment),
        Signal::SocialVolume(summary.social_volume),
    ];
    if let Some(score) = summary.galaxy_score {
        signals.push(Signal::GalaxyScore(score));
    }
    Ok(signals)
}

/// Sampled posts to the duplicate-text ratio signal. No posts means no
/// signal, not a zero ratio.
pub fn normalize_posts(posts: &[SocialPost]) -> Result<Vec<Signal>, NormalizationError> {
    if posts.is_empty() {
        return Ok(vec![]);
    }

    let mut unique: HashSet<String> = HashSet::new();
    for post in posts {
        unique.insert(post.text.trim().to_lowercase());
    }

    let ratio = 1.0 - (unique.len() as f64 / posts.len() as f64);
    Ok(vec![Signal::DuplicatePostRatio(ratio)])
}
