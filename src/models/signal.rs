// Normalized, provider-independent signals
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity of a normalized fact, independent of which provider produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SignalKind {
    MintAuthorityActive,
    FreezeAuthorityActive,
    CreatorSharePercent,
    Top10HolderSharePercent,
    HolderCount,
    PairCount,
    LiquidityUsd,
    Volume24hUsd,
    LargeDumpCount,
    SampledTransactionCount,
    SocialVolume,
    RelativeSentiment,
    GalaxyScore,
    DuplicatePostRatio,
}

/// A single normalized fact about the token under analysis.
///
/// Signals are immutable value objects. A signal of a given kind is either
/// present in the [`SignalSet`] (successfully derived) or absent entirely;
/// it is never partially populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    MintAuthorityActive(bool),
    FreezeAuthorityActive(bool),
    CreatorSharePercent(BigDecimal),
    Top10HolderSharePercent(BigDecimal),
    HolderCount(u64),
    PairCount(usize),
    LiquidityUsd(BigDecimal),
    Volume24hUsd(BigDecimal),
    LargeDumpCount(u32),
    SampledTransactionCount(usize),
    SocialVolume(u64),
    RelativeSentiment(f64),
    GalaxyScore(f64),
    DuplicatePostRatio(f64),
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::MintAuthorityActive(_) => SignalKind::MintAuthorityActive,
            Signal::FreezeAuthorityActive(_) => SignalKind::FreezeAuthorityActive,
            Signal::CreatorSharePercent(_) => SignalKind::CreatorSharePercent,
            Signal::Top10HolderSharePercent(_) => SignalKind::Top10HolderSharePercent,
            Signal::HolderCount(_) => SignalKind::HolderCount,
            Signal::PairCount(_) => SignalKind::PairCount,
            Signal::LiquidityUsd(_) => SignalKind::LiquidityUsd,
            Signal::Volume24hUsd(_) => SignalKind::Volume24hUsd,
            Signal::LargeDumpCount(_) => SignalKind::LargeDumpCount,
            Signal::SampledTransactionCount(_) => SignalKind::SampledTransactionCount,
            Signal::SocialVolume(_) => SignalKind::SocialVolume,
            Signal::RelativeSentiment(_) => SignalKind::RelativeSentiment,
            Signal::GalaxyScore(_) => SignalKind::GalaxyScore,
            Signal::DuplicatePostRatio(_) => SignalKind::DuplicatePostRatio,
        }
    }
}

/// The union of signals successfully derived during one aggregation run.
///
/// Backed by an ordered map so iteration (and serialization) is
/// deterministic regardless of which provider call settled first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalSet {
    signals: BTreeMap<SignalKind, Signal>,
}

impl SignalSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one signal, replacing any prior signal of the same kind.
    pub fn insert(&mut self, signal: Signal) {
        self.signals.insert(signal.kind(), signal);
    }

    /// Insert every signal from `signals`.
    pub fn extend(&mut self, signals: Vec<Signal>) {
        for signal in signals {
            self.insert(signal);
        }
    }

    pub fn get(&self, kind: SignalKind) -> Option<&Signal> {
        self.signals.get(&kind)
    }

    pub fn contains(&self, kind: SignalKind) -> bool {
        self.signals.contains_key(&kind)
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn mint_authority_active(&self) -> Option<bool> {
        match self.get(SignalKind::MintAuthorityActive) {
            Some(Signal::MintAuthorityActive(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn freeze_authority_active(&self) -> Option<bool> {
        match self.get(SignalKind::FreezeAuthorityActive) {
            Some(Signal::FreezeAuthorityActive(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn creator_share_percent(&self) -> Option<&BigDecimal> {
        match self.get(SignalKind::CreatorSharePercent) {
            Some(Signal::CreatorSharePercent(v)) => Some(v),
            _ => None,
        }
    }

    pub fn top10_holder_share_percent(&self) -> Option<&BigDecimal> {
        match self.get(SignalKind::Top10HolderSharePercent) {
            Some(Signal::Top10HolderSharePercent(v)) => Some(v),
            _ => None,
        }
    }

    pub fn holder_count(&self) -> Option<u64> {
        match self.get(SignalKind::HolderCount) {
            Some(Signal::HolderCount(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn pair_count(&self) -> Option<usize> {
        match self.get(SignalKind::PairCount) {
            Some(Signal::PairCount(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn liquidity_usd(&self) -> Option<&BigDecimal> {
        match self.get(SignalKind::LiquidityUsd) {
            Some(Signal::LiquidityUsd(v)) => Some(v),
            _ => None,
        }
    }

    pub fn volume_24h_usd(&self) -> Option<&BigDecimal> {
        match self.get(SignalKind::Volume24hUsd) {
            Some(Signal::Volume24hUsd(v)) => Some(v),
            _ => None,
        }
    }

    pub fn large_dump_count(&self) -> Option<u32> {
        match self.get(SignalKind::LargeDumpCount) {
            Some(Signal::LargeDumpCount(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn sampled_transaction_count(&self) -> Option<usize> {
        match self.get(SignalKind::SampledTransactionCount) {
            Some(Signal::SampledTransactionCount(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn social_volume(&self) -> Option<u64> {
        match self.get(SignalKind::SocialVolume) {
            Some(Signal::SocialVolume(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn relative_sentiment(&self) -> Option<f64> {
        match self.get(SignalKind::RelativeSentiment) {
            Some(Signal::RelativeSentiment(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn galaxy_score(&self) -> Option<f64> {
        match self.get(SignalKind::GalaxyScore) {
            Some(Signal::GalaxyScore(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn duplicate_post_ratio(&self) -> Option<f64> {
        match self.get(SignalKind::DuplicatePostRatio) {
            Some(Signal::DuplicatePostRatio(v)) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_same_kind() {
        let mut set = SignalSet::new();
        set.insert(Signal::MintAuthorityActive(true));
        set.insert(Signal::MintAuthorityActive(false));
        assert_eq!(set.len(), 1);
        assert_eq!(set.mint_authority_active(), Some(false));
    }

    #[test]
    fn absent_signal_reads_as_none() {
        let set = SignalSet::new();
        assert_eq!(set.mint_authority_active(), None);
        assert_eq!(set.top10_holder_share_percent(), None);
        assert!(!set.contains(SignalKind::PairCount));
    }

    #[test]
    fn typed_accessors_round_trip() {
        let mut set = SignalSet::new();
        set.insert(Signal::Top10HolderSharePercent(BigDecimal::from(42)));
        set.insert(Signal::PairCount(3));
        set.insert(Signal::RelativeSentiment(0.7));
        assert_eq!(
            set.top10_holder_share_percent(),
            Some(&BigDecimal::from(42))
        );
        assert_eq!(set.pair_count(), Some(3));
        assert_eq!(set.relative_sentiment(), Some(0.7));
    }
}
