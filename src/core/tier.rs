use serde::Serialize;

use crate::{prelude::*, quantity::KilowattHourPrice};

/// Price level of one hour, the tariff's «semáforo».
///
/// Ordered from cheapest to most expensive.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
}

impl Tier {
    /// All tiers, cheapest first. A ladder with `n` bounds uses the first `n + 1`.
    pub const ALL: [Self; 5] =
        [Self::Low, Self::Moderate, Self::High, Self::VeryHigh, Self::Extreme];
}

/// Ascending per-kWh upper bounds that map a price onto a [`Tier`].
#[derive(Clone, Debug)]
pub struct TierLadder(Vec<KilowattHourPrice>);

impl TierLadder {
    pub const DEFAULT_BOUNDS: [KilowattHourPrice; 4] = [
        KilowattHourPrice(0.10),
        KilowattHourPrice(0.15),
        KilowattHourPrice(0.20),
        KilowattHourPrice(0.25),
    ];

    pub fn try_new(bounds: Vec<KilowattHourPrice>) -> Result<Self> {
        ensure!(!bounds.is_empty(), "the tier ladder needs at least one bound");
        ensure!(
            bounds.len() < Tier::ALL.len(),
            "at most {} tier bounds are supported",
            Tier::ALL.len() - 1,
        );
        ensure!(
            bounds.is_sorted_by(|lhs, rhs| lhs < rhs),
            "tier bounds must be strictly ascending",
        );
        Ok(Self(bounds))
    }

    /// Classify an unrounded per-kWh price.
    ///
    /// Each bound is exclusive: a price sitting exactly on a bound belongs to
    /// the tier above it. Anything at or past the last bound takes the top
    /// tier of the ladder, and a negative price lands in the lowest.
    #[must_use]
    pub fn classify(&self, price: KilowattHourPrice) -> Tier {
        let index = self.0.iter().take_while(|bound| price >= **bound).count();
        Tier::ALL[index]
    }
}

impl Default for TierLadder {
    fn default() -> Self {
        Self(Self::DEFAULT_BOUNDS.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_defaults() {
        let ladder = TierLadder::default();
        assert_eq!(ladder.classify(KilowattHourPrice(0.05)), Tier::Low);
        assert_eq!(ladder.classify(KilowattHourPrice(0.12)), Tier::Moderate);
        assert_eq!(ladder.classify(KilowattHourPrice(0.17)), Tier::High);
        assert_eq!(ladder.classify(KilowattHourPrice(0.22)), Tier::VeryHigh);
        assert_eq!(ladder.classify(KilowattHourPrice(0.30)), Tier::Extreme);
    }

    #[test]
    fn test_bounds_are_exclusive() {
        let ladder = TierLadder::default();
        assert_eq!(ladder.classify(KilowattHourPrice(0.0999)), Tier::Low);
        assert_eq!(ladder.classify(KilowattHourPrice(0.10)), Tier::Moderate);
        assert_eq!(ladder.classify(KilowattHourPrice(0.25)), Tier::Extreme);
    }

    #[test]
    fn test_negative_price_is_low() {
        assert_eq!(TierLadder::default().classify(KilowattHourPrice(-0.02)), Tier::Low);
    }

    #[test]
    fn test_classification_is_monotonic() {
        let ladder = TierLadder::default();
        let prices = (0..50).map(|cents| KilowattHourPrice(f64::from(cents) / 100.0));
        let tiers: Vec<Tier> = prices.map(|price| ladder.classify(price)).collect();
        assert!(tiers.is_sorted());
    }

    #[test]
    fn test_shorter_ladder_caps_at_its_top_tier() -> Result {
        let ladder =
            TierLadder::try_new(vec![KilowattHourPrice(0.10), KilowattHourPrice(0.15)])?;
        assert_eq!(ladder.classify(KilowattHourPrice(0.50)), Tier::High);
        Ok(())
    }

    #[test]
    fn test_unsorted_bounds_are_rejected() {
        assert!(
            TierLadder::try_new(vec![KilowattHourPrice(0.15), KilowattHourPrice(0.10)]).is_err()
        );
        assert!(
            TierLadder::try_new(vec![KilowattHourPrice(0.10), KilowattHourPrice(0.10)]).is_err()
        );
    }

    #[test]
    fn test_empty_and_oversized_ladders_are_rejected() {
        assert!(TierLadder::try_new(Vec::new()).is_err());
        let bounds = (1..=5).map(|index| KilowattHourPrice(f64::from(index) / 10.0)).collect();
        assert!(TierLadder::try_new(bounds).is_err());
    }
}
