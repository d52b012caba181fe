use itertools::{Itertools, MinMaxResult};

use crate::{
    core::{
        error::LuzError,
        normalize::HourlyPrice,
        tier::{Tier, TierLadder},
    },
    quantity::KilowattHourPrice,
};

/// Day-level aggregation of the hourly records.
///
/// The extremes are tie-sets: every record priced at the day's minimum is a
/// best hour, and symmetrically for the worst, so callers see all equally
/// cheap hours instead of an arbitrary one.
#[derive(Clone, Debug)]
pub struct DailySummary {
    pub mean_kwh: KilowattHourPrice,
    pub min_kwh: KilowattHourPrice,
    pub max_kwh: KilowattHourPrice,
    pub tier_of_mean: Tier,
    pub best_hours: Vec<HourlyPrice>,
    pub worst_hours: Vec<HourlyPrice>,
}

impl DailySummary {
    /// Aggregate one day of records over the unrounded per-kWh prices.
    pub fn try_new(prices: &[HourlyPrice], ladder: &TierLadder) -> Result<Self, LuzError> {
        let (min_kwh, max_kwh) = match prices.iter().map(|price| price.price_kwh).minmax() {
            MinMaxResult::NoElements => return Err(LuzError::EmptyDataset),
            MinMaxResult::OneElement(only) => (only, only),
            MinMaxResult::MinMax(min, max) => (min, max),
        };
        #[allow(clippy::cast_precision_loss)]
        let mean_kwh = prices.iter().map(|price| price.price_kwh).sum::<KilowattHourPrice>()
            / prices.len() as f64;
        let ties = |extreme: KilowattHourPrice| {
            prices.iter().filter(|price| price.price_kwh == extreme).cloned().collect()
        };
        Ok(Self {
            mean_kwh,
            min_kwh,
            max_kwh,
            tier_of_mean: ladder.classify(mean_kwh),
            best_hours: ties(min_kwh),
            worst_hours: ties(max_kwh),
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::quantity::MegawattHourPrice;

    fn record(hour: u32, kwh: f64) -> HourlyPrice {
        HourlyPrice {
            hour_local: hour,
            datetime_utc: Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap(),
            price_mwh: MegawattHourPrice(kwh * 1000.0),
            price_kwh: KilowattHourPrice(kwh),
            tier: TierLadder::default().classify(KilowattHourPrice(kwh)),
        }
    }

    fn hours(prices: &[HourlyPrice]) -> Vec<u32> {
        prices.iter().map(|price| price.hour_local).collect()
    }

    #[test]
    fn test_summary() -> Result<(), LuzError> {
        let records =
            [record(0, 0.10), record(1, 0.05), record(2, 0.20), record(3, 0.05), record(4, 0.15)];
        let summary = DailySummary::try_new(&records, &TierLadder::default())?;

        assert_abs_diff_eq!(summary.mean_kwh.0, 0.11);
        assert_abs_diff_eq!(summary.min_kwh.0, 0.05);
        assert_abs_diff_eq!(summary.max_kwh.0, 0.20);
        assert_eq!(summary.tier_of_mean, Tier::Moderate);
        assert_eq!(hours(&summary.best_hours), [1, 3]);
        assert_eq!(hours(&summary.worst_hours), [2]);
        Ok(())
    }

    #[test]
    fn test_summary_is_order_independent() -> Result<(), LuzError> {
        let records =
            [record(0, 0.10), record(1, 0.05), record(2, 0.20), record(3, 0.05), record(4, 0.15)];
        let reversed: Vec<HourlyPrice> = records.iter().rev().cloned().collect();

        let forward = DailySummary::try_new(&records, &TierLadder::default())?;
        let backward = DailySummary::try_new(&reversed, &TierLadder::default())?;

        assert_eq!(forward.mean_kwh, backward.mean_kwh);
        assert_eq!(forward.min_kwh, backward.min_kwh);
        assert_eq!(forward.max_kwh, backward.max_kwh);

        let mut backward_best = hours(&backward.best_hours);
        backward_best.sort_unstable();
        assert_eq!(hours(&forward.best_hours), backward_best);
        Ok(())
    }

    #[test]
    fn test_single_record_is_both_extremes() -> Result<(), LuzError> {
        let summary = DailySummary::try_new(&[record(12, 0.08)], &TierLadder::default())?;
        assert_eq!(summary.min_kwh, summary.max_kwh);
        assert_eq!(hours(&summary.best_hours), [12]);
        assert_eq!(hours(&summary.worst_hours), [12]);
        Ok(())
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let error = DailySummary::try_new(&[], &TierLadder::default()).unwrap_err();
        assert!(matches!(error, LuzError::EmptyDataset));
    }
}
