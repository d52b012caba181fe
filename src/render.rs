use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::{
    core::{normalize::HourlyPrice, summary::DailySummary, tier::Tier},
    prelude::*,
};

/// JSON presentation of one day. Rounding happens here and nowhere else:
/// €/MWh at two decimals, €/kWh at four.
#[derive(Serialize)]
struct DayJson {
    date: NaiveDate,
    prices: Vec<PriceJson>,

    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<SummaryJson>,
}

#[derive(Serialize)]
struct PriceJson {
    hour: u32,
    datetime_utc: DateTime<Utc>,
    price_mwh: f64,
    price_kwh: f64,
    tier: Tier,
}

impl From<&HourlyPrice> for PriceJson {
    fn from(price: &HourlyPrice) -> Self {
        Self {
            hour: price.hour_local,
            datetime_utc: price.datetime_utc,
            price_mwh: price.price_mwh.rounded(),
            price_kwh: price.price_kwh.rounded(),
            tier: price.tier,
        }
    }
}

#[derive(Serialize)]
struct SummaryJson {
    mean_kwh: f64,
    min_kwh: f64,
    max_kwh: f64,
    tier_of_mean: Tier,
    best_hours: Vec<PriceJson>,
    worst_hours: Vec<PriceJson>,
}

impl From<&DailySummary> for SummaryJson {
    fn from(summary: &DailySummary) -> Self {
        Self {
            mean_kwh: summary.mean_kwh.rounded(),
            min_kwh: summary.min_kwh.rounded(),
            max_kwh: summary.max_kwh.rounded(),
            tier_of_mean: summary.tier_of_mean,
            best_hours: summary.best_hours.iter().map(PriceJson::from).collect(),
            worst_hours: summary.worst_hours.iter().map(PriceJson::from).collect(),
        }
    }
}

pub fn to_json(
    date: NaiveDate,
    prices: &[HourlyPrice],
    summary: Option<&DailySummary>,
) -> Result<String> {
    let day = DayJson {
        date,
        prices: prices.iter().map(PriceJson::from).collect(),
        summary: summary.map(SummaryJson::from),
    };
    Ok(serde_json::to_string_pretty(&day)?)
}

/// JSON presentation of a single record, for the current-hour lookup.
pub fn price_to_json(price: &HourlyPrice) -> Result<String> {
    Ok(serde_json::to_string_pretty(&PriceJson::from(price))?)
}
