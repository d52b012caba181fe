use chrono::{DateTime, Timelike, Utc};
use itertools::Itertools;
use serde::Deserialize;

use crate::{
    core::{
        error::LuzError,
        tier::{Tier, TierLadder},
    },
    prelude::*,
    quantity::{KilowattHourPrice, MegawattHourPrice},
};

/// One value of the indicator payload, as the upstream sends it.
///
/// Everything is optional here: presence is checked during normalization so
/// that a single gap fails the request loudly instead of failing to decode
/// the whole envelope.
#[derive(Debug, Default, Deserialize)]
pub struct RawPricePoint {
    pub datetime: Option<String>,
    pub value: Option<f64>,
    pub geo_id: Option<u32>,
    pub geo_name: Option<String>,
}

/// One normalized hour of the tariff.
#[derive(Clone, Debug)]
pub struct HourlyPrice {
    /// Hour of day in the offset the point was published with, 0 to 23.
    pub hour_local: u32,
    pub datetime_utc: DateTime<Utc>,
    pub price_mwh: MegawattHourPrice,
    /// Unrounded; rounding is presentation-only.
    pub price_kwh: KilowattHourPrice,
    pub tier: Tier,
}

/// Turn the raw payload into normalized hourly records, sorted by time.
///
/// Points belonging to other geo zones are dropped before validation, so a
/// gap in a zone nobody asked for cannot fail the request. The remaining
/// points must each carry `datetime` and `value`; partial results are never
/// returned.
pub fn normalize(
    points: Vec<RawPricePoint>,
    geo_id: u32,
    ladder: &TierLadder,
) -> Result<Vec<HourlyPrice>, LuzError> {
    let (matching, foreign): (Vec<_>, Vec<_>) =
        points.into_iter().partition(|point| point.geo_id.is_none_or(|id| id == geo_id));
    if matching.is_empty() && !foreign.is_empty() {
        let zones =
            foreign.iter().filter_map(|point| point.geo_name.as_deref()).unique().join(", ");
        warn!(geo_id, zones, "the payload has no points for the requested geo zone");
    }
    Ok(matching
        .into_iter()
        .map(|point| normalize_point(point, ladder))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .sorted_by_key(|price| price.datetime_utc)
        .collect())
}

fn normalize_point(point: RawPricePoint, ladder: &TierLadder) -> Result<HourlyPrice, LuzError> {
    let datetime = point.datetime.ok_or_else(|| {
        LuzError::MalformedUpstream("a point is missing its `datetime`".to_string())
    })?;
    let value = point.value.ok_or_else(|| {
        LuzError::MalformedUpstream(format!("the point at `{datetime}` is missing its `value`"))
    })?;
    // RFC 3339 keeps the offset the point was published with.
    let datetime = DateTime::parse_from_rfc3339(&datetime).map_err(|error| {
        LuzError::MalformedUpstream(format!("unparsable `datetime` `{datetime}`: {error}"))
    })?;
    let price_mwh = MegawattHourPrice(value);
    let price_kwh = price_mwh.per_kilowatt_hour();
    Ok(HourlyPrice {
        hour_local: datetime.hour(),
        datetime_utc: datetime.with_timezone(&Utc),
        price_mwh,
        price_kwh,
        tier: ladder.classify(price_kwh),
    })
}
