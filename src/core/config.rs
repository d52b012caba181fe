use std::time::Duration;

use bon::Builder;
use reqwest::Url;

use crate::{core::tier::TierLadder, quantity::KilowattHourPrice};

/// Everything the pipeline needs, resolved by the transport at startup.
///
/// The defaults mirror the published tariff: indicator 1001 is the hourly
/// PVPC, geo zone 8741 is the peninsula, and tomorrow's prices appear
/// around 20:00 local time.
#[derive(Builder, Clone, Debug)]
pub struct PipelineConfig {
    pub base_url: Url,

    /// Personal API token, sent as `x-api-key`.
    pub api_token: String,

    #[builder(default = 1001)]
    pub indicator_id: u32,

    #[builder(default = 8741)]
    pub geo_id: u32,

    /// Attempt budget for one fetch.
    #[builder(default = 3)]
    pub retry_max_attempts: u32,

    /// The n-th failed attempt pauses `n × this` before the next one.
    #[builder(default = Duration::from_secs(1))]
    pub retry_backoff_unit: Duration,

    /// Ascending per-kWh tier bounds.
    #[builder(default = TierLadder::DEFAULT_BOUNDS.to_vec())]
    pub tier_thresholds: Vec<KilowattHourPrice>,

    /// Local hour after which tomorrow's dataset may be served.
    #[builder(default = 20)]
    pub availability_cutoff_hour: u32,
}
