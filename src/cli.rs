use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Url;

use crate::{core::config::PipelineConfig, quantity::KilowattHourPrice};

#[derive(Parser)]
#[command(version, about, propagate_version = true)]
pub struct Args {
    #[clap(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Today's hourly prices.
    #[clap(name = "today", alias = "hoy")]
    Today(DayArgs),

    /// Tomorrow's hourly prices, published around 20:00 local time.
    #[clap(name = "tomorrow", alias = "manana")]
    Tomorrow(DayArgs),

    /// The price of the hour running right now.
    #[clap(name = "now", alias = "ahora")]
    Now(NowArgs),
}

#[derive(Parser)]
pub struct DayArgs {
    /// Append the daily aggregation: mean, extremes, and the tied hours.
    #[clap(long)]
    pub summary: bool,

    /// Print JSON instead of tables.
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct NowArgs {
    /// Print JSON instead of a table.
    #[clap(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct ConfigArgs {
    /// Personal ESIOS API token, requested from `consultasios@ree.es`.
    #[clap(long = "api-token", env = "ESIOS_API_TOKEN")]
    pub api_token: String,

    #[clap(long = "base-url", env = "ESIOS_BASE_URL", default_value = "https://api.esios.ree.es")]
    pub base_url: Url,

    /// Indicator to fetch; `1001` is the hourly PVPC.
    #[clap(long = "indicator-id", env = "ESIOS_INDICATOR_ID", default_value = "1001")]
    pub indicator_id: u32,

    /// Geo zone to keep: `8741` Península, `8742` Canarias, `8743` Baleares,
    /// `8744` Ceuta, `8745` Melilla.
    #[clap(long = "geo-id", env = "ESIOS_GEO_ID", default_value = "8741")]
    pub geo_id: u32,

    /// Attempts per fetch before giving up.
    #[clap(long = "retry-max-attempts", env = "RETRY_MAX_ATTEMPTS", default_value = "3")]
    pub retry_max_attempts: u32,

    /// Backoff unit in seconds; the n-th failed attempt pauses n times this.
    #[clap(long = "retry-backoff-seconds", env = "RETRY_BACKOFF_SECONDS", default_value = "1")]
    pub retry_backoff_seconds: u64,

    /// Ascending €/kWh bounds of the price tiers, comma-separated.
    #[clap(
        long = "tier-thresholds",
        env = "TIER_THRESHOLDS",
        value_delimiter = ',',
        default_value = "0.10,0.15,0.20,0.25",
    )]
    pub tier_thresholds: Vec<KilowattHourPrice>,

    /// Local hour after which tomorrow's dataset is served.
    #[clap(
        long = "availability-cutoff-hour",
        env = "AVAILABILITY_CUTOFF_HOUR",
        default_value = "20",
    )]
    pub availability_cutoff_hour: u32,
}

impl ConfigArgs {
    #[must_use]
    pub fn into_config(self) -> PipelineConfig {
        PipelineConfig::builder()
            .base_url(self.base_url)
            .api_token(self.api_token)
            .indicator_id(self.indicator_id)
            .geo_id(self.geo_id)
            .retry_max_attempts(self.retry_max_attempts)
            .retry_backoff_unit(Duration::from_secs(self.retry_backoff_seconds))
            .tier_thresholds(self.tier_thresholds)
            .availability_cutoff_hour(self.availability_cutoff_hour)
            .build()
    }
}
