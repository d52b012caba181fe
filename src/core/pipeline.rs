use chrono::{NaiveDateTime, Timelike};
use tokio::sync::Semaphore;

use crate::{
    api::esios,
    core::{
        config::PipelineConfig,
        day::LogicalDay,
        error::LuzError,
        normalize::{self, HourlyPrice},
        summary::DailySummary,
        tier::TierLadder,
        window::DateWindow,
    },
    prelude::*,
};

/// Upstream fetches in flight at once, across all concurrent callers.
const FETCH_PERMITS: usize = 5;

/// The one entry point every transport goes through: gate, resolve the
/// window, fetch, normalize, classify. Aggregation is separate so callers
/// that only want the hourly records do not pay for it.
pub struct Pipeline {
    client: esios::Api,
    ladder: TierLadder,
    geo_id: u32,
    availability_cutoff_hour: u32,
    fetch_permits: Semaphore,
}

impl Pipeline {
    pub fn try_new(config: PipelineConfig) -> Result<Self> {
        Ok(Self {
            ladder: TierLadder::try_new(config.tier_thresholds.clone())?,
            geo_id: config.geo_id,
            availability_cutoff_hour: config.availability_cutoff_hour,
            client: esios::Api::try_new(&config)?,
            fetch_permits: Semaphore::new(FETCH_PERMITS),
        })
    }

    /// Fetch and normalize one logical day of hourly prices.
    ///
    /// `now_local` is the caller's wall clock: it gates tomorrow's dataset
    /// and resolves the calendar date. An unpublished day comes back as an
    /// empty vector, not an error. Dropping the returned future cancels the
    /// in-flight request along with any pending backoff pause.
    #[instrument(skip_all, fields(day = ?day))]
    pub async fn hourly_prices(
        &self,
        day: LogicalDay,
        now_local: NaiveDateTime,
    ) -> Result<Vec<HourlyPrice>, LuzError> {
        day.ensure_available(now_local, self.availability_cutoff_hour)?;
        let window = DateWindow::for_date(day.date(now_local));
        let points = {
            // The permit only covers the upstream call, not normalization.
            let _permit =
                self.fetch_permits.acquire().await.expect("the fetch semaphore is never closed");
            self.client.hourly_values(window).await?
        };
        normalize::normalize(points, self.geo_id, &self.ladder)
    }

    /// The record covering the caller's current hour, from today's dataset.
    ///
    /// `None` means today carries no record for that hour, whether the day
    /// is unpublished or has a gap. On the fall-back day a local hour occurs
    /// twice and the earlier instant wins.
    pub async fn current_price(
        &self,
        now_local: NaiveDateTime,
    ) -> Result<Option<HourlyPrice>, LuzError> {
        let hour = now_local.hour();
        let prices = self.hourly_prices(LogicalDay::Today, now_local).await?;
        let price = prices.into_iter().find(|price| price.hour_local == hour);
        if price.is_none() {
            warn!(hour, "today's dataset does not cover the current hour");
        }
        Ok(price)
    }

    /// Aggregate records produced by [`Self::hourly_prices`].
    pub fn summarize(&self, prices: &[HourlyPrice]) -> Result<DailySummary, LuzError> {
        DailySummary::try_new(prices, &self.ladder)
    }
}
