//! [ESIOS](https://www.esios.ree.es) indicator client.

use std::time::Duration;

use chrono::NaiveDateTime;
use http::{HeaderMap, HeaderValue, header};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::{
    api::retry,
    core::{
        config::PipelineConfig,
        error::{FetchFailure, LuzError},
        normalize::RawPricePoint,
        window::DateWindow,
    },
    prelude::*,
};

/// Client-side timeout of a single attempt.
const ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct Api {
    client: Client,
    indicator_url: Url,
    max_attempts: u32,
    backoff_unit: Duration,
}

impl Api {
    pub fn try_new(config: &PipelineConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.append(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers.append("x-api-key", HeaderValue::from_str(&config.api_token)?);
        let client = Client::builder()
            .user_agent("luz")
            .timeout(ATTEMPT_TIMEOUT)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            indicator_url: config
                .base_url
                .join(&format!("indicators/{}", config.indicator_id))
                .context("failed to build the indicator URL")?,
            max_attempts: config.retry_max_attempts.max(1),
            backoff_unit: config.retry_backoff_unit,
        })
    }

    /// Fetch the raw indicator values for one day window.
    ///
    /// A day the upstream has not published yet comes back as an empty
    /// vector with a `200`, so emptiness is the caller's signal, not an
    /// error here.
    #[instrument(skip_all, fields(start = %window.start))]
    pub async fn hourly_values(&self, window: DateWindow) -> Result<Vec<RawPricePoint>, LuzError> {
        info!("fetching…");
        let query = IndicatorQuery::from(window);
        let response =
            retry::with_backoff(self.max_attempts, self.backoff_unit, || self.attempt(&query))
                .await?;
        info!(
            indicator = response.indicator.short_name,
            n_values = response.indicator.values.len(),
            "fetched"
        );
        Ok(response.indicator.values)
    }

    #[instrument(skip_all, level = Level::DEBUG)]
    async fn attempt(&self, query: &IndicatorQuery) -> Result<IndicatorResponse, FetchFailure> {
        let response = self
            .client
            .get(self.indicator_url.clone())
            .query(query)
            .send()
            .await
            .map_err(FetchFailure::from)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status));
        }
        response.json().await.map_err(FetchFailure::from)
    }
}

impl From<reqwest::Error> for FetchFailure {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::MalformedBody(error.to_string())
        } else {
            Self::Connect(error.to_string())
        }
    }
}

#[derive(Serialize)]
struct IndicatorQuery {
    start_date: NaiveDateTime,
    end_date: NaiveDateTime,
    time_trunc: &'static str,
}

impl From<DateWindow> for IndicatorQuery {
    fn from(window: DateWindow) -> Self {
        Self { start_date: window.start, end_date: window.end, time_trunc: DateWindow::TIME_TRUNC }
    }
}

#[derive(Deserialize)]
struct IndicatorResponse {
    indicator: Indicator,
}

/// The envelope must carry `values`, even if empty: an answer without them
/// is malformed, not an empty day.
#[derive(Deserialize)]
struct Indicator {
    short_name: String,
    values: Vec<RawPricePoint>,
}
