use std::time::{Duration, Instant};

use tokio::time::sleep;

use crate::{
    core::error::{FetchFailure, LuzError},
    prelude::*,
};

/// Run one upstream call with a bounded attempt budget.
///
/// Transient failures are absorbed with a linearly growing pause: the n-th
/// failure sleeps `n × backoff_unit` before the next attempt. Non-retryable
/// failures and an exhausted budget surface as [`LuzError::UpstreamUnavailable`]
/// carrying the last reason observed. The sleeps are cancellation points.
pub async fn with_backoff<T, F, Fut>(
    max_attempts: u32,
    backoff_unit: Duration,
    mut operation: F,
) -> Result<T, LuzError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchFailure>>,
{
    let mut attempt = 1;
    loop {
        let started = Instant::now();
        match operation().await {
            Ok(value) => {
                debug!(attempt, elapsed = ?started.elapsed(), "upstream call succeeded");
                return Ok(value);
            }
            Err(reason) if !reason.is_retryable() || attempt >= max_attempts => {
                warn!(attempt, %reason, elapsed = ?started.elapsed(), "giving up");
                return Err(LuzError::UpstreamUnavailable { attempts: attempt, reason });
            }
            Err(reason) => {
                let pause = backoff_unit * attempt;
                warn!(
                    attempt,
                    %reason,
                    elapsed = ?started.elapsed(),
                    ?pause,
                    "upstream attempt failed, retrying…"
                );
                sleep(pause).await;
                attempt += 1;
            }
        }
    }
}
