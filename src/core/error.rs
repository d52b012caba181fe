use chrono::NaiveDateTime;
use http::StatusCode;
use thiserror::Error;

/// Tagged failure of a price request.
///
/// Callers match on the variant: a gated request is not an upstream fault,
/// and a malformed payload must never degrade into an empty dataset.
#[derive(Debug, Error)]
pub enum LuzError {
    /// Tomorrow's tariff was requested before its publication hour.
    #[error("tomorrow's prices are published around {cutoff_hour}:00, it is now {local_time}")]
    NotYetAvailable { local_time: NaiveDateTime, cutoff_hour: u32 },

    /// The upstream could not be fetched. `reason` is the last failure
    /// observed before the attempt budget ran out.
    #[error("upstream gave up after {attempts} attempt(s): {reason}")]
    UpstreamUnavailable { attempts: u32, reason: FetchFailure },

    /// The upstream answered with data the normalizer cannot accept.
    #[error("malformed upstream data: {0}")]
    MalformedUpstream(String),

    /// Aggregation was requested over zero records.
    #[error("there are no price records to aggregate")]
    EmptyDataset,
}

/// What went wrong with a single upstream attempt.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("the request timed out")]
    Timeout,

    #[error("the connection failed: {0}")]
    Connect(String),

    #[error("HTTP {0}")]
    Status(StatusCode),

    #[error("undecodable response body: {0}")]
    MalformedBody(String),
}

impl FetchFailure {
    /// Transient faults are worth another attempt. A client error is not:
    /// it will not change on retry and must reach the caller as-is.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout | Self::Connect(_) | Self::MalformedBody(_) => true,
            Self::Status(status) => status.is_server_error(),
        }
    }
}
