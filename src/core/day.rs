use chrono::{Days, NaiveDate, NaiveDateTime, Timelike};

use crate::core::error::LuzError;

/// Tariff day relative to the caller's wall clock.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogicalDay {
    Today,
    Tomorrow,
}

impl LogicalDay {
    /// Calendar date this logical day resolves to.
    #[must_use]
    pub fn date(self, now_local: NaiveDateTime) -> NaiveDate {
        match self {
            Self::Today => now_local.date(),
            Self::Tomorrow => now_local.date() + Days::new(1),
        }
    }

    /// The upstream publishes tomorrow's tariff around `cutoff_hour` local
    /// time, so an earlier request is rejected before anything is fetched.
    /// Today is never gated. The comparison reads the caller's wall clock:
    /// using UTC here would move the publication moment by the local offset.
    pub fn ensure_available(
        self,
        now_local: NaiveDateTime,
        cutoff_hour: u32,
    ) -> Result<(), LuzError> {
        match self {
            Self::Today => Ok(()),
            Self::Tomorrow if now_local.hour() >= cutoff_hour => Ok(()),
            Self::Tomorrow => Err(LuzError::NotYetAvailable { local_time: now_local, cutoff_hour }),
        }
    }
}
