use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

/// Start/end pair the indicator API expects for one tariff day.
///
/// The timestamps are naive on purpose: the upstream interprets them in the
/// indicator's own reference timezone, and attaching a caller-side offset
/// would shift the tariff day. `end` is the last second of the day, since
/// `start + 24 h` would pull in hour zero of the following day.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    /// Granularity of the requested series.
    pub const TIME_TRUNC: &'static str = "hour";

    #[must_use]
    pub fn for_date(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        Self { start, end: start + TimeDelta::days(1) - TimeDelta::seconds(1) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_spans_the_whole_day() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let window = DateWindow::for_date(date);
        assert_eq!(window.start.to_string(), "2024-01-15 00:00:00");
        assert_eq!(window.end.to_string(), "2024-01-15 23:59:59");
    }

    #[test]
    fn test_window_stays_within_its_date() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let window = DateWindow::for_date(date);
        assert_eq!(window.start.date(), date);
        assert_eq!(window.end.date(), date);
    }
}
