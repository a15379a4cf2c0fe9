//! Time-window computation for event queries.

use chrono::{DateTime, Duration, Local, NaiveTime};

use crate::document::TimeRange;

/// The query window `[start, end]` passed to the events endpoint.
///
/// `end` is always the time of invocation; `start` depends on the policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl TimeWindow {
    /// Window from the start of `now`'s local day up to `now`.
    #[must_use]
    pub fn since_local_midnight(now: DateTime<Local>) -> Self {
        let midnight = now.date_naive().and_time(NaiveTime::MIN);
        // A DST transition can make local midnight nonexistent or
        // ambiguous; take the earliest valid instant in that case.
        let start = midnight.and_local_timezone(Local).earliest().unwrap_or(now);
        Self { start, end: now }
    }

    /// Window covering the `hours` before `now`.
    #[must_use]
    pub fn last_hours(now: DateTime<Local>, hours: i64) -> Self {
        Self {
            start: now - Duration::hours(hours),
            end: now,
        }
    }

    /// The range echoed into the export metadata.
    #[must_use]
    pub const fn time_range(&self) -> TimeRange {
        TimeRange {
            start: self.start,
            end: self.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn last_hours_subtracts_from_now() {
        let now = Local.with_ymd_and_hms(2025, 3, 1, 15, 30, 0).unwrap();
        let window = TimeWindow::last_hours(now, 12);

        assert_eq!(window.end, now);
        assert_eq!(window.end - window.start, Duration::hours(12));
    }

    #[test]
    fn since_local_midnight_starts_at_day_boundary() {
        let now = Local.with_ymd_and_hms(2025, 3, 1, 15, 30, 0).unwrap();
        let window = TimeWindow::since_local_midnight(now);

        assert_eq!(window.end, now);
        assert_eq!(window.start.date_naive(), now.date_naive());
        assert_eq!(window.start.hour(), 0);
        assert_eq!(window.start.minute(), 0);
        assert_eq!(window.start.second(), 0);
    }

    #[test]
    fn time_range_echoes_the_window() {
        let now = Local.with_ymd_and_hms(2025, 3, 1, 15, 30, 0).unwrap();
        let window = TimeWindow::last_hours(now, 12);
        let range = window.time_range();

        assert_eq!(range.start, window.start);
        assert_eq!(range.end, window.end);
    }
}
