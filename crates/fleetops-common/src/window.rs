use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default trailing window for report endpoints, in days.
pub const DEFAULT_REPORT_WINDOW_DAYS: i64 = 90;

/// Default trailing window for ticket statistics, in days.
pub const DEFAULT_TICKET_STATS_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WindowError {
    #[error("window start {start} is after end {end}")]
    StartAfterEnd {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

/// An inclusive `[start, end]` timestamp range scoping an aggregation.
///
/// Both bounds participate in `BETWEEN` comparisons on the store side, so
/// a window of a single instant still matches rows created at exactly that
/// instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReportWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, WindowError> {
        if start > end {
            return Err(WindowError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// Window covering the trailing `days` up to now.
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    /// Trailing 90 days, the default for report endpoints.
    pub fn default_reports() -> Self {
        Self::last_days(DEFAULT_REPORT_WINDOW_DAYS)
    }

    /// Trailing 30 days, the default for ticket statistics.
    pub fn default_ticket_stats() -> Self {
        Self::last_days(DEFAULT_TICKET_STATS_WINDOW_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_valid_window() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        let window = ReportWindow::new(start, end).unwrap();
        assert_eq!(window.start, start);
        assert_eq!(window.end, end);
    }

    #[test]
    fn test_single_instant_window_is_valid() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        assert!(ReportWindow::new(at, at).is_ok());
    }

    #[test]
    fn test_inverted_window_rejected() {
        let start = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            ReportWindow::new(start, end),
            Err(WindowError::StartAfterEnd { start, end })
        );
    }

    #[test]
    fn test_default_windows_span_expected_days() {
        let reports = ReportWindow::default_reports();
        assert_eq!((reports.end - reports.start).num_days(), 90);

        let tickets = ReportWindow::default_ticket_stats();
        assert_eq!((tickets.end - tickets.start).num_days(), 30);
    }
}
