use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use fleetops_common::{Granularity, ReportWindow};

use crate::error::ApiError;

/// Query parameters shared by the report and export endpoints. Every
/// field is optional; endpoints fill in their own defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
    pub interval: Option<String>,
    pub format: Option<String>,
    pub vehicle_id: Option<i64>,
}

/// Parse an ISO-8601 bound: either a full timestamp or a bare date. A
/// bare date expands to the start or end of that day so the inclusive
/// window covers it completely.
fn parse_bound(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>, ApiError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let time = if end_of_day {
            date.and_hms_opt(23, 59, 59).expect("valid time")
        } else {
            date.and_hms_opt(0, 0, 0).expect("valid time")
        };
        return Ok(time.and_utc());
    }

    Err(ApiError::Validation(format!(
        "Invalid date '{}', expected ISO-8601",
        raw
    )))
}

/// Resolve the request window, falling back to the endpoint default for
/// either missing bound. Malformed or inverted bounds fail before any
/// query runs.
pub fn resolve_window(query: &ReportQuery, default: ReportWindow) -> Result<ReportWindow, ApiError> {
    let start = match &query.start_date {
        Some(raw) => parse_bound(raw, false)?,
        None => default.start,
    };
    let end = match &query.end_date {
        Some(raw) => parse_bound(raw, true)?,
        None => default.end,
    };

    ReportWindow::new(start, end).map_err(|e| ApiError::Validation(e.to_string()))
}

/// Resolve the trend interval, defaulting to daily buckets.
pub fn resolve_granularity(query: &ReportQuery) -> Result<Granularity, ApiError> {
    match query.interval.as_deref() {
        Some(raw) => raw.parse().map_err(ApiError::Validation),
        None => Ok(Granularity::Day),
    }
}
