use std::ops::Add;
use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use thiserror::Error;
use crate::models::{ForecastModel, ForecastWindow};

/// Timestamp layouts used by the API for hourly values, most common first
const API_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Returns the short range (ICON-D2) window, starting at the given point in time
///
/// # Arguments
///
/// * 'now' - the time the window starts at, normally the current time
pub fn short_range_window(now: DateTime<Utc>) -> ForecastWindow {
    let model = ForecastModel::IconD2;
    let start = now.naive_utc();

    ForecastWindow {
        model,
        start,
        end: start.add(TimeDelta::hours(model.horizon_hours())),
    }
}

/// Returns the medium range (ICON-EU) window that follows on from the given timestamp.
/// The window starts at `after` itself and spans the model horizon, so the first day overlaps the
/// preceding window.
///
/// # Arguments
///
/// * 'after' - last timestamp covered by the preceding window, as given by the API
pub fn follow_on_window(after: &str) -> Result<ForecastWindow, WindowError> {
    let model = ForecastModel::IconEu;
    let start = parse_api_timestamp(after)?;

    Ok(ForecastWindow {
        model,
        start,
        end: start.add(TimeDelta::hours(model.horizon_hours())),
    })
}

/// Parses a timestamp as found in the `hourly.time` series of an API response.
/// Timestamps carrying an offset are normalized to UTC.
///
/// # Arguments
///
/// * 'timestamp' - the timestamp to parse
pub fn parse_api_timestamp(timestamp: &str) -> Result<NaiveDateTime, WindowError> {
    let timestamp = timestamp.trim();

    for format in API_TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, format) {
            return Ok(dt);
        }
    }

    DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| dt.naive_utc())
        .map_err(|e| WindowError::Timestamp(format!("'{}': {}", timestamp, e)))
}

#[derive(Error, Debug)]
pub enum WindowError {
    #[error("TimestampError: {0}")]
    Timestamp(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn short_range_end_date_is_two_days_after_start() {
        let window = short_range_window(utc(2024, 6, 12, 9, 41));

        assert_eq!(window.model, ForecastModel::IconD2);
        assert_eq!(window.start_date(), date(2024, 6, 12));
        assert_eq!(window.end_date(), date(2024, 6, 14));
        assert_eq!(window.end - window.start, TimeDelta::hours(48));
    }

    #[test]
    fn short_range_rolls_over_month_and_year() {
        let window = short_range_window(utc(2024, 12, 30, 23, 59));
        assert_eq!(window.start_date(), date(2024, 12, 30));
        assert_eq!(window.end_date(), date(2025, 1, 1));

        let window = short_range_window(utc(2024, 1, 31, 0, 0));
        assert_eq!(window.end_date(), date(2024, 2, 2));
    }

    #[test]
    fn short_range_handles_february_in_leap_and_common_years() {
        assert_eq!(short_range_window(utc(2024, 2, 28, 12, 0)).end_date(), date(2024, 3, 1));
        assert_eq!(short_range_window(utc(2023, 2, 28, 12, 0)).end_date(), date(2023, 3, 2));
    }

    #[test]
    fn short_range_is_unaffected_by_dst_switch() {
        // Last Sunday of March, clocks go forward in central Europe
        let window = short_range_window(utc(2025, 3, 29, 22, 30));
        assert_eq!(window.end - window.start, TimeDelta::hours(48));
        assert_eq!(window.end_date(), date(2025, 3, 31));
    }

    #[test]
    fn follow_on_starts_at_timestamp() {
        let window = follow_on_window("2024-06-14T23:00").unwrap();

        assert_eq!(window.model, ForecastModel::IconEu);
        assert_eq!(window.start, date(2024, 6, 14).and_hms_opt(23, 0, 0).unwrap());
        assert_eq!(window.end - window.start, TimeDelta::hours(72));
        assert_eq!(window.start_date(), date(2024, 6, 14));
        assert_eq!(window.end_date(), date(2024, 6, 17));
    }

    #[test]
    fn follow_on_within_day_keeps_date() {
        let window = follow_on_window("2024-12-31T09:00").unwrap();

        assert_eq!(window.start, date(2024, 12, 31).and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(window.end_date(), date(2025, 1, 3));
    }

    #[test]
    fn parses_timestamp_variants() {
        let expected = date(2024, 6, 14).and_hms_opt(12, 0, 0).unwrap();

        assert_eq!(parse_api_timestamp("2024-06-14T12:00").unwrap(), expected);
        assert_eq!(parse_api_timestamp("2024-06-14T12:00:00").unwrap(), expected);
        assert_eq!(parse_api_timestamp("2024-06-14T14:00:00+02:00").unwrap(), expected);
    }

    #[test]
    fn rejects_garbage_timestamp() {
        let err = follow_on_window("yesterday").unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }
}
