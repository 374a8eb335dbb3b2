use std::collections::BTreeMap;
use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use serde_json::Value;
use thiserror::Error;
use crate::manager_open_meteo::models::HourlySeries;
use crate::models::{DailySummary, DayKind};
use crate::window::parse_api_timestamp;

/// Number of days the merged forecast is summarized over
pub const SUMMARY_DAYS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyPoint {
    pub time: NaiveDateTime,
    pub temperature: Option<f64>,
    pub precipitation: Option<f64>,
}

/// Builds daily summaries out of the short range and follow on forecast payloads
///
/// # Arguments
///
/// * 'short_range' - the ICON-D2 payload
/// * 'follow_on' - the ICON-EU payload
pub fn summarize(short_range: &Value, follow_on: &Value) -> Result<Vec<DailySummary>, SummaryError> {
    let short_range = HourlySeries::from_payload(short_range)
        .map_err(|e| SummaryError::Document(format!("short range forecast: {}", e)))?;
    let follow_on = HourlySeries::from_payload(follow_on)
        .map_err(|e| SummaryError::Document(format!("follow on forecast: {}", e)))?;

    let points = merge_series(&short_range, &follow_on);
    if points.is_empty() {
        return Err(SummaryError::NoData);
    }

    Ok(daily_summaries(&points, SUMMARY_DAYS))
}

/// Merges two hourly series into one ordered series.
/// Follow on values at or before the last short range timestamp are dropped, so the short range
/// model always wins where the two overlap.
///
/// # Arguments
///
/// * 'short_range' - the series covering the first part of the forecast
/// * 'follow_on' - the series that continues after the short range
pub fn merge_series(short_range: &HourlySeries, follow_on: &HourlySeries) -> Vec<HourlyPoint> {
    let mut points = to_points(short_range);
    let gate = points.last().map(|p| p.time);

    points.extend(
        to_points(follow_on)
            .into_iter()
            .filter(|p| gate.is_none_or(|g| p.time > g))
    );

    points
}

/// Groups hourly values per calendar day and aggregates them
///
/// # Arguments
///
/// * 'points' - hourly values
/// * 'max_days' - the number of days, counted from the earliest, to return
pub fn daily_summaries(points: &[HourlyPoint], max_days: usize) -> Vec<DailySummary> {
    let mut days: BTreeMap<NaiveDate, Vec<&HourlyPoint>> = BTreeMap::new();
    for p in points {
        days.entry(p.time.date()).or_default().push(p);
    }

    days.into_iter()
        .take(max_days)
        .map(|(date, day)| {
            let temps = day.iter().filter_map(|p| p.temperature).collect::<Vec<f64>>();
            let temp_max = temps.iter().copied().reduce(f64::max);
            let temp_min = temps.iter().copied().reduce(f64::min);
            let precipitation = day.iter().filter_map(|p| p.precipitation).sum::<f64>();

            DailySummary {
                date,
                temp_max,
                temp_min,
                precipitation,
                hours: day.len(),
                kind: DayKind::classify(temp_max, precipitation),
            }
        })
        .collect()
}

/// Zips an hourly series into points, skipping timestamps that can't be parsed
///
/// # Arguments
///
/// * 'series' - the series to transform
fn to_points(series: &HourlySeries) -> Vec<HourlyPoint> {
    series.time
        .iter()
        .enumerate()
        .filter_map(|(i, t)| match parse_api_timestamp(t) {
            Ok(time) => Some(HourlyPoint {
                time,
                temperature: series.temperature_2m.get(i).copied().flatten(),
                precipitation: series.precipitation.get(i).copied().flatten(),
            }),
            Err(e) => {
                warn!("skipping hourly value: {}", e);
                None
            }
        })
        .collect()
}

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("DocumentError: {0}")]
    Document(String),
    #[error("NoDataError: no hourly values to summarize")]
    NoData,
}
