use std::fmt;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Latitude of the forecast location (Prague)
pub const LATITUDE: f64 = 50.0755;
/// Longitude of the forecast location (Prague)
pub const LONGITUDE: f64 = 14.4378;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Coordinates {
        Coordinates { latitude, longitude }
    }

    /// The fixed location forecasts are fetched for
    pub fn home() -> Coordinates {
        Coordinates::new(LATITUDE, LONGITUDE)
    }
}

/// Numerical weather prediction models served by the DWD ICON endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastModel {
    IconD2,
    IconEu,
}

impl ForecastModel {
    /// Model identifier as expected by the API
    pub fn api_id(&self) -> &'static str {
        match self {
            ForecastModel::IconD2 => "icon_d2",
            ForecastModel::IconEu => "icon_eu",
        }
    }

    /// Length of the forecast window fetched from this model, in hours
    pub fn horizon_hours(&self) -> i64 {
        match self {
            ForecastModel::IconD2 => 48,
            ForecastModel::IconEu => 72,
        }
    }
}

impl fmt::Display for ForecastModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.api_id())
    }
}

/// A span of hourly forecast values requested from one model
///
/// Both ends are in API time (UTC, no offset). The API itself only takes calendar dates,
/// so the window is sent as `start_date()..=end_date()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastWindow {
    pub model: ForecastModel,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ForecastWindow {
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }
}

impl fmt::Display for ForecastWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} - {}", self.model, self.start.format("%Y-%m-%dT%H:%M"), self.end.format("%Y-%m-%dT%H:%M"))
    }
}

/// What kind of day a daily summary describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    Bathing,
    Rain,
    Ordinary,
}

impl DayKind {
    /// Classifies a day from its maximum temperature and total precipitation
    ///
    /// # Arguments
    ///
    /// * 'temp_max' - the highest temperature of the day in degrees Celsius, None if unknown
    /// * 'precipitation' - the total precipitation of the day in mm
    pub fn classify(temp_max: Option<f64>, precipitation: f64) -> DayKind {
        if temp_max.is_some_and(|t| t >= 25.0) && precipitation < 1.0 {
            DayKind::Bathing
        } else if precipitation >= 1.0 {
            DayKind::Rain
        } else {
            DayKind::Ordinary
        }
    }
}

/// Aggregate of one calendar day of hourly forecast values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub precipitation: f64,
    pub hours: usize,
    pub kind: DayKind,
}

impl fmt::Display for DailySummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.temp_max, self.temp_min) {
            (Some(max), Some(min)) => write!(f, "{}: {:.1}°C / {:.1}°C, {:.1} mm ({} h, {:?})",
                                             self.date, max, min, self.precipitation, self.hours, self.kind),
            _ => write!(f, "{}: no temperature, {:.1} mm ({} h, {:?})",
                        self.date, self.precipitation, self.hours, self.kind),
        }
    }
}
