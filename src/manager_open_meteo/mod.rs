pub mod models;

use std::time::Duration;
use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::blocking::{Client, Request};
use serde_json::Value;
use thiserror::Error;
use crate::config::Api;
use crate::manager_open_meteo::models::HourlySeries;
use crate::models::{Coordinates, ForecastWindow};
use crate::window::{follow_on_window, short_range_window, WindowError};

const DWD_ICON_PATH: &str = "/v1/dwd-icon";
const HOURLY_VARIABLES: &str = "temperature_2m,precipitation";

/// Struct for fetching ICON model forecasts from Open-Meteo
pub struct OpenMeteo {
    client: Client,
    base_url: String,
}

impl OpenMeteo {
    /// Returns an OpenMeteo struct ready for fetching forecasts
    ///
    /// # Arguments
    ///
    /// * 'config' - API configuration to use
    pub fn new(config: &Api) -> Result<OpenMeteo, OpenMeteoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(OpenMeteo {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the 48 hour ICON-D2 forecast starting at `now`
    ///
    /// # Arguments
    ///
    /// * 'coords' - location to get the forecast for
    /// * 'now' - start of the forecast window
    pub fn fetch_icon_d2(&self, coords: &Coordinates, now: DateTime<Utc>) -> Result<Value, OpenMeteoError> {
        let window = short_range_window(now);
        self.fetch_window(coords, &window)
    }

    /// Fetches the 72 hour ICON-EU forecast starting at `start_iso`
    ///
    /// # Arguments
    ///
    /// * 'coords' - location to get the forecast for
    /// * 'start_iso' - last timestamp of the preceding forecast window
    pub fn fetch_icon_eu(&self, coords: &Coordinates, start_iso: &str) -> Result<Value, OpenMeteoError> {
        let window = follow_on_window(start_iso)?;
        self.fetch_window(coords, &window)
    }

    /// Builds the GET request for a forecast window
    ///
    /// # Arguments
    ///
    /// * 'coords' - location to get the forecast for
    /// * 'window' - the window and model to request
    pub fn forecast_request(&self, coords: &Coordinates, window: &ForecastWindow) -> Result<Request, OpenMeteoError> {
        let params = [
            ("latitude", coords.latitude.to_string()),
            ("longitude", coords.longitude.to_string()),
            ("hourly", HOURLY_VARIABLES.to_string()),
            ("forecast_model", window.model.api_id().to_string()),
            ("start_date", window.start_date().format("%Y-%m-%d").to_string()),
            ("end_date", window.end_date().format("%Y-%m-%d").to_string()),
        ];

        self.client
            .get(format!("{}{}", self.base_url, DWD_ICON_PATH))
            .query(&params)
            .build()
            .map_err(|e| OpenMeteoError::Url(format!("{}: {}", self.base_url, e)))
    }

    /// Returns the last timestamp of the hourly series in a forecast payload
    ///
    /// # Arguments
    ///
    /// * 'payload' - forecast as returned by the API
    pub fn last_timestamp(payload: &Value) -> Result<String, OpenMeteoError> {
        let hourly = HourlySeries::from_payload(payload)
            .map_err(|e| OpenMeteoError::Document(format!("hourly series: {}", e)))?;

        hourly.time
            .last()
            .cloned()
            .ok_or(OpenMeteoError::EmptyForecast)
    }

    /// Requests one forecast window and returns the parsed JSON body
    ///
    /// # Arguments
    ///
    /// * 'coords' - location to get the forecast for
    /// * 'window' - the window and model to request
    fn fetch_window(&self, coords: &Coordinates, window: &ForecastWindow) -> Result<Value, OpenMeteoError> {
        let request = self.forecast_request(coords, window)?;
        info!("Fetching forecast {}", window);
        debug!("GET {}", request.url());

        let response = self.client.execute(request)?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(OpenMeteoError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        let json: Value = serde_json::from_str(&body)
            .map_err(|e| OpenMeteoError::Document(e.to_string()))?;

        Ok(json)
    }
}

/// Cuts a response body down to something fit for an error message
///
/// # Arguments
///
/// * 'body' - the body to truncate
fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[derive(Error, Debug)]
pub enum OpenMeteoError {
    #[error("NetworkError: {0}")]
    Network(#[from] reqwest::Error),
    #[error("StatusError: {status}: {body}")]
    Status { status: u16, body: String },
    #[error("DocumentError: {0}")]
    Document(String),
    #[error("EmptyForecastError: no hourly timestamps in forecast")]
    EmptyForecast,
    #[error("UrlError: {0}")]
    Url(String),
    #[error("WindowError: {0}")]
    Window(#[from] WindowError),
}
