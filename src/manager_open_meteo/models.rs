use serde::Deserialize;
use serde_json::Value;

/// The parts of a forecast response that are read back, the rest of the payload is passed through
#[derive(Deserialize, Debug)]
pub struct ForecastPayload {
    pub hourly: HourlySeries,
}

#[derive(Deserialize, Debug)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
}

impl HourlySeries {
    /// Reads the hourly series out of a raw forecast payload
    ///
    /// # Arguments
    ///
    /// * 'payload' - JSON document as returned by the API
    pub fn from_payload(payload: &Value) -> Result<HourlySeries, serde_json::Error> {
        ForecastPayload::deserialize(payload).map(|p| p.hourly)
    }
}
