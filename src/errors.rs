use thiserror::Error;

/// Error depicting a failed forecast run, terminates the program
///
#[derive(Debug, Error)]
#[error("error while fetching forecast: {0}")]
pub struct ForecastRunError(pub String);
