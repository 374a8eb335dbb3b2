use std::env;
use log::info;
use thiserror::Error;
use crate::config::{load_config, Config, LoadConfigurationError};
use crate::logging::{setup_logger, LoggerError};
use crate::manager_open_meteo::{OpenMeteo, OpenMeteoError};

pub struct Mgr {
    pub open_meteo: OpenMeteo,
}

/// Initializes and returns configuration and a Mgr struct holding initialized managers
///
pub fn init() -> Result<(Config, Mgr), InitializationError> {
    let args: Vec<String> = env::args().collect();
    let config_path = config_path_arg(&args);

    // Load configuration
    let config = load_config(config_path)?;

    // Setup logging
    let _ = setup_logger(config.general.log_path.as_deref(), config.general.log_level, config.general.log_to_stdout)?;

    // Print version
    info!("starting icon forecast version: {}", env!("CARGO_PKG_VERSION"));

    // Instantiate structs
    let open_meteo = OpenMeteo::new(&config.api)?;

    Ok((config, Mgr { open_meteo }))
}

/// Returns the path given by a `--config=<path>` argument, if any
///
/// # Arguments
///
/// * 'args' - command line arguments
fn config_path_arg(args: &[String]) -> Option<&str> {
    args.iter()
        .find_map(|a| a.strip_prefix("--config="))
        .filter(|p| !p.is_empty())
}

/// Error depicting errors that occur while initializing
///
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("ConfigurationError: {0}")]
    ConfigurationError(#[from] LoadConfigurationError),
    #[error("SetupLoggerError: {0}")]
    SetupLoggerError(#[from] LoggerError),
    #[error("ForecastSetupError: {0}")]
    ForecastSetupError(#[from] OpenMeteoError),
}
