use anyhow::Result;
use log::{error, info};
use crate::errors::ForecastRunError;
use crate::initialization::init;
use crate::worker::run;

mod config;
mod errors;
mod initialization;
mod logging;
mod manager_open_meteo;
mod models;
mod summary;
mod window;
mod worker;

fn main() -> Result<()> {
    // Load config and set up the forecast client. If initialization fails, we can't even log.
    let (config, mgr) = match init() {
        Ok((c, m)) => (c, m),
        Err(e) => {
            return Err(ForecastRunError(format!("Initialization failed: {}", e)).into());
        }
    };

    match run(&mgr, &config.files, None) {
        Ok(report) => {
            info!("Summarized {} days of forecast", report.summary.len());
            println!("{}", report.completion_line());
        },
        Err(e) => {
            error!("Run failed: {}", e);
            return Err(ForecastRunError(format!("Run failed: {}", e)).into());
        }
    }

    Ok(())
}
