use std::fs;
use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::Serialize;
use thiserror::Error;
use crate::config::Files;
use crate::initialization::Mgr;
use crate::manager_open_meteo::OpenMeteo;
use crate::models::{Coordinates, DailySummary};
use crate::summary::summarize;

/// Outcome of a successful run
pub struct RunReport {
    pub d2_path: PathBuf,
    pub eu_path: PathBuf,
    pub summary: Vec<DailySummary>,
}

impl RunReport {
    /// The line printed on stdout when a run completes
    pub fn completion_line(&self) -> String {
        format!("Data saved to {} and {}", self.d2_path.display(), self.eu_path.display())
    }
}

/// Fetches the ICON-D2 forecast and the ICON-EU forecast that follows it, and saves both to file
///
/// # Arguments
///
/// * 'mgr' - struct with configured managers
/// * 'files' - files config
/// * 'run_time' - a run start date and time to be used instead of Utc now
pub fn run(mgr: &Mgr, files: &Files, run_time: Option<DateTime<Utc>>) -> Result<RunReport, WorkerError> {
    let now = run_time.unwrap_or_else(Utc::now);
    let coords = Coordinates::home();
    info!("Run start: {}, location: {}, {}", now, coords.latitude, coords.longitude);

    let d2 = mgr.open_meteo.fetch_icon_d2(&coords, now)
        .map_err(|e| WorkerError::ShortRangeError(e.to_string()))?;

    let end_iso = OpenMeteo::last_timestamp(&d2)
        .map_err(|e| WorkerError::ShortRangeError(e.to_string()))?;
    info!("Short range forecast ends at {}", end_iso);

    let eu = mgr.open_meteo.fetch_icon_eu(&coords, &end_iso)
        .map_err(|e| WorkerError::FollowOnError(e.to_string()))?;

    let d2_path = files.d2_path();
    let eu_path = files.eu_path();
    save_json(&d2_path, &d2)?;
    save_json(&eu_path, &eu)?;

    // Summary failures are not fatal
    let summary = match summarize(&d2, &eu) {
        Ok(summary) => summary,
        Err(e) => {
            warn!("Could not summarize forecast: {}", e);
            Vec::new()
        }
    };
    for day in summary.iter() {
        info!("{}", day);
    }

    if let Some(path) = files.summary_path() {
        if !summary.is_empty() {
            save_json(&path, &summary)?;
        }
    }

    Ok(RunReport { d2_path, eu_path, summary })
}

/// Saves anything serializable as indented JSON, creating the parent directory if needed
///
/// # Arguments
///
/// * 'path' - the file to write
/// * 'data' - what to write
fn save_json<T: Serialize + ?Sized>(path: &Path, data: &T) -> Result<(), WorkerError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| WorkerError::SaveError(format!("error creating directory {}: {}", dir.display(), e)))?;
    }

    let json = serde_json::to_string_pretty(data)
        .map_err(|e| WorkerError::SaveError(format!("error serializing {}: {}", path.display(), e)))?;

    fs::write(path, json)
        .map_err(|e| WorkerError::SaveError(format!("error writing {}: {}", path.display(), e)))?;

    info!("Forecast data saved to {}", path.display());

    Ok(())
}

/// Error depicting errors that occur during a forecast run
///
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("error while fetching short range forecast: {0}")]
    ShortRangeError(String),
    #[error("error while fetching follow on forecast: {0}")]
    FollowOnError(String),
    #[error("error while saving forecast: {0}")]
    SaveError(String),
}
