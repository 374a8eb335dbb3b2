use std::fs;
use std::path::{Path, PathBuf};
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Api {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for Api {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Files {
    pub output_dir: String,
    pub d2: String,
    pub eu: String,
    pub summary: Option<String>,
}

impl Default for Files {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            d2: "forecast_d2.json".to_string(),
            eu: "forecast_eu.json".to_string(),
            summary: None,
        }
    }
}

impl Files {
    /// Full path of the ICON-D2 output file
    pub fn d2_path(&self) -> PathBuf {
        self.output_path(&self.d2)
    }

    /// Full path of the ICON-EU output file
    pub fn eu_path(&self) -> PathBuf {
        self.output_path(&self.eu)
    }

    /// Full path of the daily summary file, if one is configured
    pub fn summary_path(&self) -> Option<PathBuf> {
        self.summary.as_ref().map(|s| self.output_path(s))
    }

    /// Places a file name in the output directory; the current directory gives the bare name
    ///
    /// # Arguments
    ///
    /// * 'name' - the file name
    fn output_path(&self, name: &str) -> PathBuf {
        match self.output_dir.as_str() {
            "" | "." => PathBuf::from(name),
            dir => Path::new(dir).join(name),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    pub log_path: Option<String>,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LevelFilter::Info,
            log_to_stdout: true,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub general: General,
    pub api: Api,
    pub files: Files,
}

/// Loads the configuration file and returns a struct with all configuration items.
/// Without a path the built-in defaults are returned.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: Option<&str>) -> Result<Config, LoadConfigurationError> {
    let Some(config_path) = config_path else {
        return Ok(Config::default());
    };

    let toml = fs::read_to_string(config_path)
        .map_err(|e| LoadConfigurationError::Read(format!("{}: {}", config_path, e)))?;
    let config: Config = toml::from_str(&toml)
        .map_err(|e| LoadConfigurationError::Parse(format!("{}: {}", config_path, e)))?;

    Ok(config)
}

/// Error depicting errors that occur while loading the configuration
///
#[derive(Debug, Error)]
pub enum LoadConfigurationError {
    #[error("ReadError: {0}")]
    Read(String),
    #[error("ParseError: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_config_file() {
        let config = load_config(None).unwrap();

        assert_eq!(config.api.base_url, "https://api.open-meteo.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.files.d2_path(), PathBuf::from("forecast_d2.json"));
        assert_eq!(config.files.eu_path(), PathBuf::from("forecast_eu.json"));
        assert!(config.files.summary_path().is_none());
        assert_eq!(config.general.log_level, LevelFilter::Info);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[general]\nlog_level = \"debug\"\nlog_to_stdout = false\n\n[files]\noutput_dir = \"out\"\nsummary = \"daily.json\"").unwrap();

        let config = load_config(file.path().to_str()).unwrap();

        assert_eq!(config.general.log_level, LevelFilter::Debug);
        assert!(!config.general.log_to_stdout);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.files.d2_path(), Path::new("out").join("forecast_d2.json"));
        assert_eq!(config.files.summary_path(), Some(Path::new("out").join("daily.json")));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = load_config(Some("/nonexistent/forecast.toml")).unwrap_err();
        assert!(matches!(err, LoadConfigurationError::Read(_)));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\ntimeout_secs = \"thirty\"").unwrap();

        let err = load_config(file.path().to_str()).unwrap_err();
        assert!(matches!(err, LoadConfigurationError::Parse(_)));
    }
}
