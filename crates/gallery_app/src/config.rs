use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use gallery_engine::{FetchSettings, SessionSettings, DEFAULT_API_BASE};
use gallery_logging::{gallery_info, gallery_warn};
use serde::Deserialize;

pub const CONFIG_FILENAME: &str = "gallery.ron";

/// User settings read from `gallery.ron`; every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base: String,
    pub page_size: u32,
    pub scan_page_size: u32,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        let session = SessionSettings::default();
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: session.page_size,
            scan_page_size: session.scan_page_size,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            request_timeout_secs: fetch.request_timeout.as_secs(),
            log_to_file: true,
        }
    }
}

impl AppConfig {
    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            api_base: self.api_base.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..FetchSettings::default()
        }
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            page_size: self.page_size.max(1),
            scan_page_size: self.scan_page_size.max(1),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
}

/// Read the config file. A missing file is `Ok(None)`.
pub fn read_config(path: &Path) -> Result<Option<AppConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Where the effective config came from.
#[derive(Debug)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
    /// The file exists but could not be used.
    Fallback(ConfigError),
}

impl ConfigSource {
    /// Report the source; call once the logger is installed.
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => gallery_info!("Loaded config from {:?}", path),
            ConfigSource::Defaults => gallery_info!("No config file; using defaults"),
            ConfigSource::Fallback(err) => gallery_warn!("{}; using defaults", err),
        }
    }
}

/// Like [`read_config`], falling back to defaults on any problem.
///
/// Nothing is logged here because logging is configured from the result.
pub fn load_config(path: &Path) -> (AppConfig, ConfigSource) {
    match read_config(path) {
        Ok(Some(config)) => (config, ConfigSource::File(path.to_path_buf())),
        Ok(None) => (AppConfig::default(), ConfigSource::Defaults),
        Err(err) => (AppConfig::default(), ConfigSource::Fallback(err)),
    }
}
