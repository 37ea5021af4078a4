//! Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{VartaError, VartaResult};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where downloaded clippings are written.
    pub output_dir: PathBuf,

    /// Capture and download settings.
    #[serde(default)]
    pub export: ExportDefaults,

    /// Crop tool geometry.
    #[serde(default)]
    pub crop: CropDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Capture and download parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDefaults {
    /// Pixel-density multiplier applied to the 600x800 frame.
    pub pixel_ratio: u32,

    /// Fallback colour painted under transparent regions (`#rrggbb`).
    pub background: String,

    /// File name prefix for downloads; a millisecond timestamp is appended.
    pub file_prefix: String,
}

/// Crop tool geometry in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CropDefaults {
    /// Side of the square on-screen preview viewport.
    pub viewport_size: u32,

    /// Side of the square output raster.
    pub output_size: u32,

    /// Distance between the viewport edge and the circular clip.
    pub inset: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "varta=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            export: ExportDefaults::default(),
            crop: CropDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ExportDefaults {
    fn default() -> Self {
        Self {
            pixel_ratio: 4,
            background: "#ffffff".to_string(),
            file_prefix: "KustiVarta-HD".to_string(),
        }
    }
}

impl Default for CropDefaults {
    fn default() -> Self {
        Self {
            viewport_size: 400,
            output_size: 300,
            inset: 10.0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Self::default();
        }
        match Self::read(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Read config from a file that must exist and parse.
    pub fn read(config_path: &Path) -> VartaResult<Self> {
        let content = std::fs::read_to_string(config_path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => VartaError::FileNotFound {
                path: config_path.to_path_buf(),
            },
            _ => VartaError::Io(e),
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| VartaError::config(format!("{}: {e}", config_path.display())))?;
        if config.export.pixel_ratio == 0 {
            return Err(VartaError::config(format!(
                "{}: export.pixel_ratio must be at least 1",
                config_path.display()
            )));
        }
        Ok(config)
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&config_file_path())
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("varta").join("config.json")
}
