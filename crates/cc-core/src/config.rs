//! Configuration structures for comfy-catalog.
//!
//! This module provides the general application configuration and the layout
//! of the files the runtime reads at startup:
//!
//! - [`AppConfig`] - Settings read from `config.json` (backend URL, port)
//! - [`AppPaths`] - Locations of every file and folder, derived from one root
//!
//! The directory-mapping file has its own module, see
//! [`ModelDirConfig`](crate::ModelDirConfig).

use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default URL of the ComfyUI backend.
pub const DEFAULT_COMFYUI_URL: &str = "http://127.0.0.1:8188";

/// Default port the front end is served on.
pub const DEFAULT_PORT: u16 = 3000;

/// General application settings, read from `config.json`.
///
/// Unknown keys are ignored so the front end can keep its own settings in the
/// same file.
///
/// # Examples
///
/// ```
/// use cc_core::AppConfig;
///
/// let config = AppConfig::default();
/// assert_eq!(config.comfyui_url, "http://127.0.0.1:8188");
/// assert_eq!(config.port, 3000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL of the ComfyUI backend, used as-is for the health probe.
    pub comfyui_url: String,

    /// Port the front end listens on. Only used for display.
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            comfyui_url: DEFAULT_COMFYUI_URL.to_owned(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// Loads and validates the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file does not exist,
    /// [`ConfigError::Parse`] if it is not valid JSON, and
    /// [`ConfigError::InvalidOption`] if a value fails validation.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        let config: Self = load_json_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks option values that serde cannot check on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] for an empty backend URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.comfyui_url.trim().is_empty() {
            return Err(ConfigError::invalid_option(
                "comfyui_url",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

/// File locations used by the runtime, all relative to one application root.
///
/// # Examples
///
/// ```
/// use cc_core::AppPaths;
/// use camino::Utf8Path;
///
/// let paths = AppPaths::from_root(Utf8Path::new("/srv/app"));
/// assert_eq!(paths.model_dirs, "/srv/app/model_dirs.json");
/// assert_eq!(paths.workflows, "/srv/app/workflows");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// The application root directory.
    pub root: Utf8PathBuf,
    /// General configuration (`config.json`).
    pub config: Utf8PathBuf,
    /// User-editable directory mapping (`model_dirs.json`).
    pub model_dirs: Utf8PathBuf,
    /// Shipped template copied into place on first run.
    pub model_dirs_template: Utf8PathBuf,
    /// Manually curated selection overlay (`selects.json`).
    pub selects: Utf8PathBuf,
    /// Folder holding workflow definitions.
    pub workflows: Utf8PathBuf,
}

impl AppPaths {
    /// Derives every location from the application root.
    #[must_use]
    pub fn from_root(root: &Utf8Path) -> Self {
        Self {
            root: root.to_owned(),
            config: root.join("config.json"),
            model_dirs: root.join("model_dirs.json"),
            model_dirs_template: root.join("model_dirs.example.json"),
            selects: root.join("selects.json"),
            workflows: root.join("workflows"),
        }
    }
}

/// Reads `path` and deserializes it as JSON.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] or [`ConfigError::Read`] if the file
/// cannot be read, and [`ConfigError::Parse`] if deserialization fails.
pub fn load_json_file<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
    serde_json::from_str(&contents).map_err(|e| ConfigError::parse(path, e))
}
