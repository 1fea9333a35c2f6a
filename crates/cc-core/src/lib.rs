//! Core types, errors, and configuration for comfy-catalog.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`ConfigError`] for configuration loading failures
//! - [`AppConfig`] and [`AppPaths`] for general settings and file layout
//! - [`ModelDirConfig`] for the user-editable directory mapping
//! - Domain types ([`ModelCatalog`], [`SelectionCatalog`],
//!   [`WorkflowRegistry`], [`HealthStatus`])

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod model_dirs;
pub mod types;

pub use config::{AppConfig, AppPaths, DEFAULT_COMFYUI_URL, DEFAULT_PORT, load_json_file};
pub use error::ConfigError;
pub use model_dirs::{
    AssetTypeConfig, Bootstrap, CHECKPOINT_ASSET_TYPE, ExtensionSet, ModelDirConfig,
    UNCONFIGURED_CHECKPOINT_PATH,
};
pub use types::{
    CONNECTION_REFUSED_MESSAGE, HealthStatus, ModelCatalog, ProbeErrorKind, RUNNING_MESSAGE,
    SelectionCatalog, UNKNOWN_RESPONSE_MESSAGE, WorkflowRegistry, status_meaning,
};
