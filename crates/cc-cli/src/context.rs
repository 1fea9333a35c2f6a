//! Runtime context shared with the rest of the front end.
//!
//! [`RuntimeContext`] is built once at startup and handed out by reference.
//! It holds everything the discovery steps produced; nothing in it changes
//! after construction.

use std::net::Ipv4Addr;

use cc_core::{
    AppConfig, AppPaths, Bootstrap, HealthStatus, ModelDirConfig, SelectionCatalog,
    WorkflowRegistry,
};
use cc_probe::BackendProber;
use cc_scanner::{ModelCatalogBuilder, SelectionMerger, WorkflowRegistrar};
use serde::Serialize;
use tracing::info;

/// State discovered at startup.
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeContext {
    /// Workflow definition filenames.
    pub workflows: WorkflowRegistry,
    /// Model catalog with manual selections applied.
    pub selections: SelectionCatalog,
    /// Outcome of the backend probe.
    pub backend: HealthStatus,
    /// Address other devices can reach this host at.
    pub local_address: Ipv4Addr,
    /// Port the front end is served on.
    pub port: u16,
}

impl RuntimeContext {
    /// Runs every discovery step and collects the results.
    ///
    /// Only configuration bootstrap and selection loading can fail; workflow
    /// listing, the backend probe, and address resolution log their problems
    /// and carry on.
    ///
    /// # Errors
    ///
    /// Returns an error if `model_dirs.json` cannot be bootstrapped or read,
    /// or if `selects.json` is missing or malformed.
    pub async fn initialize(config: &AppConfig, paths: &AppPaths) -> color_eyre::Result<Self> {
        let workflows = WorkflowRegistrar::new(&paths.workflows)
            .ensure_and_list()
            .unwrap_or_default();

        let builder = catalog_builder(paths)?;
        let selections = SelectionMerger::new(&paths.selects).build_selections(&builder)?;

        let backend = BackendProber::new(config.comfyui_url.as_str()).probe().await;
        let local_address = cc_probe::resolve();

        Ok(Self {
            workflows,
            selections,
            backend,
            local_address,
            port: config.port,
        })
    }

    /// Returns the URL the front end can be opened at from the LAN.
    #[must_use]
    pub fn frontend_url(&self) -> String {
        format!("http://{}:{}", self.local_address, self.port)
    }
}

/// Bootstraps `model_dirs.json` if needed and returns a builder for it.
///
/// # Errors
///
/// Returns an error if the template copy fails or the file is malformed.
pub fn catalog_builder(paths: &AppPaths) -> color_eyre::Result<ModelCatalogBuilder> {
    ensure_model_dirs(paths)?;
    Ok(ModelCatalogBuilder::from_file(&paths.model_dirs)?)
}

/// Copies the shipped template into place if `model_dirs.json` is missing.
///
/// # Errors
///
/// Returns an error if the template cannot be copied.
pub fn ensure_model_dirs(paths: &AppPaths) -> color_eyre::Result<Bootstrap> {
    let outcome = ModelDirConfig::ensure_default(&paths.model_dirs, &paths.model_dirs_template)?;
    if outcome == Bootstrap::CreatedFromTemplate {
        info!(
            path = %paths.model_dirs,
            template = %paths.model_dirs_template,
            "model_dirs.json not found, created it from the template"
        );
    }
    Ok(outcome)
}
