//! Selection catalog merger.
//!
//! [`SelectionMerger`] reads the manually curated `selects.json` and lays it
//! over a freshly built [`ModelCatalog`]. The manual file is mandatory: if it
//! is missing or is not a JSON object the merge fails, there is no fallback.

use camino::{Utf8Path, Utf8PathBuf};
use cc_core::{ModelCatalog, SelectionCatalog, load_json_file};
use serde_json::{Map, Value};
use tracing::debug;

use crate::catalog::ModelCatalogBuilder;
use crate::error::ScanError;

/// Merges the manual selection file over the model catalog.
#[derive(Debug, Clone)]
pub struct SelectionMerger {
    /// Path to the manual selection file.
    selects_path: Utf8PathBuf,
}

impl SelectionMerger {
    /// Creates a merger for the selection file at `selects_path`.
    #[must_use]
    pub fn new(selects_path: &Utf8Path) -> Self {
        Self {
            selects_path: selects_path.to_owned(),
        }
    }

    /// Reads the manual overlay.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Selection`] if the file is missing or not valid
    /// JSON, and [`ScanError::SelectionNotObject`] if it is valid JSON but
    /// not an object.
    pub fn load_overlay(&self) -> Result<Map<String, Value>, ScanError> {
        match load_json_file::<Value>(&self.selects_path)? {
            Value::Object(map) => Ok(map),
            _ => Err(ScanError::SelectionNotObject(self.selects_path.clone())),
        }
    }

    /// Lays the manual overlay over an already built catalog.
    ///
    /// # Errors
    ///
    /// See [`SelectionMerger::load_overlay`].
    pub fn merge(&self, catalog: ModelCatalog) -> Result<SelectionCatalog, ScanError> {
        let overlay = self.load_overlay()?;
        debug!(
            path = %self.selects_path,
            keys = overlay.len(),
            "Applying manual selections"
        );
        Ok(SelectionCatalog::merge(catalog, overlay))
    }

    /// Loads the overlay, builds the model catalog, and merges them.
    ///
    /// The overlay is read first so a broken selection file fails before
    /// any folder is scanned.
    ///
    /// # Errors
    ///
    /// See [`SelectionMerger::load_overlay`].
    pub fn build_selections(
        &self,
        builder: &ModelCatalogBuilder,
    ) -> Result<SelectionCatalog, ScanError> {
        let overlay = self.load_overlay()?;
        let catalog = builder.build();
        Ok(SelectionCatalog::merge(catalog, overlay))
    }
}
