//! Workflow folder registrar.
//!
//! [`WorkflowRegistrar`] makes sure the workflow folder exists and lists the
//! `.json` files directly inside it. A missing folder is created on the spot,
//! which is the normal first-run path, not an error.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use cc_core::WorkflowRegistry;
use tracing::{error, info, warn};

use crate::error::ScanError;

/// Extension of workflow definition files, without the dot.
const WORKFLOW_EXTENSION: &str = "json";

/// What [`WorkflowRegistrar::scan`] found.
#[derive(Debug)]
pub enum WorkflowScan {
    /// The folder did not exist and has been created empty.
    Created,
    /// The folder existed and was listed.
    Listed(WorkflowRegistry),
}

/// Ensures the workflow folder exists and lists workflow files.
#[derive(Debug, Clone)]
pub struct WorkflowRegistrar {
    /// The workflow folder.
    folder: Utf8PathBuf,
}

impl WorkflowRegistrar {
    /// Creates a registrar for `folder`.
    #[must_use]
    pub fn new(folder: &Utf8Path) -> Self {
        Self {
            folder: folder.to_owned(),
        }
    }

    /// Returns the workflow folder.
    #[inline]
    #[must_use]
    pub fn folder(&self) -> &Utf8Path {
        &self.folder
    }

    /// Creates the folder if needed and lists it, logging the outcome.
    ///
    /// Returns an empty registry for a freshly created folder. Returns
    /// `None` if the folder could not be created or listed; the failure is
    /// logged and not propagated.
    pub fn ensure_and_list(&self) -> Option<WorkflowRegistry> {
        match self.scan() {
            Ok(WorkflowScan::Created) => {
                info!(folder = %self.folder, "Workflow folder not found, creating...");
                Some(WorkflowRegistry::default())
            }
            Ok(WorkflowScan::Listed(registry)) => {
                info!(
                    count = registry.len(),
                    "Found {} workflows in the workflow folder",
                    registry.len()
                );
                Some(registry)
            }
            Err(err) => {
                error!(folder = %self.folder, error = %err, "Error reading workflows folder");
                None
            }
        }
    }

    /// Creates the folder if needed and lists it.
    ///
    /// The folder is created with a single-level `mkdir`; a missing parent
    /// is an error. Entries whose name is not UTF-8 are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Io`] if the folder cannot be created or read, and
    /// [`ScanError::NotADirectory`] if the path is a file.
    pub fn scan(&self) -> Result<WorkflowScan, ScanError> {
        if !self.folder.exists() {
            fs::create_dir(&self.folder).map_err(|e| ScanError::io(&self.folder, e))?;
            return Ok(WorkflowScan::Created);
        }
        if !self.folder.is_dir() {
            return Err(ScanError::NotADirectory(self.folder.clone()));
        }

        let entries = fs::read_dir(&self.folder).map_err(|e| ScanError::io(&self.folder, e))?;

        let mut filenames = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ScanError::io(&self.folder, e))?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    let err = ScanError::NonUtf8Path(self.folder.as_std_path().join(raw));
                    warn!(folder = %self.folder, error = %err, "Skipping workflow entry");
                    continue;
                }
            };
            if is_workflow_file(&self.folder.join(&name)) {
                filenames.push(name);
            }
        }

        Ok(WorkflowScan::Listed(WorkflowRegistry::new(filenames)))
    }
}

/// Returns `true` for a regular file with a `.json` extension, ignoring case.
fn is_workflow_file(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(WORKFLOW_EXTENSION))
        && path.is_file()
}
