//! Filesystem scanning for model assets, selections, and workflows.
//!
//! This crate discovers what exists on disk at startup and turns it into the
//! catalog types from `cc-core`.
//!
//! # Overview
//!
//! - [`DirectoryWalker`]: Recursive, extension-filtered traversal of one folder
//! - [`ModelCatalogBuilder`]: Walks every asset type in `model_dirs.json`
//! - [`SelectionMerger`]: Lays `selects.json` over the model catalog
//! - [`WorkflowRegistrar`]: Creates and lists the workflow folder
//!
//! # Example
//!
//! ```ignore
//! use cc_core::{AppPaths, ModelDirConfig};
//! use cc_scanner::{ModelCatalogBuilder, SelectionMerger, WorkflowRegistrar};
//!
//! let paths = AppPaths::from_root(root);
//! ModelDirConfig::ensure_default(&paths.model_dirs, &paths.model_dirs_template)?;
//!
//! let builder = ModelCatalogBuilder::from_file(&paths.model_dirs)?;
//! let selections = SelectionMerger::new(&paths.selects).build_selections(&builder)?;
//! let workflows = WorkflowRegistrar::new(&paths.workflows).ensure_and_list();
//! ```
//!
//! # Architecture
//!
//! ```text
//! SelectionMerger
//!     │
//!     └── ModelCatalogBuilder (one pass per asset type)
//!             │
//!             └── DirectoryWalker
//!                     │
//!                     └── WalkBuilder (ignore crate, filters off)
//!
//! WorkflowRegistrar (single-level listing, independent)
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod catalog;
mod error;
mod selection;
mod walker;
mod workflows;

pub use catalog::{CatalogBuildResult, ModelCatalogBuilder};
pub use error::ScanError;
pub use selection::SelectionMerger;
pub use walker::{DirectoryWalker, walk};
pub use workflows::{WorkflowRegistrar, WorkflowScan};
