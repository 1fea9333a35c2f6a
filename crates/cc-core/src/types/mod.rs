//! Domain types for comfy-catalog.
//!
//! # Module Organization
//!
//! - [`catalog`] - Model catalog and merged selection catalog
//! - [`workflow`] - Registry of workflow definition files
//! - [`health`] - Backend reachability outcome
//!
//! All public types are re-exported here and at the crate root:
//!
//! ```
//! use cc_core::{HealthStatus, ModelCatalog, SelectionCatalog, WorkflowRegistry};
//! ```

mod catalog;
mod health;
mod workflow;

pub use catalog::{ModelCatalog, SelectionCatalog};
pub use health::{
    CONNECTION_REFUSED_MESSAGE, HealthStatus, ProbeErrorKind, RUNNING_MESSAGE,
    UNKNOWN_RESPONSE_MESSAGE, status_meaning,
};
pub use workflow::WorkflowRegistry;
