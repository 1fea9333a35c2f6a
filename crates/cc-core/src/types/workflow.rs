//! Registry of workflow definition files.

use serde::{Deserialize, Serialize};

/// Filenames of the workflow definitions found in the workflow folder.
///
/// Only the file names are kept, not full paths. Order follows the directory
/// listing and carries no meaning.
///
/// # Examples
///
/// ```
/// use cc_core::WorkflowRegistry;
///
/// let registry = WorkflowRegistry::new(vec!["txt2img.json".to_owned()]);
/// assert!(registry.contains("txt2img.json"));
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowRegistry {
    filenames: Vec<String>,
}

impl WorkflowRegistry {
    /// Creates a registry from already-filtered filenames.
    #[inline]
    #[must_use]
    pub fn new(filenames: Vec<String>) -> Self {
        Self { filenames }
    }

    /// Returns `true` if a workflow with this filename was found.
    #[must_use]
    pub fn contains(&self, filename: &str) -> bool {
        self.filenames.iter().any(|f| f == filename)
    }

    /// Iterates over the filenames.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.filenames.iter().map(String::as_str)
    }

    /// Returns the filenames as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.filenames
    }

    /// Returns the number of workflows.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    /// Returns `true` if no workflow was found.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }
}

impl FromIterator<String> for WorkflowRegistry {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
