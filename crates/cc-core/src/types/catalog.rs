//! Model catalog and selection catalog types.
//!
//! A [`ModelCatalog`] is the result of scanning every configured asset-type
//! folder. A [`SelectionCatalog`] is that catalog with the manually curated
//! `selects.json` laid on top of it.

use std::collections::BTreeMap;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mapping from asset-type name to the files found for it.
///
/// File paths are relative to the asset type's configured folder. An asset
/// type whose folder could not be scanned is absent from the catalog, which
/// is different from being present with an empty list.
///
/// # Examples
///
/// ```
/// use cc_core::ModelCatalog;
/// use camino::Utf8PathBuf;
///
/// let mut catalog = ModelCatalog::new();
/// catalog.insert("lora", vec![Utf8PathBuf::from("styles/ink.safetensors")]);
/// assert_eq!(catalog.len(), 1);
/// assert!(catalog.get("checkpoint").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelCatalog {
    entries: BTreeMap<String, Vec<Utf8PathBuf>>,
}

impl ModelCatalog {
    /// Creates an empty catalog.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the files found for an asset type.
    pub fn insert(&mut self, asset_type: impl Into<String>, files: Vec<Utf8PathBuf>) {
        self.entries.insert(asset_type.into(), files);
    }

    /// Returns the files found for an asset type.
    #[must_use]
    pub fn get(&self, asset_type: &str) -> Option<&[Utf8PathBuf]> {
        self.entries.get(asset_type).map(Vec::as_slice)
    }

    /// Returns `true` if the asset type was scanned successfully.
    #[must_use]
    pub fn contains(&self, asset_type: &str) -> bool {
        self.entries.contains_key(asset_type)
    }

    /// Iterates over asset-type names.
    pub fn asset_types(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over `(asset_type, files)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Utf8PathBuf])> {
        self.entries
            .iter()
            .map(|(name, files)| (name.as_str(), files.as_slice()))
    }

    /// Returns the number of asset types in the catalog.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no asset type was loaded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the total number of files across all asset types.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

/// The model catalog with a manual overlay applied.
///
/// Overlay entries replace same-keyed catalog entries as a whole; there is no
/// per-item merge. Keys only present in the overlay are added, keys only
/// present in the catalog are kept.
///
/// # Examples
///
/// ```
/// use cc_core::{ModelCatalog, SelectionCatalog};
/// use serde_json::json;
///
/// let mut catalog = ModelCatalog::new();
/// catalog.insert("checkpoint", vec!["sd15.safetensors".into()]);
///
/// let overlay = json!({ "sampler": ["euler", "dpmpp_2m"] });
/// let selections = SelectionCatalog::merge(catalog, overlay.as_object().cloned().unwrap_or_default());
///
/// assert_eq!(selections.get("checkpoint"), Some(&json!(["sd15.safetensors"])));
/// assert_eq!(selections.get("sampler"), Some(&json!(["euler", "dpmpp_2m"])));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionCatalog {
    entries: BTreeMap<String, Value>,
}

impl SelectionCatalog {
    /// Converts `catalog` into selections and lays `overlay` on top.
    #[must_use]
    pub fn merge(catalog: ModelCatalog, overlay: Map<String, Value>) -> Self {
        let mut selections = Self::from(catalog);
        selections.apply_overlay(overlay);
        selections
    }

    /// Replaces or adds every key of `overlay`.
    pub fn apply_overlay(&mut self, overlay: Map<String, Value>) {
        self.entries.extend(overlay);
    }

    /// Returns the value selected for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Iterates over `(key, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Returns the number of keys.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no selections.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<ModelCatalog> for SelectionCatalog {
    fn from(catalog: ModelCatalog) -> Self {
        let entries = catalog
            .entries
            .into_iter()
            .map(|(name, files)| {
                let files = files
                    .into_iter()
                    .map(|path| Value::String(path.into_string()))
                    .collect();
                (name, Value::Array(files))
            })
            .collect();
        Self { entries }
    }
}
