//! The user-editable directory-mapping configuration (`model_dirs.json`).
//!
//! Each key names an asset type (`checkpoint`, `lora`, ...) and maps it to a
//! folder and the file extensions accepted inside it:
//!
//! ```json
//! {
//!     "checkpoint": { "folder_path": "/models/checkpoints", "filetypes": [".safetensors", ".ckpt"] },
//!     "lora": { "folder_path": "/models/loras", "filetypes": [".safetensors"] }
//! }
//! ```
//!
//! The file is bootstrapped from a shipped template on first run via
//! [`ModelDirConfig::ensure_default`]. That step is kept apart from
//! [`ModelDirConfig::load`] so reading never mutates the filesystem.

use std::collections::BTreeMap;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::config::load_json_file;
use crate::error::ConfigError;

/// Asset type whose folder doubles as the "configured yet?" marker.
pub const CHECKPOINT_ASSET_TYPE: &str = "checkpoint";

/// Placeholder `folder_path` shipped in the template.
pub const UNCONFIGURED_CHECKPOINT_PATH: &str = "path/to/checkpoints/folder";

/// A normalized set of accepted file extensions.
///
/// Entries are stored lower-cased with a leading dot, without duplicates.
/// Normalization happens on construction, so `"SAFETENSORS"`,
/// `".safetensors"` and `"safetensors"` all end up as `".safetensors"`.
///
/// # Examples
///
/// ```
/// use cc_core::ExtensionSet;
/// use camino::Utf8Path;
///
/// let exts = ExtensionSet::from_iter(["JSON", ".yaml"]);
/// assert!(exts.matches(Utf8Path::new("workflows/a.json")));
/// assert!(exts.matches(Utf8Path::new("b.JSON")));
/// assert!(!exts.matches(Utf8Path::new("c.txt")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExtensionSet(SmallVec<[String; 4]>);

impl ExtensionSet {
    /// Returns `true` if `path` has an extension in this set, ignoring case.
    #[must_use]
    pub fn matches(&self, path: &Utf8Path) -> bool {
        path.extension()
            .is_some_and(|ext| self.matches_extension(ext))
    }

    /// Returns `true` if a bare extension (no dot) is accepted, ignoring case.
    ///
    /// ```
    /// use cc_core::ExtensionSet;
    ///
    /// let exts = ExtensionSet::from_iter([".safetensors"]);
    /// assert!(exts.matches_extension("SafeTensors"));
    /// assert!(!exts.matches_extension(".safetensors"));
    /// ```
    #[must_use]
    pub fn matches_extension(&self, ext: &str) -> bool {
        let ext = ext.to_lowercase();
        self.0
            .iter()
            .any(|accepted| accepted.strip_prefix('.') == Some(ext.as_str()))
    }

    /// Returns `true` if `extension` (with its leading dot) is in the set.
    #[must_use]
    pub fn contains(&self, extension: &str) -> bool {
        normalize_extension(extension).is_some_and(|ext| self.0.contains(&ext))
    }

    /// Iterates over the normalized extensions.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of accepted extensions.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no extension is accepted.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ExtensionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SmallVec::new();
        for ext in iter.into_iter().filter_map(|e| normalize_extension(e.as_ref())) {
            if !set.contains(&ext) {
                set.push(ext);
            }
        }
        Self(set)
    }
}

impl From<Vec<String>> for ExtensionSet {
    fn from(value: Vec<String>) -> Self {
        value.into_iter().collect()
    }
}

impl From<ExtensionSet> for Vec<String> {
    fn from(value: ExtensionSet) -> Self {
        value.0.into_vec()
    }
}

fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('.').unwrap_or(trimmed);
    if bare.is_empty() {
        return None;
    }
    Some(format!(".{}", bare.to_lowercase()))
}

/// Folder and accepted extensions for one asset type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTypeConfig {
    /// Folder scanned for this asset type.
    pub folder_path: Utf8PathBuf,
    /// Extensions accepted inside the folder.
    pub filetypes: ExtensionSet,
}

/// Outcome of [`ModelDirConfig::ensure_default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bootstrap {
    /// The configuration file was already present.
    Existing,
    /// The configuration file was missing and has been copied from the template.
    CreatedFromTemplate,
}

/// Mapping from asset-type name to its [`AssetTypeConfig`].
///
/// Iteration is ordered by asset-type name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelDirConfig {
    asset_types: BTreeMap<String, AssetTypeConfig>,
}

impl ModelDirConfig {
    /// Copies `template` to `target` if `target` does not exist yet.
    ///
    /// The template is copied verbatim; an existing file is never touched.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Bootstrap`] if the copy fails.
    pub fn ensure_default(target: &Utf8Path, template: &Utf8Path) -> Result<Bootstrap, ConfigError> {
        if target.exists() {
            return Ok(Bootstrap::Existing);
        }
        std::fs::copy(template, target).map_err(|source| ConfigError::Bootstrap {
            template: template.to_owned(),
            target: target.to_owned(),
            source,
        })?;
        Ok(Bootstrap::CreatedFromTemplate)
    }

    /// Reads the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file does not exist and
    /// [`ConfigError::Parse`] if it does not match the expected shape.
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        load_json_file(path)
    }

    /// Returns `true` if the user has not set up the configuration yet.
    ///
    /// That is the case when the `checkpoint` entry is missing or still
    /// points at the template's placeholder folder.
    #[must_use]
    pub fn is_unconfigured(&self) -> bool {
        self.asset_types
            .get(CHECKPOINT_ASSET_TYPE)
            .is_none_or(|checkpoint| checkpoint.folder_path == UNCONFIGURED_CHECKPOINT_PATH)
    }

    /// Adds or replaces an asset type.
    pub fn insert(&mut self, name: impl Into<String>, config: AssetTypeConfig) {
        self.asset_types.insert(name.into(), config);
    }

    /// Returns the configuration of one asset type.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AssetTypeConfig> {
        self.asset_types.get(name)
    }

    /// Iterates over `(name, config)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AssetTypeConfig)> {
        self.asset_types.iter().map(|(name, cfg)| (name.as_str(), cfg))
    }

    /// Returns the number of configured asset types.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.asset_types.len()
    }

    /// Returns `true` if no asset type is configured.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asset_types.is_empty()
    }
}
