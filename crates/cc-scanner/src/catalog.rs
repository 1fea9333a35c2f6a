//! Model catalog builder.
//!
//! This module provides [`ModelCatalogBuilder`], which walks the folder of
//! every asset type in a [`ModelDirConfig`] and assembles a [`ModelCatalog`].
//!
//! One broken folder never fails the whole build: a missing folder is logged
//! as a warning, any other failure as an error, and the asset type is left
//! out of the catalog.
//!
//! # Usage
//!
//! ```ignore
//! use cc_core::{AppPaths, ModelDirConfig};
//! use cc_scanner::ModelCatalogBuilder;
//!
//! let paths = AppPaths::from_root(root);
//! ModelDirConfig::ensure_default(&paths.model_dirs, &paths.model_dirs_template)?;
//!
//! let catalog = ModelCatalogBuilder::from_file(&paths.model_dirs)?.build();
//! for (asset_type, files) in catalog.iter() {
//!     println!("{asset_type}: {} files", files.len());
//! }
//! ```

use camino::Utf8Path;
use cc_core::{ConfigError, ModelCatalog, ModelDirConfig};
use tracing::{debug, error, info, warn};

use crate::error::ScanError;
use crate::walker::walk;

/// Builds a [`ModelCatalog`] from a directory-mapping configuration.
#[derive(Debug, Clone)]
pub struct ModelCatalogBuilder {
    /// The directory mapping to scan.
    config: ModelDirConfig,
}

impl ModelCatalogBuilder {
    /// Creates a builder for an already-loaded configuration.
    #[must_use]
    pub fn new(config: ModelDirConfig) -> Self {
        Self { config }
    }

    /// Creates a builder from the configuration file at `path`.
    ///
    /// This only reads the file. Run
    /// [`ModelDirConfig::ensure_default`] first to bootstrap it.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file is missing or malformed.
    pub fn from_file(path: &Utf8Path) -> Result<Self, ConfigError> {
        Ok(Self::new(ModelDirConfig::load(path)?))
    }

    /// Returns the configuration being scanned.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ModelDirConfig {
        &self.config
    }

    /// Scans every configured asset type and returns the catalog.
    ///
    /// Asset types that could not be scanned are absent from the result.
    #[must_use]
    pub fn build(&self) -> ModelCatalog {
        self.build_detailed().catalog
    }

    /// Scans every configured asset type and reports what was skipped.
    #[must_use]
    pub fn build_detailed(&self) -> CatalogBuildResult {
        if self.config.is_unconfigured() {
            warn!(
                "model_dirs.json not configured, you will be unable to select models until it is set"
            );
            return CatalogBuildResult {
                catalog: ModelCatalog::new(),
                unconfigured: true,
                skipped: Vec::new(),
            };
        }

        let mut catalog = ModelCatalog::new();
        let mut skipped = Vec::new();

        for (asset_type, asset) in self.config.iter() {
            match walk(&asset.folder_path, &asset.filetypes) {
                Ok(files) => {
                    debug!(
                        asset_type,
                        folder = %asset.folder_path,
                        count = files.len(),
                        "Scanned asset folder"
                    );
                    catalog.insert(asset_type, files);
                }
                Err(err) if err.is_not_found() => {
                    warn!(
                        asset_type,
                        folder = %asset.folder_path,
                        "Invalid directory for {asset_type} in model_dirs.json"
                    );
                    skipped.push((asset_type.to_owned(), err));
                }
                Err(err) => {
                    error!(
                        asset_type,
                        folder = %asset.folder_path,
                        error = %err,
                        "Error when reading asset folder from model_dirs.json"
                    );
                    skipped.push((asset_type.to_owned(), err));
                }
            }
        }

        info!(count = catalog.len(), "Loaded {} model types", catalog.len());

        CatalogBuildResult {
            catalog,
            unconfigured: false,
            skipped,
        }
    }
}

/// Result of building a model catalog.
#[derive(Debug)]
pub struct CatalogBuildResult {
    /// The built catalog.
    pub catalog: ModelCatalog,

    /// `true` if the configuration still holds the template placeholder.
    pub unconfigured: bool,

    /// Asset types that were left out, with the reason (non-fatal).
    pub skipped: Vec<(String, ScanError)>,
}

impl CatalogBuildResult {
    /// Returns `true` if any asset type was skipped.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Returns the names of skipped asset types.
    pub fn skipped_asset_types(&self) -> impl Iterator<Item = &str> {
        self.skipped.iter().map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use cc_core::{
        AssetTypeConfig, CHECKPOINT_ASSET_TYPE, ExtensionSet, UNCONFIGURED_CHECKPOINT_PATH,
    };
    use std::fs;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_owned()).expect("Invalid path");
        (dir, root)
    }

    fn touch(path: &Utf8Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent");
        }
        fs::write(path, b"").expect("Failed to write file");
    }

    fn asset(folder: &Utf8Path, exts: &[&str]) -> AssetTypeConfig {
        AssetTypeConfig {
            folder_path: folder.to_owned(),
            filetypes: exts.iter().collect(),
        }
    }

    #[test]
    fn test_build_scans_every_asset_type() {
        let (_dir, root) = temp_root();
        touch(&root.join("checkpoints/sd15.safetensors"));
        touch(&root.join("checkpoints/xl/base.ckpt"));
        touch(&root.join("loras/ink.safetensors"));
        touch(&root.join("loras/notes.txt"));

        let mut config = ModelDirConfig::default();
        config.insert(
            CHECKPOINT_ASSET_TYPE,
            asset(&root.join("checkpoints"), &[".safetensors", ".ckpt"]),
        );
        config.insert("lora", asset(&root.join("loras"), &[".safetensors"]));

        let catalog = ModelCatalogBuilder::new(config).build();

        assert_eq!(catalog.len(), 2);
        let mut checkpoints: Vec<&str> = catalog
            .get(CHECKPOINT_ASSET_TYPE)
            .expect("checkpoints scanned")
            .iter()
            .map(|p| p.as_str())
            .collect();
        checkpoints.sort_unstable();
        assert_eq!(checkpoints, vec!["sd15.safetensors", "xl/base.ckpt"]);
        assert_eq!(
            catalog.get("lora"),
            Some(&[Utf8PathBuf::from("ink.safetensors")][..])
        );
    }

    #[test]
    fn test_missing_folder_skips_only_that_type() {
        let (_dir, root) = temp_root();
        touch(&root.join("checkpoints/sd15.safetensors"));

        let mut config = ModelDirConfig::default();
        config.insert(
            CHECKPOINT_ASSET_TYPE,
            asset(&root.join("checkpoints"), &[".safetensors"]),
        );
        config.insert("vae", asset(&root.join("vae"), &[".safetensors"]));

        let result = ModelCatalogBuilder::new(config).build_detailed();

        assert!(!result.unconfigured);
        assert!(result.catalog.contains(CHECKPOINT_ASSET_TYPE));
        assert!(!result.catalog.contains("vae"));
        assert!(result.has_errors());
        assert_eq!(result.skipped_asset_types().collect::<Vec<_>>(), vec!["vae"]);
        assert!(result.skipped[0].1.is_not_found());
    }

    #[test]
    fn test_file_instead_of_folder_is_skipped() {
        let (_dir, root) = temp_root();
        fs::create_dir_all(root.join("checkpoints")).expect("mkdir");
        touch(&root.join("upscale.txt"));

        let mut config = ModelDirConfig::default();
        config.insert(
            CHECKPOINT_ASSET_TYPE,
            asset(&root.join("checkpoints"), &[".safetensors"]),
        );
        config.insert("upscaler", asset(&root.join("upscale.txt"), &[".pth"]));

        let result = ModelCatalogBuilder::new(config).build_detailed();

        assert!(!result.catalog.contains("upscaler"));
        assert!(matches!(
            result.skipped[0].1,
            ScanError::NotADirectory(_)
        ));
    }

    #[test]
    fn test_empty_folder_is_present_with_no_files() {
        let (_dir, root) = temp_root();
        fs::create_dir_all(root.join("checkpoints")).expect("mkdir");

        let mut config = ModelDirConfig::default();
        config.insert(
            CHECKPOINT_ASSET_TYPE,
            asset(&root.join("checkpoints"), &[".safetensors"]),
        );

        let catalog = ModelCatalogBuilder::new(config).build();
        assert_eq!(catalog.get(CHECKPOINT_ASSET_TYPE), Some(&[][..]));
    }

    #[test]
    fn test_unconfigured_returns_empty_catalog() {
        let (_dir, root) = temp_root();
        touch(&root.join("loras/ink.safetensors"));

        let mut config = ModelDirConfig::default();
        config.insert(
            CHECKPOINT_ASSET_TYPE,
            asset(Utf8Path::new(UNCONFIGURED_CHECKPOINT_PATH), &[".safetensors"]),
        );
        config.insert("lora", asset(&root.join("loras"), &[".safetensors"]));

        let result = ModelCatalogBuilder::new(config).build_detailed();
        assert!(result.unconfigured);
        assert!(result.catalog.is_empty());
        assert!(!result.has_errors());
    }

    #[test]
    fn test_at_most_one_key_per_asset_type() {
        let (_dir, root) = temp_root();
        let mut config = ModelDirConfig::default();
        for name in [CHECKPOINT_ASSET_TYPE, "lora", "vae", "embedding"] {
            let folder = root.join(name);
            if name != "vae" {
                fs::create_dir_all(&folder).expect("mkdir");
            }
            config.insert(name, asset(&folder, &[".safetensors"]));
        }

        let catalog = ModelCatalogBuilder::new(config.clone()).build();
        assert!(catalog.len() <= config.len());
        for (name, asset) in config.iter() {
            assert_eq!(catalog.contains(name), asset.folder_path.is_dir());
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subfolder_skips_only_that_type() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, root) = temp_root();
        touch(&root.join("checkpoints/sd15.safetensors"));
        touch(&root.join("loras/ink.safetensors"));
        let locked = root.join("loras/private");
        touch(&locked.join("secret.safetensors"));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).expect("chmod");

        // Privileged users read through mode 000.
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");
            return;
        }

        let mut config = ModelDirConfig::default();
        config.insert(
            CHECKPOINT_ASSET_TYPE,
            asset(&root.join("checkpoints"), &[".safetensors"]),
        );
        config.insert("lora", asset(&root.join("loras"), &[".safetensors"]));

        let result = ModelCatalogBuilder::new(config).build_detailed();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).expect("chmod");

        assert!(result.catalog.contains(CHECKPOINT_ASSET_TYPE));
        assert!(!result.catalog.contains("lora"));
        assert_eq!(result.skipped_asset_types().collect::<Vec<_>>(), vec!["lora"]);
        assert!(matches!(result.skipped[0].1, ScanError::Walk(_)));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_keeps_asset_type() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let (dir, root) = temp_root();
        touch(&root.join("checkpoints/sd15.safetensors"));
        let raw = dir
            .path()
            .join("checkpoints")
            .join(OsStr::from_bytes(b"notes-\xff.txt"));
        fs::write(raw, b"").expect("write");

        let mut config = ModelDirConfig::default();
        config.insert(
            CHECKPOINT_ASSET_TYPE,
            asset(&root.join("checkpoints"), &[".safetensors"]),
        );

        let result = ModelCatalogBuilder::new(config).build_detailed();
        assert!(!result.has_errors());
        assert_eq!(
            result.catalog.get(CHECKPOINT_ASSET_TYPE),
            Some(&[Utf8PathBuf::from("sd15.safetensors")][..])
        );
    }

    #[test]
    fn test_from_file() {
        let (_dir, root) = temp_root();
        fs::create_dir_all(root.join("ckpt")).expect("mkdir");
        touch(&root.join("ckpt/a.SAFETENSORS"));
        let config_path = root.join("model_dirs.json");
        let json = format!(
            r#"{{"checkpoint": {{"folder_path": "{}", "filetypes": [".safetensors"]}}}}"#,
            root.join("ckpt")
        );
        fs::write(&config_path, json).expect("write config");

        let builder = ModelCatalogBuilder::from_file(&config_path).expect("config loads");
        assert_eq!(builder.config().len(), 1);
        assert_eq!(
            builder.build().get(CHECKPOINT_ASSET_TYPE),
            Some(&[Utf8PathBuf::from("a.SAFETENSORS")][..])
        );
    }

    #[test]
    fn test_from_file_missing() {
        let (_dir, root) = temp_root();
        let result = ModelCatalogBuilder::from_file(&root.join("model_dirs.json"));
        assert!(matches!(result, Err(ConfigError::MissingFile(_))));
    }

    #[test]
    fn test_filetypes_from_slice() {
        let exts: ExtensionSet = [".PT"].iter().collect();
        assert!(exts.contains(".pt"));
    }
}
