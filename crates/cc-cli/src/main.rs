//! CLI entry point for comfy-catalog.
//!
//! This binary runs the startup discovery of the ComfyUI front end: model
//! catalog, manual selections, workflows, backend reachability, and the
//! local network address.
//!
//! # Usage
//!
//! ```bash
//! comfy-catalog [OPTIONS] <COMMAND>
//!
//! # Run every startup step and print a summary
//! comfy-catalog startup --root /srv/comfy-frontend
//!
//! # Print the merged selection catalog as JSON
//! comfy-catalog selects
//!
//! # Check whether ComfyUI answers at a different URL
//! comfy-catalog --comfyui-url http://gpu-box:8188 probe
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

mod context;

use std::io::Write;

use camino::Utf8PathBuf;
use cc_core::{AppConfig, AppPaths, Bootstrap, ConfigError};
use cc_probe::BackendProber;
use cc_scanner::{SelectionMerger, WorkflowRegistrar};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::context::{RuntimeContext, catalog_builder, ensure_model_dirs};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Startup discovery for the ComfyUI front end.
///
/// Scans the configured model folders, merges manual selections, lists
/// workflows, and checks that the ComfyUI backend is reachable.
#[derive(Parser)]
#[command(name = "comfy-catalog", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Application root holding config.json, model_dirs.json, selects.json
    /// and the workflows folder.
    ///
    /// Defaults to the current directory.
    #[arg(short, long, global = true, env = "COMFY_CATALOG_ROOT")]
    root: Option<Utf8PathBuf>,

    /// ComfyUI backend URL (overrides `comfyui_url` in config.json).
    #[arg(long, global = true, env = "COMFY_CATALOG_COMFYUI_URL")]
    comfyui_url: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Run every startup step and print a summary.
    Startup {
        /// Print the runtime context as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },

    /// Create model_dirs.json from the shipped template if it is missing.
    Init,

    /// Scan the configured model folders and print the catalog as JSON.
    Catalog,

    /// Print the model catalog merged with selects.json as JSON.
    Selects,

    /// Create the workflows folder if needed and list workflow files.
    Workflows,

    /// Check whether the ComfyUI backend answers.
    Probe,

    /// Print the local network address of this host.
    Address,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},hyper=warn,hyper_util=warn,reqwest=warn,ignore=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Resolves the application root and derives every file location from it.
fn build_paths(cli: &Cli) -> color_eyre::Result<AppPaths> {
    let root = cli.root.clone().unwrap_or_else(|| Utf8PathBuf::from("."));

    if !root.is_dir() {
        return Err(color_eyre::eyre::eyre!(
            "Application root is not a directory: {}",
            root
        ));
    }

    Ok(AppPaths::from_root(&root))
}

/// Loads config.json and applies CLI overrides.
///
/// A missing file falls back to defaults; a malformed one is an error.
fn build_config(cli: &Cli, paths: &AppPaths) -> color_eyre::Result<AppConfig> {
    let mut config = match AppConfig::load(&paths.config) {
        Ok(config) => config,
        Err(ConfigError::MissingFile(path)) => {
            warn!(path = %path, "config.json not found, using defaults");
            AppConfig::default()
        }
        Err(err) => return Err(err.into()),
    };

    if let Some(url) = &cli.comfyui_url {
        config.comfyui_url.clone_from(url);
    }
    config.validate()?;

    Ok(config)
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Builds the full runtime context and prints it.
async fn run_startup(config: &AppConfig, paths: &AppPaths, json: bool) -> color_eyre::Result<()> {
    info!(root = %paths.root, "Starting up");

    let context = RuntimeContext::initialize(config, paths).await?;

    if json {
        return print_json(&context);
    }

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    writeln!(handle)?;
    writeln!(handle, "Runtime Summary")?;
    writeln!(handle, "===============")?;
    writeln!(handle)?;
    writeln!(handle, "Workflows:        {}", context.workflows.len())?;
    writeln!(handle, "Selection keys:   {}", context.selections.len())?;
    writeln!(handle, "Backend:          {}", context.backend)?;
    writeln!(handle, "Front end URL:    {}", context.frontend_url())?;

    Ok(())
}

/// Bootstraps model_dirs.json and reports what happened.
fn run_init(paths: &AppPaths) -> color_eyre::Result<()> {
    let outcome = ensure_model_dirs(paths)?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match outcome {
        Bootstrap::Existing => writeln!(handle, "{} already exists", paths.model_dirs)?,
        Bootstrap::CreatedFromTemplate => writeln!(
            handle,
            "Created {} from {}",
            paths.model_dirs, paths.model_dirs_template
        )?,
    }

    Ok(())
}

/// Scans the model folders and prints the catalog.
fn run_catalog(paths: &AppPaths) -> color_eyre::Result<()> {
    let catalog = catalog_builder(paths)?.build();
    print_json(&catalog)
}

/// Prints the model catalog merged with selects.json.
fn run_selects(paths: &AppPaths) -> color_eyre::Result<()> {
    let builder = catalog_builder(paths)?;
    let selections = SelectionMerger::new(&paths.selects).build_selections(&builder)?;
    print_json(&selections)
}

/// Lists the workflow folder, creating it if needed.
fn run_workflows(paths: &AppPaths) -> color_eyre::Result<()> {
    let Some(registry) = WorkflowRegistrar::new(&paths.workflows).ensure_and_list() else {
        return Err(color_eyre::eyre::eyre!(
            "Could not read workflows folder: {}",
            paths.workflows
        ));
    };
    print_json(&registry)
}

/// Probes the backend and prints the outcome.
async fn run_probe(config: &AppConfig) -> color_eyre::Result<()> {
    let status = BackendProber::new(config.comfyui_url.as_str()).probe().await;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{status}")?;

    Ok(())
}

/// Prints the local network address.
fn run_address() -> color_eyre::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", cc_probe::resolve())?;

    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Writes `value` to stdout as pretty JSON.
fn print_json<T: Serialize>(value: &T) -> color_eyre::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize JSON: {}", e))?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{json}")?;

    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Resolve file locations
    let paths = build_paths(&cli)?;

    // 5. Route to appropriate command
    match &cli.command {
        Commands::Startup { json } => {
            let config = build_config(&cli, &paths)?;
            run_startup(&config, &paths, *json).await
        }
        Commands::Init => run_init(&paths),
        Commands::Catalog => run_catalog(&paths),
        Commands::Selects => run_selects(&paths),
        Commands::Workflows => run_workflows(&paths),
        Commands::Probe => {
            let config = build_config(&cli, &paths)?;
            run_probe(&config).await
        }
        Commands::Address => run_address(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    fn temp_paths() -> (TempDir, AppPaths) {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_owned()).expect("Invalid path");
        (dir, AppPaths::from_root(&root))
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "comfy-catalog",
            "probe",
            "--comfyui-url",
            "http://gpu-box:8188",
            "--root",
            "/srv/app",
        ])
        .expect("arguments parse");

        assert!(matches!(cli.command, Commands::Probe));
        assert_eq!(cli.comfyui_url.as_deref(), Some("http://gpu-box:8188"));
        assert_eq!(cli.root, Some(Utf8PathBuf::from("/srv/app")));
    }

    #[test]
    fn test_build_config_defaults_when_missing() {
        let (_dir, paths) = temp_paths();
        let cli = Cli::try_parse_from(["comfy-catalog", "probe"]).expect("arguments parse");

        let config = build_config(&cli, &paths).expect("defaults apply");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_build_config_cli_url_overrides_file() {
        let (_dir, paths) = temp_paths();
        fs::write(&paths.config, r#"{"comfyui_url": "http://from-file:8188"}"#)
            .expect("write config.json");
        let cli = Cli::try_parse_from([
            "comfy-catalog",
            "--comfyui-url",
            "http://from-cli:8188",
            "probe",
        ])
        .expect("arguments parse");

        let config = build_config(&cli, &paths).expect("config loads");
        assert_eq!(config.comfyui_url, "http://from-cli:8188");
    }

    #[test]
    fn test_build_config_rejects_malformed_file() {
        let (_dir, paths) = temp_paths();
        fs::write(&paths.config, "{").expect("write config.json");
        let cli = Cli::try_parse_from(["comfy-catalog", "probe"]).expect("arguments parse");

        assert!(build_config(&cli, &paths).is_err());
    }
}
