//! # Maison CLI Library
//!
//! Terminal front end for the Maison storefront. The binary in `main.rs`
//! only parses arguments and prints; everything else lives here.
//!
//! ## Module Organization
//! ```text
//! maison_cli/
//! ├── lib.rs          ◄─── You are here (startup, logging)
//! ├── cli.rs          ◄─── Command line grammar (clap)
//! ├── config.rs       ◄─── AppConfig: file, env, flags
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart line mutation
//! │   └── wishlist.rs ◄─── Wishlist
//! ├── commands/
//! │   ├── mod.rs      ◄─── Session + dispatch
//! │   ├── shop.rs     ◄─── Catalog listing, featured
//! │   ├── product.rs  ◄─── Product detail
//! │   ├── cart.rs     ◄─── Cart commands
//! │   ├── wishlist.rs ◄─── Wishlist commands
//! │   └── config.rs   ◄─── Effective config
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use maison_core::Catalog;
use maison_store::{load_catalog_file, sample_catalog, LocalStore};

use cli::Cli;
use commands::Session;
use config::AppConfig;
use error::AppResult;

/// Runs one command and returns its output.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Startup                                   │
/// │                                                                         │
/// │  1. Resolve Configuration ────────────────────────────────────────────► │
/// │     • defaults → maison.toml → MAISON_* env → flags                     │
/// │     • validated before anything else runs                               │
/// │                                                                         │
/// │  2. Load Catalog ─────────────────────────────────────────────────────► │
/// │     • --catalog / [paths].catalog, or the built-in sample catalog       │
/// │     • every record validated                                            │
/// │                                                                         │
/// │  3. Open Local Store ─────────────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/maison/cart.json, wishlist.json             │
/// │     • macOS: ~/Library/Application Support/com.maison.storefront/       │
/// │                                                                         │
/// │  4. Dispatch ─────────────────────────────────────────────────────────► │
/// │     • one mutation, one write                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> AppResult<String> {
    let config = resolve_config(&cli)?;
    let catalog = load_catalog(&config)?;

    let data_dir = config.data_dir()?;
    debug!(?data_dir, "Opening local store");
    let store = LocalStore::open(&data_dir)?;

    let session = Session::new(config, catalog, store);
    commands::dispatch(&session, cli.command)
}

/// Loads configuration and applies command line overrides.
pub fn resolve_config(cli: &Cli) -> AppResult<AppConfig> {
    let mut config = AppConfig::load(cli.config.clone())?;

    if let Some(dir) = &cli.data_dir {
        config.paths.data_dir = Some(dir.clone());
    }
    if let Some(catalog) = &cli.catalog {
        config.paths.catalog = Some(catalog.clone());
    }

    config.validate()?;
    Ok(config)
}

/// Loads the configured catalog, falling back to the built-in sample.
pub fn load_catalog(config: &AppConfig) -> AppResult<Catalog> {
    let catalog = match &config.paths.catalog {
        Some(path) => load_catalog_file(path)?,
        None => sample_catalog()?,
    };
    info!(products = catalog.len(), "Catalog ready");
    Ok(catalog)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=maison_store=trace` - Trace the store only
/// - Default: warnings, plus info from maison crates (debug with `-v`)
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "warn,maison=debug"
    } else {
        "warn,maison=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("maison").chain(args.iter().copied()))
    }

    #[test]
    fn test_run_end_to_end_with_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("maison.toml");
        std::fs::write(&config_path, "[store]\nname = \"Test Store\"\n").unwrap();
        let data = dir.path().join("state");
        let data = data.to_str().unwrap();
        let config = config_path.to_str().unwrap();

        let out = run(cli(&[
            "--config", config, "--data-dir", data,
            "cart", "add", "silk-scarf", "--size", "one size", "--quantity", "2",
        ]))
        .unwrap();
        assert!(out.contains("Line quantity: 2"));

        let out = run(cli(&["--config", config, "--data-dir", data, "cart", "show"])).unwrap();
        assert!(out.starts_with("Your cart: 1 line, 2 items"));

        let out = run(cli(&["--config", config, "--data-dir", data, "featured"])).unwrap();
        assert!(out.starts_with("Featured at Test Store"));

        assert!(dir.path().join("state").join("cart.json").exists());
    }

    #[test]
    fn test_flags_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("maison.toml");
        std::fs::write(&config_path, "[paths]\ndata_dir = \"/from/file\"\n").unwrap();

        let resolved = resolve_config(&cli(&[
            "--config",
            config_path.to_str().unwrap(),
            "--data-dir",
            "/from/flag",
            "config",
        ]))
        .unwrap();
        assert_eq!(resolved.paths.data_dir.unwrap().to_str(), Some("/from/flag"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("maison.toml");
        std::fs::write(&config_path, "[pricing]\ntax_rate_bps = 12000\n").unwrap();

        let err = resolve_config(&cli(&["--config", config_path.to_str().unwrap(), "config"]))
            .unwrap_err();
        assert_eq!(err.code, error::ErrorCode::ConfigError);
    }

    #[test]
    fn test_catalog_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, maison_store::catalog::SAMPLE_CATALOG).unwrap();

        let mut config = AppConfig::default();
        config.paths.catalog = Some(path);
        assert_eq!(load_catalog(&config).unwrap().len(), 20);

        config.paths.catalog = Some(dir.path().join("missing.json"));
        assert_eq!(
            load_catalog(&config).unwrap_err().code,
            error::ErrorCode::StorageError
        );
    }
}
