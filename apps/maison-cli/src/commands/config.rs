//! # Config Command
//!
//! Prints the effective configuration after file, environment and flag
//! overrides, in the same TOML shape the config file uses.

use tracing::debug;

use maison_store::KeyValueStore;

use super::Session;
use crate::error::AppResult;

/// Renders the effective configuration.
pub fn show<S: KeyValueStore>(session: &Session<S>) -> AppResult<String> {
    debug!("config command");
    let rendered = session.config.to_toml()?;
    Ok(rendered.trim_end().to_string())
}
