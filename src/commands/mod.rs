pub mod config;
pub mod install;
pub mod playbook;

use anyhow::Result;
use std::path::Path;

use crate::Context;
use crate::config::RunbookConfig;
use crate::ui;

/// Load the active config with paths expanded.
fn settings(ctx: &Context) -> Result<RunbookConfig> {
    let (config, source) = RunbookConfig::load(ctx.config_path.as_deref())?;
    log::debug!("Using config: {source}");
    Ok(config.resolved())
}

/// Warn about an input file Ansible is about to be pointed at but that is not there.
fn warn_if_missing(what: &str, path: &str) {
    if !Path::new(path).exists() {
        ui::warn(&format!("{what} not found: {path}"));
    }
}
