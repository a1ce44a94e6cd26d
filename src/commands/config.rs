use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

use crate::Context;
use crate::cli::ConfigCommand;
use crate::config::RunbookConfig;
use crate::paths;
use crate::ui;

pub fn run(ctx: &Context, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => path(ctx),
        ConfigCommand::Init { path, force } => init(path, force),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let (config, source) = RunbookConfig::load(ctx.config_path.as_deref())?;

    ui::header("Runbook Configuration");
    ui::kv("Source", &source.to_string());
    ui::kv("Config directory", &paths::config_dir()?.display().to_string());
    println!();

    print!("{}", render(&config)?);
    Ok(())
}

/// Resolved settings as they would be used, in config-file syntax.
fn render(config: &RunbookConfig) -> Result<String> {
    toml::to_string_pretty(&config.resolved()).context("Failed to serialize config")
}

fn path(ctx: &Context) -> Result<()> {
    match active_path(ctx)? {
        Some(p) => println!("{}", p.display()),
        None => ui::info("No config file found, using built-in defaults"),
    }
    Ok(())
}

fn active_path(ctx: &Context) -> Result<Option<PathBuf>> {
    let (_, source) = RunbookConfig::load(ctx.config_path.as_deref())?;
    Ok(source.path().map(Path::to_path_buf))
}

fn init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(|| PathBuf::from(paths::LOCAL_CONFIG_FILE));

    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    RunbookConfig::default().save(&path)?;
    ui::success(&format!("Wrote default config to {}", path.display()));
    Ok(())
}
