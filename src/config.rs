use ansiblekit::{GalaxySettings, PlaybookSettings};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths;

// ============================================================================
// Config Schema
// ============================================================================

/// Settings for both operations, as read from `runbook.toml`.
///
/// Every field is optional; anything missing falls back to the stock
/// `requirements.yml` / `hosts` / `playbook.yml` layout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunbookConfig {
    /// `install-requirements` settings
    pub galaxy: GalaxySettings,

    /// `playbook-run` settings
    pub playbook: PlaybookSettings,
}

/// Where the active config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config` or `RUNBOOK_CONFIG`
    Explicit(PathBuf),
    /// First existing file in the search path
    Found(PathBuf),
    /// No file; built-in defaults
    Defaults,
}

impl ConfigSource {
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(p) | ConfigSource::Found(p) => Some(p.as_path()),
            ConfigSource::Defaults => None,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(p) => write!(f, "{} (explicit)", p.display()),
            ConfigSource::Found(p) => write!(f, "{}", p.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl RunbookConfig {
    /// Load the config, honouring an explicit path if one was given.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
        }

        let cwd = std::env::current_dir().context("Could not determine current directory")?;
        Self::load_first(&paths::config_candidates(&cwd)?)
    }

    /// Load the first candidate that exists, or defaults if none do.
    pub fn load_first(candidates: &[PathBuf]) -> Result<(Self, ConfigSource)> {
        for path in candidates {
            if path.is_file() {
                log::debug!("Loading config from {}", path.display());
                let config = Self::from_file(path)?;
                return Ok((config, ConfigSource::Found(path.clone())));
            }
            log::trace!("No config at {}", path.display());
        }

        log::debug!("No config file found, using defaults");
        Ok((Self::default(), ConfigSource::Defaults))
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Invalid TOML format in {}", path.display()))
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Could not write config file: {}", path.display()))
    }

    /// Copy with `~` and `$VAR` expanded in every program and path field.
    pub fn resolved(&self) -> Self {
        let mut config = self.clone();

        let galaxy = &mut config.galaxy;
        for field in [&mut galaxy.program, &mut galaxy.requirements] {
            *field = paths::expand_str(field);
        }

        let playbook = &mut config.playbook;
        for field in [
            &mut playbook.program,
            &mut playbook.inventory,
            &mut playbook.playbook,
            &mut playbook.private_key,
        ] {
            *field = paths::expand_str(field);
        }

        config
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let candidates = vec![dir.path().join("runbook.toml"), dir.path().join("config.toml")];

        let (config, source) = RunbookConfig::load_first(&candidates).unwrap();

        assert_eq!(config, RunbookConfig::default());
        assert_eq!(source, ConfigSource::Defaults);
        assert!(source.path().is_none());
    }

    #[test]
    fn test_partial_config_fills_in_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("runbook.toml");
        fs::write(
            &path,
            r#"
[playbook]
inventory = "inventories/staging"
diff = false
"#,
        )
        .unwrap();

        let config = RunbookConfig::from_file(&path).unwrap();

        assert_eq!(config.playbook.inventory, "inventories/staging");
        assert!(!config.playbook.diff);
        assert_eq!(config.playbook.playbook, "playbook.yml");
        assert_eq!(config.playbook.security_tag, "security");
        assert_eq!(config.galaxy, GalaxySettings::default());
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = TempDir::new().unwrap();
        let local = dir.path().join("runbook.toml");
        let user = dir.path().join("config.toml");
        fs::write(&user, "[galaxy]\nrequirements = \"user.yml\"\n").unwrap();

        let (config, source) = RunbookConfig::load_first(&[local.clone(), user.clone()]).unwrap();
        assert_eq!(config.galaxy.requirements, "user.yml");
        assert_eq!(source, ConfigSource::Found(user.clone()));

        fs::write(&local, "[galaxy]\nrequirements = \"local.yml\"\n").unwrap();
        let (config, source) = RunbookConfig::load_first(&[local.clone(), user]).unwrap();
        assert_eq!(config.galaxy.requirements, "local.yml");
        assert_eq!(source, ConfigSource::Found(local));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = RunbookConfig::load(Some(missing.as_path())).unwrap_err();
        assert!(err.to_string().contains("Could not read config file"));
    }

    #[test]
    fn test_explicit_file_is_used() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ops.toml");
        fs::write(&path, "[playbook]\nplaybook = \"site.yml\"\n").unwrap();

        let (config, source) = RunbookConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.playbook.playbook, "site.yml");
        assert_eq!(source, ConfigSource::Explicit(path));
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("runbook.toml");
        fs::write(&path, "[playbook\n").unwrap();

        let err = RunbookConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_save_then_load_keeps_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("runbook.toml");

        let mut config = RunbookConfig::default();
        config.playbook.security_tag = "hardening".to_string();
        config.save(&path).unwrap();

        assert_eq!(RunbookConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_resolved_expands_private_key() {
        let home = dirs::home_dir().unwrap();
        let config = RunbookConfig::default().resolved();

        assert_eq!(
            PathBuf::from(&config.playbook.private_key),
            home.join(".ssh").join("id_rsa")
        );
        assert_eq!(config.playbook.inventory, "hosts");
        assert_eq!(config.galaxy.program, "ansible-galaxy");
    }

    #[test]
    fn test_resolved_expands_tilde_next_to_unset_var() {
        let home = dirs::home_dir().unwrap();
        let mut config = RunbookConfig::default();
        config.playbook.inventory = "~/inventories/$RUNBOOK_UNSET_ENV_42".to_string();

        let resolved = config.resolved();

        assert_eq!(
            PathBuf::from(&resolved.playbook.inventory),
            home.join("inventories").join("$RUNBOOK_UNSET_ENV_42")
        );
    }
}
