//! Path resolution for runbook
//!
//! # Environment Variables
//!
//! - `RUNBOOK_CONFIG_DIR` - Override the user config directory
//!
//! # Config File Search
//!
//! 1. `./runbook.toml` (next to the playbook, like a task file)
//! 2. `config_dir()/config.toml`
//!
//! For config_dir():
//! 1. `RUNBOOK_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/runbook` (if set)
//! 3. Platform default:
//!    - Windows: `%APPDATA%\runbook`
//!    - macOS/Linux: `~/.config/runbook`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "RUNBOOK_CONFIG_DIR";

/// Name of the project-local config file
pub const LOCAL_CONFIG_FILE: &str = "runbook.toml";

/// Name of the config file inside the config directory
pub const USER_CONFIG_FILE: &str = "config.toml";

/// Get the runbook config directory path
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!(
            "Using config dir from {}: {}",
            ENV_CONFIG_DIR,
            path.display()
        );
        return Ok(path);
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join("runbook");
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    #[cfg(windows)]
    {
        if let Some(app_data) = dirs::config_dir() {
            return Ok(app_data.join("runbook"));
        }
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("runbook"))
}

/// Candidate config files in search order, relative to `cwd`.
pub fn config_candidates(cwd: &Path) -> Result<Vec<PathBuf>> {
    Ok(vec![
        cwd.join(LOCAL_CONFIG_FILE),
        config_dir()?.join(USER_CONFIG_FILE),
    ])
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    PathBuf::from(expand_str(path))
}

/// Same as [`expand`], for values that stay strings (command arguments).
///
/// If a variable is unset, `~` is still expanded and every `$VAR` is kept
/// literally.
pub fn expand_str(value: &str) -> String {
    match shellexpand::full(value) {
        Ok(expanded) => expanded.into_owned(),
        Err(e) => {
            log::warn!("{e} while expanding {value:?}; expanding ~ only");
            shellexpand::tilde(value).into_owned()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    /// Helper to run a test with temporary env var
    ///
    /// # Safety
    /// This function uses unsafe env::set_var/remove_var which can cause issues
    /// if other threads read environment variables concurrently.
    /// Only use in single-threaded test contexts.
    fn with_env_var<F, R>(key: &str, value: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();
        // SAFETY: Tests run in isolation and don't read env vars concurrently
        unsafe { env::set_var(key, value) };
        let result = f();
        match original {
            // SAFETY: Tests run in isolation
            Some(v) => unsafe { env::set_var(key, v) },
            None => unsafe { env::remove_var(key) },
        }
        result
    }

    // Single test so parallel threads never race on ENV_CONFIG_DIR.
    #[test]
    fn test_config_dir_env_override_and_candidates() {
        with_env_var(ENV_CONFIG_DIR, "/etc/runbook-test", || {
            assert_eq!(config_dir().unwrap(), PathBuf::from("/etc/runbook-test"));

            let candidates = config_candidates(Path::new("/srv/deploy")).unwrap();
            assert_eq!(
                candidates,
                vec![
                    PathBuf::from("/srv/deploy/runbook.toml"),
                    PathBuf::from("/etc/runbook-test/config.toml"),
                ]
            );
        });
    }

    #[test]
    fn test_expand_with_tilde() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand("~/.ssh/id_rsa"), home.join(".ssh").join("id_rsa"));
    }

    #[test]
    fn test_expand_absolute() {
        assert_eq!(expand("/absolute/path"), PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_expand_with_env_var() {
        with_env_var("RUNBOOK_TEST_KEY_DIR", "/keys", || {
            assert_eq!(expand_str("$RUNBOOK_TEST_KEY_DIR/deploy"), "/keys/deploy");
        });
    }

    #[test]
    fn test_expand_tilde_survives_unknown_env_var() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(
            expand("~/.ssh/$RUNBOOK_UNSET_VAR_91/id_rsa"),
            home.join(".ssh").join("$RUNBOOK_UNSET_VAR_91").join("id_rsa")
        );
    }

    #[test]
    fn test_expand_unknown_env_var_unchanged() {
        assert_eq!(
            expand_str("/path/$NONEXISTENT_VAR_12345/file"),
            "/path/$NONEXISTENT_VAR_12345/file"
        );
    }
}
