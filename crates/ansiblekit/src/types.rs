//! Core types for Ansible invocations.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Invocation
// ============================================================================

/// A fully assembled command line: a program and its arguments.
///
/// Invocations are executed directly (no shell), so arguments never need
/// escaping. [`fmt::Display`] renders a shell-like string for logs and
/// `--dry-run` output, quoting only the arguments that would otherwise be
/// ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Executable name or path
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
}

impl Invocation {
    /// Create an invocation with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Whether `flag` appears as a standalone argument.
    pub fn has_arg(&self, flag: &str) -> bool {
        self.args.iter().any(|a| a == flag)
    }

    /// Whether `flag` appears immediately followed by `value`.
    pub fn has_option(&self, flag: &str, value: &str) -> bool {
        self.args
            .windows(2)
            .any(|pair| pair[0] == flag && pair[1] == value)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Single-quote a word for display if it contains anything a shell would
/// split or interpret.
fn quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word.chars().all(|c| {
            c.is_ascii_alphanumeric()
                || matches!(
                    c,
                    '_' | '-' | '.' | '/' | '~' | ':' | '=' | ',' | '@' | '+' | '%'
                )
        });

    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

// ============================================================================
// Termination
// ============================================================================

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Exited normally with this status code
    Exited(i32),
    /// Killed by this signal (Unix only)
    Signaled(i32),
}

impl Termination {
    /// Whether the child exited with status 0.
    pub fn success(&self) -> bool {
        matches!(self, Termination::Exited(0))
    }
}

// ============================================================================
// Per-call options
// ============================================================================

/// Flags for installing Galaxy requirements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Reinstall roles and collections even if already present
    pub force: bool,
}

impl InstallOptions {
    /// Options with `--force` set as given.
    pub fn force(force: bool) -> Self {
        Self { force }
    }
}

/// Flags for running the playbook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlaybookOptions {
    /// Include tasks tagged with the security tag (skipped by default)
    pub security: bool,
}

impl PlaybookOptions {
    /// Options with security tasks included or skipped.
    pub fn security(security: bool) -> Self {
        Self { security }
    }
}

// ============================================================================
// Settings
// ============================================================================

/// Where `ansible-galaxy` and its requirements file live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxySettings {
    /// Executable to run
    pub program: String,
    /// Requirements manifest passed to `-r`
    pub requirements: String,
}

impl Default for GalaxySettings {
    fn default() -> Self {
        Self {
            program: "ansible-galaxy".to_string(),
            requirements: "requirements.yml".to_string(),
        }
    }
}

/// Where `ansible-playbook` and its inputs live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybookSettings {
    /// Executable to run
    pub program: String,
    /// Inventory file passed to `-i`
    pub inventory: String,
    /// Playbook file
    pub playbook: String,
    /// SSH private key passed to `--private-key`
    pub private_key: String,
    /// Show file diffs for changed tasks (`--diff`)
    pub diff: bool,
    /// Tag skipped unless security work is requested
    pub security_tag: String,
}

impl Default for PlaybookSettings {
    fn default() -> Self {
        Self {
            program: "ansible-playbook".to_string(),
            inventory: "hosts".to_string(),
            playbook: "playbook.yml".to_string(),
            private_key: "~/.ssh/id_rsa".to_string(),
            diff: true,
            security_tag: "security".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_plain_words() {
        let inv = Invocation::new("ansible-galaxy").args(["install", "-r", "requirements.yml"]);
        assert_eq!(inv.to_string(), "ansible-galaxy install -r requirements.yml");
    }

    #[test]
    fn test_display_quotes_spaces_and_quotes() {
        let inv = Invocation::new("ansible-playbook")
            .arg("my play.yml")
            .arg("it's")
            .arg("");
        assert_eq!(
            inv.to_string(),
            r"ansible-playbook 'my play.yml' 'it'\''s' ''"
        );
    }

    #[test]
    fn test_display_keeps_tilde_unquoted() {
        let inv = Invocation::new("ansible-playbook").args(["--private-key", "~/.ssh/id_rsa"]);
        assert_eq!(inv.to_string(), "ansible-playbook --private-key ~/.ssh/id_rsa");
    }

    #[test]
    fn test_has_option_requires_adjacent_value() {
        let inv = Invocation::new("x").args(["--skip-tags", "security", "--diff"]);
        assert!(inv.has_option("--skip-tags", "security"));
        assert!(!inv.has_option("--diff", "security"));
        assert!(inv.has_arg("--diff"));
        assert!(!inv.has_arg("--force"));
    }

    #[test]
    fn test_termination_success() {
        assert!(Termination::Exited(0).success());
        assert!(!Termination::Exited(1).success());
        assert!(!Termination::Signaled(9).success());
    }

    #[test]
    fn test_options_default_to_false() {
        assert!(!InstallOptions::default().force);
        assert!(!PlaybookOptions::default().security);
    }
}
