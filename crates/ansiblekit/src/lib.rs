//! # ansiblekit
//!
//! Thin Rust wrapper around the Ansible command-line tools.
//!
//! This crate provides functionality for:
//! - Building `ansible-galaxy install` and `ansible-playbook` command lines
//!   from a handful of settings and boolean flags
//! - Running them as child processes attached to the caller's terminal
//! - Turning the child's exit status into a typed error
//!
//! Ansible itself stays opaque. Nothing here parses inventories, playbooks
//! or tool output.
//!
//! ## Example
//!
//! ```no_run
//! use ansiblekit::{Client, GalaxySettings, InstallOptions, PlaybookOptions, PlaybookSettings};
//!
//! let client = Client::new(GalaxySettings::default(), PlaybookSettings::default());
//!
//! // Preview without running
//! println!("{}", client.playbook_command(&PlaybookOptions::default()));
//!
//! // Install roles, then apply the playbook including security tasks
//! client.install_requirements(&InstallOptions::force(true)).expect("install failed");
//! client.run_playbook(&PlaybookOptions::security(true)).expect("playbook failed");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod command;
pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    GalaxySettings, InstallOptions, Invocation, PlaybookOptions, PlaybookSettings, Termination,
};

use backend::{Backend, process::ProcessBackend};

/// High-level client for the two Ansible operations.
///
/// The client pairs the tool settings with a backend; each operation builds
/// its invocation, runs it once and maps the exit status.
pub struct Client {
    backend: Box<dyn Backend>,
    galaxy: GalaxySettings,
    playbook: PlaybookSettings,
}

impl Client {
    /// Create a client that runs real child processes.
    pub fn new(galaxy: GalaxySettings, playbook: PlaybookSettings) -> Self {
        Self::with_backend(Box::new(ProcessBackend::new()), galaxy, playbook)
    }

    /// Create a client with a custom backend (useful for testing).
    pub fn with_backend(
        backend: Box<dyn Backend>,
        galaxy: GalaxySettings,
        playbook: PlaybookSettings,
    ) -> Self {
        Self {
            backend,
            galaxy,
            playbook,
        }
    }

    /// The invocation [`Client::install_requirements`] would run.
    pub fn install_command(&self, options: &InstallOptions) -> Invocation {
        command::install_command(&self.galaxy, options)
    }

    /// The invocation [`Client::run_playbook`] would run.
    pub fn playbook_command(&self, options: &PlaybookOptions) -> Invocation {
        command::playbook_command(&self.playbook, options)
    }

    /// Install the roles and collections listed in the requirements file.
    pub fn install_requirements(&self, options: &InstallOptions) -> Result<()> {
        self.execute(&self.install_command(options))
    }

    /// Apply the playbook against the inventory.
    pub fn run_playbook(&self, options: &PlaybookOptions) -> Result<()> {
        self.execute(&self.playbook_command(options))
    }

    fn execute(&self, invocation: &Invocation) -> Result<()> {
        log::info!("Running: {invocation}");

        match self.backend.run(invocation)? {
            Termination::Exited(0) => Ok(()),
            Termination::Exited(code) => Err(Error::CommandFailed {
                program: invocation.program.clone(),
                code,
            }),
            Termination::Signaled(signal) => Err(Error::Terminated {
                program: invocation.program.clone(),
                signal,
            }),
        }
    }
}
