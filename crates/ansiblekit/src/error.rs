//! Error types for Ansible invocations.
//!
//! The wrapped tools are opaque: the only thing this crate learns from a run
//! is how the child process terminated. Each variant maps onto a process exit
//! code so callers can hand the child's status straight back to their shell.

use thiserror::Error;

/// Exit code used when the program could not be found, matching POSIX shells.
pub const EXIT_NOT_FOUND: u8 = 127;

/// Errors that can occur while running an Ansible command.
#[derive(Debug, Error)]
pub enum Error {
    /// The child process exited with a non-zero status
    #[error("{program} exited with status {code}")]
    CommandFailed {
        /// Program that was executed
        program: String,
        /// Exit status reported by the child
        code: i32,
    },

    /// The child process was killed by a signal
    #[error("{program} was terminated by signal {signal}")]
    Terminated {
        /// Program that was executed
        program: String,
        /// Signal number that ended the child
        signal: i32,
    },

    /// The program is not installed or not on PATH
    #[error("{0} not found on PATH. Is Ansible installed?")]
    ToolNotFound(String),

    /// Spawning the child failed for another reason
    #[error("failed to execute {program}: {source}")]
    Spawn {
        /// Program that could not be started
        program: String,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Process exit code that best represents this error.
    ///
    /// A child's own non-zero status is passed through unchanged when it fits
    /// in a byte; anything outside `1..=255` collapses to 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::CommandFailed { code, .. } => match u8::try_from(*code) {
                Ok(0) | Err(_) => 1,
                Ok(code) => code,
            },
            Error::Terminated { signal, .. } => {
                u8::try_from(128 + *signal).unwrap_or(1)
            }
            Error::ToolNotFound(_) => EXIT_NOT_FOUND,
            Error::Spawn { .. } => 1,
        }
    }
}

/// Result type for Ansible operations.
pub type Result<T> = std::result::Result<T, Error>;
