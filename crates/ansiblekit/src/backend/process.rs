//! Backend that runs invocations as real child processes.

use crate::backend::Backend;
use crate::error::{Error, Result};
use crate::types::{Invocation, Termination};
use std::io::ErrorKind;
use std::process::{Command, ExitStatus, Stdio};

/// Runs each invocation as a child attached to the caller's terminal.
///
/// stdin, stdout and stderr are inherited so the tool can prompt for vault
/// or become passwords and stream its own progress output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessBackend;

impl ProcessBackend {
    /// Create a new ProcessBackend.
    pub fn new() -> Self {
        Self
    }
}

impl Backend for ProcessBackend {
    fn run(&self, invocation: &Invocation) -> Result<Termination> {
        log::debug!("spawning {invocation}");

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::ToolNotFound(invocation.program.clone()),
                _ => Error::Spawn {
                    program: invocation.program.clone(),
                    source: e,
                },
            })?;

        // Ignore only after spawning: ignored dispositions survive exec, and
        // the child must still die (or clean up) on Ctrl-C.
        let status = {
            let _interrupts = IgnoreInterrupts::new();
            child.wait()
        }
        .map_err(|e| Error::Spawn {
            program: invocation.program.clone(),
            source: e,
        })?;

        let termination = termination(status);
        log::debug!("{} finished: {termination:?}", invocation.program);
        Ok(termination)
    }
}

/// Ignores SIGINT and SIGQUIT in this process until dropped.
///
/// The terminal sends Ctrl-C to the whole foreground process group, so the
/// child still receives it. The parent keeps waiting and reports whatever
/// status the child ends with.
#[cfg(unix)]
struct IgnoreInterrupts {
    int: libc::sighandler_t,
    quit: libc::sighandler_t,
}

#[cfg(unix)]
impl IgnoreInterrupts {
    #[allow(unsafe_code)]
    fn new() -> Self {
        // SAFETY: SIG_IGN installs no handler code; the previous dispositions
        // are kept so Drop can put them back.
        unsafe {
            Self {
                int: libc::signal(libc::SIGINT, libc::SIG_IGN),
                quit: libc::signal(libc::SIGQUIT, libc::SIG_IGN),
            }
        }
    }
}

#[cfg(unix)]
impl Drop for IgnoreInterrupts {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        let restore = |previous: libc::sighandler_t| {
            if previous == libc::SIG_ERR {
                libc::SIG_DFL
            } else {
                previous
            }
        };

        // SAFETY: restores dispositions returned by signal() in new().
        unsafe {
            libc::signal(libc::SIGINT, restore(self.int));
            libc::signal(libc::SIGQUIT, restore(self.quit));
        }
    }
}

#[cfg(not(unix))]
struct IgnoreInterrupts;

#[cfg(not(unix))]
impl IgnoreInterrupts {
    fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
fn termination(status: ExitStatus) -> Termination {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => Termination::Exited(code),
        (None, Some(signal)) => Termination::Signaled(signal),
        (None, None) => Termination::Exited(1),
    }
}

#[cfg(not(unix))]
fn termination(status: ExitStatus) -> Termination {
    Termination::Exited(status.code().unwrap_or(1))
}
