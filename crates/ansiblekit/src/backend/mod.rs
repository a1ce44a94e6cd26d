//! Backend abstraction for executing invocations.
//!
//! The [`Backend`] trait is the single side-effecting seam of this crate,
//! allowing for different implementations (real child processes, a mock for
//! testing).

pub mod process;

use crate::error::Result;
use crate::types::{Invocation, Termination};
use std::sync::{Arc, Mutex};

/// Executes an [`Invocation`] and reports how it ended.
pub trait Backend: Send + Sync {
    /// Run the invocation to completion.
    ///
    /// Implementations return `Ok` for any child that ran, whatever its exit
    /// status; `Err` is reserved for failing to start it.
    fn run(&self, invocation: &Invocation) -> Result<Termination>;
}

/// Mock backend that records invocations instead of running them.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    calls: Arc<Mutex<Vec<Invocation>>>,
    exit_code: i32,
}

impl MockBackend {
    /// Create a mock whose children all exit 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock whose children all exit with `code`.
    pub fn exiting_with(code: i32) -> Self {
        Self {
            exit_code: code,
            ..Self::default()
        }
    }

    /// Invocations received so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

impl Backend for MockBackend {
    fn run(&self, invocation: &Invocation) -> Result<Termination> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }
        Ok(Termination::Exited(self.exit_code))
    }
}
