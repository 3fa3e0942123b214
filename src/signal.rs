//! Shutdown signalling for the watch loop.
//!
//! A [`ShutdownHandler`] wraps an `AtomicBool` that the driver checks at every
//! iteration boundary, while sleeping, and between chunks of a copy or
//! checksum. [`install_handler`] wires it to Ctrl+C / SIGTERM through `ctrlc`;
//! tests create one directly and call [`ShutdownHandler::request_shutdown`].
//!
//! A second signal while the first is still pending exits the process with
//! code 130 straight away, for reads that block on a stalled device.

use crate::types::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Cancellation token shared between the signal handler and the driver.
#[derive(Debug, Clone, Default)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with no shutdown requested.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` once Ctrl+C was pressed or `request_shutdown()` was called.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Ask the driver to stop at the next boundary.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Clear the flag so the handler can be reused.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install a Ctrl+C / SIGTERM handler that sets the shutdown flag.
///
/// `ctrlc` only allows one handler per process, so repeated calls hand back
/// the already-registered handler with its flag cleared.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = Arc::clone(&handler.flag);

    ctrlc::set_handler(move || {
        if escalate(&flag) {
            log::warn!("Second interrupt, exiting immediately");
            std::process::exit(ExitCode::Interrupted.as_i32());
        }
        log::warn!("Shutdown requested, stopping after the current step");
    })?;

    let _ = GLOBAL_HANDLER.set(handler.clone());
    Ok(handler)
}

/// Set the flag; `true` if it was already set
fn escalate(flag: &AtomicBool) -> bool {
    flag.swap(true, Ordering::SeqCst)
}
