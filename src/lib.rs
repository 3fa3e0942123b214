//! # bigmove - Size-triggered file copier
//!
//! Copies a file over its destination only when the source has grown past it,
//! optionally verifies the result against an expected MD5, and can keep
//! watching on a fixed interval until the checksum matches.

// Module declarations
pub mod commands;
pub mod config;
pub mod decision;
pub mod executor;
pub mod hash;
pub mod logging;
pub mod signal;
pub mod types;

// Re-export commonly used types
pub use commands::run::{run, run_with, RunEvent, RunOutcome, RunSummary};
pub use config::{Cli, Config};
pub use types::{CopyDecision, ExitCode, MoverError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
