//! Core type definitions for bigmove

mod decision;
mod error;
mod exit;

pub use decision::CopyDecision;
pub use error::MoverError;
pub use exit::ExitCode;
