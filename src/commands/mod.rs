//! Command drivers

pub mod run;
mod sleeper;

pub use sleeper::{Sleeper, ThreadSleeper};
