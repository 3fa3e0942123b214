//! Configuration management

use crate::hash::Md5Digest;
use crate::types::MoverError;
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default pause between checks in loop mode
pub const DEFAULT_SLEEP_SECS: u64 = 5;

/// Command-line arguments
#[derive(Debug, Clone, Parser)]
#[command(
    name = "bigmove",
    version,
    about = "Copy a file when the source is larger than the destination"
)]
pub struct Cli {
    /// Source file path
    pub source: PathBuf,

    /// Destination file path
    pub destination: PathBuf,

    /// Expected MD5 of the copied file; a match ends the run, even in loop mode
    #[arg(long, value_name = "HEX")]
    pub md5: Option<String>,

    /// Keep checking instead of running once
    #[arg(long)]
    pub loopmode: bool,

    /// Seconds to sleep between checks in loop mode
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_SLEEP_SECS)]
    pub sleep: u64,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Validated per-run configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// File to copy from
    pub source: PathBuf,

    /// File to copy to
    pub destination: PathBuf,

    /// Digest that ends the run when the destination matches it
    pub expected_md5: Option<Md5Digest>,

    /// Repeat the check until verified or interrupted
    pub loop_mode: bool,

    /// Pause between checks
    pub sleep: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            expected_md5: None,
            loop_mode: false,
            sleep: Duration::from_secs(DEFAULT_SLEEP_SECS),
        }
    }
}

impl Config {
    /// Validate configuration
    ///
    /// Source existence is not checked here; a missing source is reported by
    /// the run itself.
    pub fn validate(&self) -> Result<(), MoverError> {
        if same_file(&self.source, &self.destination) {
            return Err(MoverError::Config(
                "Source and destination cannot be the same".to_string(),
            ));
        }

        if self.destination.is_dir() {
            return Err(MoverError::Config(format!(
                "Destination is a directory: {}",
                self.destination.display()
            )));
        }

        Ok(())
    }
}

/// Equal as written, or both exist and resolve to the same canonical path
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl TryFrom<Cli> for Config {
    type Error = MoverError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let expected_md5 = cli.md5.as_deref().map(str::parse::<Md5Digest>).transpose()?;

        let config = Config {
            source: cli.source,
            destination: cli.destination,
            expected_md5,
            loop_mode: cli.loopmode,
            sleep: Duration::from_secs(cli.sleep),
        };
        config.validate()?;
        Ok(config)
    }
}
